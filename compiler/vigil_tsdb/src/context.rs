//! Query context: the interface built-in functions query through.

use crate::{Point, Request, TagSet, Timestamp, TsdbError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One series returned by the store.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    pub metric: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub dps: BTreeMap<Timestamp, Point>,
}

/// All series answering one request.
pub type ResponseSet = Vec<Response>;

/// Source of time-series data.
///
/// The evaluation engine never calls this itself; built-in functions do,
/// after registering the request with the evaluation state.
pub trait Context {
    fn query(&self, request: &Request) -> Result<ResponseSet, TsdbError>;
}

impl<F> Context for F
where
    F: Fn(&Request) -> Result<ResponseSet, TsdbError>,
{
    fn query(&self, request: &Request) -> Result<ResponseSet, TsdbError> {
        self(request)
    }
}

/// Context with no data: every query succeeds with no series.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyContext;

impl Context for EmptyContext {
    fn query(&self, _request: &Request) -> Result<ResponseSet, TsdbError> {
        Ok(Vec::new())
    }
}
