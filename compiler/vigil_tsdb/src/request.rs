//! Backend query requests.
//!
//! A `Request` serializes to the JSON body a `/api/query` endpoint
//! accepts. Queries also have a compact text form,
//! `aggregator:[downsample:][rate:]metric{tags}`, which is what expression
//! authors write inside query functions.

use crate::{TagSet, TsdbError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One metric query.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub aggregator: String,
    pub metric: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downsample: Option<String>,
    #[serde(default, skip_serializing_if = "TagSet::is_empty")]
    pub tags: TagSet,
}

/// A time range plus the queries to run over it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub queries: Vec<Query>,
}

impl Request {
    /// Request for a single query starting at `start` (e.g. `"1h-ago"`).
    pub fn new(start: impl Into<String>, query: Query) -> Self {
        Request {
            start: start.into(),
            end: None,
            queries: vec![query],
        }
    }
}

impl FromStr for Query {
    type Err = TsdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TsdbError::InvalidQuery {
            query: s.to_string(),
            reason: reason.to_string(),
        };
        let (head, tags) = match s.find('{') {
            Some(i) => (&s[..i], s[i..].parse::<TagSet>()?),
            None => (s, TagSet::new()),
        };
        let parts: Vec<&str> = head.split(':').collect();
        let [aggregator, modifiers @ .., metric] = parts.as_slice() else {
            return Err(invalid("expected aggregator:metric"));
        };
        if aggregator.is_empty() || metric.is_empty() || modifiers.len() > 2 {
            return Err(invalid("expected aggregator:[downsample:][rate:]metric"));
        }

        let mut query = Query {
            aggregator: (*aggregator).to_string(),
            metric: (*metric).to_string(),
            rate: false,
            downsample: None,
            tags,
        };
        for modifier in modifiers {
            match *modifier {
                "rate" if !query.rate => query.rate = true,
                ds if ds.contains('-') && query.downsample.is_none() && !query.rate => {
                    query.downsample = Some(ds.to_string());
                }
                _ => return Err(invalid("unrecognized modifier")),
            }
        }
        Ok(query)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.aggregator)?;
        if let Some(ds) = &self.downsample {
            write!(f, "{ds}:")?;
        }
        if self.rate {
            f.write_str("rate:")?;
        }
        f.write_str(&self.metric)?;
        if !self.tags.is_empty() {
            write!(f, "{}", self.tags)?;
        }
        Ok(())
    }
}
