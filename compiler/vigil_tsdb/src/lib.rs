//! Vigil TSDB - backend collaborator types.
//!
//! The evaluation engine never talks to a time-series store directly. It
//! consumes this crate's data model:
//! - `TagSet`: the dimensional identity of a series, with the `equal` and
//!   `subset` relations the group join depends on
//! - `Request` / `Query`: what a built-in would ask the store for
//! - `Context`: the query interface a built-in calls through
//! - `Point` / `Timestamp`: one sample of a series

mod context;
mod error;
mod request;
mod tags;

pub use context::{Context, EmptyContext, Response, ResponseSet};
pub use error::TsdbError;
pub use request::{Query, Request};
pub use tags::{replace_tags, TagSet};

/// Unix timestamp in seconds.
pub type Timestamp = i64;

/// One sample value.
pub type Point = f64;
