//! Errors raised by the backend data model.

/// Failure parsing backend syntax or querying the store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TsdbError {
    #[error("invalid tag set `{0}`")]
    InvalidTagSet(String),
    #[error("invalid query `{query}`: {reason}")]
    InvalidQuery { query: String, reason: String },
    #[error("backend query failed: {0}")]
    Backend(String),
}
