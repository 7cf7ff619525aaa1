//! Parse errors.

use vigil_ir::{OperatorError, Span, SpanError};

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("invalid token `{0}`")]
    InvalidToken(String),
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error(transparent)]
    UnknownOperator(#[from] OperatorError),
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("argument {index} of {name} must be a {expected}")]
    ArgumentKind {
        name: String,
        index: usize,
        expected: &'static str,
    },
    #[error("string literals are only allowed as function arguments")]
    StrayString,
    #[error(transparent)]
    TooLong(#[from] SpanError),
}

/// A parse error and where it happened.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: impl Into<ParseErrorKind>, span: Span) -> Self {
        ParseError {
            kind: kind.into(),
            span,
        }
    }
}
