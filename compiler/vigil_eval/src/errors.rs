//! Evaluation errors and their constructors.
//!
//! Every domain failure the walker can hit is an `EvalError`. Constructors
//! live here so call sites stay one-liners and messages are worded in one
//! place.

use crate::GroupResult;
use vigil_ir::{BinaryOp, OperatorError, ReturnType};
use vigil_parse::{ParseError, ParseErrorKind};
use vigil_tsdb::TsdbError;

/// Result of an evaluation step. Defaults to the per-group result list.
pub type EvalResult<T = Vec<GroupResult>> = Result<T, EvalError>;

/// Structured category of an evaluation failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    /// No rule combines these operand variants (e.g. series with series).
    #[error("unsupported operand types for `{op}`: {left} and {right}")]
    UnsupportedOperandTypes {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    #[error("unknown operator `{symbol}`")]
    UnknownOperator { symbol: String },
    /// Error returned by a built-in, passed through.
    #[error("{name}: {message}")]
    Function { name: String, message: String },
    #[error("undefined function `{name}`")]
    UndefinedFunction { name: String },
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("expected {expected} argument, got {got}")]
    ArgumentMismatch {
        expected: &'static str,
        got: &'static str,
    },
    /// A function declared to return one value type produced another.
    #[error("{name} is declared to return {declared} but returned {got}")]
    ReturnTypeMismatch {
        name: String,
        declared: ReturnType,
        got: &'static str,
    },
    #[error("unexpected {kind} in expression")]
    UnexpectedNode { kind: &'static str },
    #[error(transparent)]
    Backend(#[from] TsdbError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// An evaluation failure.
///
/// `message` is the rendered `kind`, kept alongside so callers that only
/// display errors need not format the kind themselves.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

impl From<TsdbError> for EvalError {
    fn from(err: TsdbError) -> Self {
        Self::from_kind(EvalErrorKind::Backend(err))
    }
}

impl From<OperatorError> for EvalError {
    fn from(err: OperatorError) -> Self {
        Self::from_kind(EvalErrorKind::UnknownOperator { symbol: err.symbol })
    }
}

/// Unknown operators keep their own kind; every other parse failure is
/// wrapped.
impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        match err.kind {
            ParseErrorKind::UnknownOperator(op) => op.into(),
            _ => Self::from_kind(EvalErrorKind::Parse(err)),
        }
    }
}

// Operator Errors

#[cold]
pub fn unsupported_operand_types(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperandTypes { op, left, right })
}

// Function Errors

/// Error raised by a built-in.
#[cold]
pub fn function_error(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Function {
        name: name.to_string(),
        message: message.into(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn argument_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentMismatch { expected, got })
}

#[cold]
pub fn return_type_mismatch(name: &str, declared: ReturnType, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnTypeMismatch {
        name: name.to_string(),
        declared,
        got,
    })
}

// Tree Errors

#[cold]
pub fn unexpected_node(kind: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnexpectedNode { kind })
}
