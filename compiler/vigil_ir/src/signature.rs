//! Declared shapes of built-in functions.
//!
//! The parser checks calls against a `FuncSignature`; the evaluator uses
//! the declared return type to decide whether a call is logged in the
//! computation trace.

use std::fmt;

/// Declared return type of a built-in function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReturnType {
    /// Tagless, context-free number.
    Scalar,
    /// One number per tag group.
    Number,
    /// One time series per tag group.
    Series,
}

impl ReturnType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Number => "number",
            Self::Series => "series",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared kind of one function parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArgKind {
    /// Must be a string literal.
    Text,
    /// A number literal, or any expression; a lone scalar result is
    /// passed as a bare number.
    Number,
    /// Any expression producing per-group results.
    Results,
}

impl ArgKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Results => "results",
        }
    }
}

/// Parameter kinds and return type of a built-in.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncSignature {
    pub args: Vec<ArgKind>,
    pub returns: ReturnType,
}

impl FuncSignature {
    pub fn new(args: impl Into<Vec<ArgKind>>, returns: ReturnType) -> Self {
        FuncSignature {
            args: args.into(),
            returns,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// Lookup table from function name to signature.
///
/// Implemented by the evaluator's function registry so the parser can
/// resolve names without depending on the evaluator.
pub trait Signatures {
    fn signature(&self, name: &str) -> Option<&FuncSignature>;
}

/// Table with no functions, for arithmetic-only expressions.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoFunctions;

impl Signatures for NoFunctions {
    fn signature(&self, _name: &str) -> Option<&FuncSignature> {
        None
    }
}
