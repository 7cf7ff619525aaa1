//! Binary and Unary Operators
//!
//! The operator sets are closed: an operator token outside them is
//! rejected when the tree is built (`FromStr`), so the evaluator never sees
//! an unknown operator.

use std::fmt;
use std::str::FromStr;

/// Operator token outside the recognized set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{symbol}`")]
pub struct OperatorError {
    pub symbol: String,
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Every binary operator, in precedence order (tightest first).
    pub const ALL: [BinaryOp; 12] = [
        Self::Mul,
        Self::Div,
        Self::Add,
        Self::Sub,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::Eq,
        Self::NotEq,
        Self::And,
        Self::Or,
    ];

    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly). All binary
    /// operators are left-associative.
    ///
    /// - 3: `*` `/`
    /// - 4: `+` `-`
    /// - 7: `<` `>` `<=` `>=`
    /// - 8: `==` `!=`
    /// - 12: `&&`
    /// - 13: `||`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div => 3,
            Self::Add | Self::Sub => 4,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 7,
            Self::Eq | Self::NotEq => 8,
            Self::And => 12,
            Self::Or => 13,
        }
    }

    /// Lowest binding strength of any binary operator.
    pub const LOWEST_PRECEDENCE: u8 = 13;
}

impl FromStr for BinaryOp {
    type Err = OperatorError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_symbol() == symbol)
            .ok_or_else(|| OperatorError {
                symbol: symbol.to_string(),
            })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl FromStr for UnaryOp {
    type Err = OperatorError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "-" => Ok(Self::Neg),
            "!" => Ok(Self::Not),
            _ => Err(OperatorError {
                symbol: symbol.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
