//! Expression tree.
//!
//! Trees are small (an alert expression is a handful of calls and
//! operators), so children are boxed rather than arena-allocated.

mod operators;

pub use operators::{BinaryOp, OperatorError, UnaryOp};

use crate::FuncSignature;
use std::fmt;
use vigil_stack::ensure_sufficient_stack;

/// One node of a parsed expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Numeric literal.
    Number(f64),
    /// String literal. Only meaningful as a function argument.
    String(String),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Node>,
    },
    Func(FuncCall),
}

/// A call to a built-in function, resolved against its signature.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub signature: FuncSignature,
    pub args: Vec<Node>,
}

impl Node {
    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, arg: Node) -> Self {
        Node::Unary {
            op,
            arg: Box::new(arg),
        }
    }

    /// Build a binary node from an operator token.
    ///
    /// For trees assembled outside the parser; an unrecognized token is
    /// rejected here rather than at evaluation time.
    pub fn binary_from_symbol(symbol: &str, left: Node, right: Node) -> Result<Self, OperatorError> {
        Ok(Self::binary(symbol.parse()?, left, right))
    }

    /// Build a unary node from an operator token.
    pub fn unary_from_symbol(symbol: &str, arg: Node) -> Result<Self, OperatorError> {
        Ok(Self::unary(symbol.parse()?, arg))
    }

    /// Short name of the node kind, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "number literal",
            Node::String(_) => "string literal",
            Node::Binary { .. } => "binary expression",
            Node::Unary { .. } => "unary expression",
            Node::Func(_) => "function call",
        }
    }

    fn binary_precedence(&self) -> Option<u8> {
        match self {
            Node::Binary { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_canonical(f))
    }
}

impl Node {
    fn write_canonical(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write_number(f, *n),
            Node::String(s) => write_quoted(f, s),
            Node::Binary { op, left, right } => {
                let prec = op.precedence();
                // Left-associative: the left operand may share our level,
                // the right one must bind strictly tighter.
                write_operand(f, left, left.binary_precedence().is_some_and(|p| p > prec))?;
                write!(f, " {op} ")?;
                write_operand(f, right, right.binary_precedence().is_some_and(|p| p >= prec))
            }
            Node::Unary { op, arg } => {
                write!(f, "{op}")?;
                write_operand(f, arg, arg.binary_precedence().is_some())
            }
            Node::Func(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for FuncCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &Node, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

/// Non-finite values only occur in hand-built trees; the lexer rejects
/// literals that overflow `f64`.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "+Inf" } else { "-Inf" })
    } else {
        write!(f, "{n}")
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
