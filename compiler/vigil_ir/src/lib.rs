//! Vigil IR - expression tree types.
//!
//! This crate contains the data structures shared by the parser and the
//! evaluator:
//! - `Span` for source locations
//! - `Node`, the expression tree produced by `vigil_parse`
//! - `BinaryOp` / `UnaryOp`, the closed operator sets
//! - `FuncSignature`, the declared shape of a built-in function
//!
//! Every `Node` renders back to expression text through `Display`. The
//! rendering is canonical (minimal parentheses, double-quoted strings) and
//! reparses to an equal tree.

pub mod ast;
mod signature;
mod span;

pub use ast::{BinaryOp, FuncCall, Node, OperatorError, UnaryOp};
pub use signature::{ArgKind, FuncSignature, NoFunctions, ReturnType, Signatures};
pub use span::{Span, SpanError};
