//! Vigil Parse - expression text to `vigil_ir::Node`.
//!
//! A `logos` lexer feeds a precedence-climbing recursive descent parser.
//! Function names are resolved against a `Signatures` table while parsing,
//! so argument counts and string-literal positions are checked before an
//! expression ever reaches the evaluator.

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::parse;
