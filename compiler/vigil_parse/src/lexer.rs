//! Lexer for Vigil expressions using logos.
//!
//! Comparison and logical operators are lexed as maximal runs of operator
//! characters and resolved afterwards, so a misspelled operator such as
//! `=<` surfaces as an unknown operator rather than as two valid tokens.

use crate::{ParseError, ParseErrorKind};
use logos::Logos;
use vigil_ir::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum TokenKind {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("!=")]
    NotEq,

    /// `==`, `<`, `<=`, `>`, `>=`, `&&`, `||`, or an unknown run.
    #[regex(r"[<>=&|]+")]
    Operator,

    /// Literals too large for `f64` are invalid tokens, not infinities.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", finite_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", finite_number)]
    Number(f64),

    /// Double-quoted string, escapes still in place.
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

fn finite_number(lex: &mut logos::Lexer<'_, TokenKind>) -> Option<f64> {
    lex.slice().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub(crate) fn describe(&self, text: &str) -> String {
        match self {
            TokenKind::Number(_) => format!("number `{text}`"),
            TokenKind::String => "string literal".to_string(),
            TokenKind::Ident => format!("identifier `{text}`"),
            _ => format!("`{text}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Lex the whole source up front; expressions are short.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = Span::try_from_range(lexer.span())
            .map_err(|e| ParseError::new(e, Span::DUMMY))?;
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidToken(lexer.slice().to_string()),
                    span,
                ))
            }
        }
    }
    Ok(tokens)
}

/// Strip the quotes from a string token and resolve its escapes.
pub(crate) fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
