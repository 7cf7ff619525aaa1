//! Recursive descent parser with precedence climbing for binary operators.

use crate::lexer::{tokenize, unescape, Token, TokenKind};
use crate::{ParseError, ParseErrorKind};
use tracing::trace;
use vigil_ir::{ArgKind, BinaryOp, FuncCall, Node, Signatures, Span, UnaryOp};
use vigil_stack::ensure_sufficient_stack;

/// Parse expression text into a tree, resolving function names against
/// `functions`.
pub fn parse(source: &str, functions: &dyn Signatures) -> Result<Node, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        functions,
    };
    let node = parser.expression()?;
    match parser.current() {
        None => Ok(node),
        Some(token) => Err(parser.unexpected(token, "end of expression")),
    }
}

struct Parser<'src, 'f> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    functions: &'f dyn Signatures,
}

impl Parser<'_, '_> {
    fn expression(&mut self) -> Result<Node, ParseError> {
        self.parse_precedence(BinaryOp::LOWEST_PRECEDENCE)
    }

    /// Parse operators binding at most as loosely as `max_prec`.
    ///
    /// Parenthesised subexpressions recurse through here, so each level
    /// checks the stack first.
    fn parse_precedence(&mut self, max_prec: u8) -> Result<Node, ParseError> {
        ensure_sufficient_stack(|| self.parse_precedence_inner(max_prec))
    }

    fn parse_precedence_inner(&mut self, max_prec: u8) -> Result<Node, ParseError> {
        let mut left = self.unary()?;

        while let Some(op) = self.binary_op()? {
            let prec = op.precedence();
            if prec > max_prec {
                break;
            }
            self.advance();
            // All binary operators are left-associative.
            let right = self.parse_precedence(prec - 1)?;
            left = Node::binary(op, left, right);
        }

        Ok(left)
    }

    fn binary_op(&self) -> Result<Option<BinaryOp>, ParseError> {
        let Some(token) = self.current() else {
            return Ok(None);
        };
        let op = match token.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Operator => self
                .text(token.span)
                .parse::<BinaryOp>()
                .map_err(|e| ParseError::new(ParseErrorKind::UnknownOperator(e), token.span))?,
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let op = match self.current().map(|t| &t.kind) {
            Some(TokenKind::Minus) => Some(UnaryOp::Neg),
            Some(TokenKind::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        let Some(op) = op else {
            return self.primary();
        };
        self.advance();
        let arg = ensure_sufficient_stack(|| self.unary())?;
        Ok(Node::unary(op, arg))
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.current().cloned() else {
            return Err(self.unexpected_end("expression"));
        };
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Node::Number(n))
            }
            TokenKind::Ident => self.call(&token),
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::String => Err(ParseError::new(ParseErrorKind::StrayString, token.span)),
            _ => Err(self.unexpected(&token, "expression")),
        }
    }

    fn call(&mut self, name_token: &Token) -> Result<Node, ParseError> {
        let name = self.text(name_token.span).to_string();
        trace!(%name, "parse call");
        let signature = self
            .functions
            .signature(&name)
            .cloned()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnknownFunction(name.clone()), name_token.span))?;
        self.advance();
        self.expect(&TokenKind::LParen, "`(` after function name")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let index = args.len();
                args.push(self.argument(&name, index, signature.args.get(index).copied())?);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        let close = self.expect(&TokenKind::RParen, "`,` or `)`")?;

        if args.len() != signature.arity() {
            return Err(ParseError::new(
                ParseErrorKind::ArityMismatch {
                    name,
                    expected: signature.arity(),
                    got: args.len(),
                },
                name_token.span.merge(close),
            ));
        }
        Ok(Node::Func(FuncCall {
            name,
            signature,
            args,
        }))
    }

    /// Parse one argument, checking string-literal positions against the
    /// declared parameter kind. Surplus arguments are parsed as
    /// expressions and rejected by the arity check.
    fn argument(&mut self, name: &str, index: usize, kind: Option<ArgKind>) -> Result<Node, ParseError> {
        let is_string = self.check(&TokenKind::String);
        let start = self.current().map(|t| t.span);
        match (kind, is_string) {
            (Some(ArgKind::Text) | None, true) => {
                let token = self.advance_token();
                Ok(Node::String(unescape(self.text(token.span))))
            }
            (Some(ArgKind::Text), false) | (Some(ArgKind::Number | ArgKind::Results), true) => {
                let expected = kind.map_or("value", ArgKind::as_str);
                Err(ParseError::new(
                    ParseErrorKind::ArgumentKind {
                        name: name.to_string(),
                        index,
                        expected,
                    },
                    start.unwrap_or_else(|| self.end_span()),
                ))
            }
            _ => self.expression(),
        }
    }

    // Cursor helpers

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current().is_some_and(|t| &t.kind == kind)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_token(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<Span, ParseError> {
        match self.current() {
            Some(token) if &token.kind == kind => {
                let span = token.span;
                self.advance();
                Ok(span)
            }
            Some(token) => Err(self.unexpected(token, expected)),
            None => Err(self.unexpected_end(expected)),
        }
    }

    fn text(&self, span: Span) -> &str {
        &self.source[span.to_range()]
    }

    fn end_span(&self) -> Span {
        let end = self.tokens.last().map_or(0, |t| t.span.end);
        Span::new(end, end)
    }

    fn unexpected(&self, token: &Token, expected: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: token.kind.describe(self.text(token.span)),
                expected,
            },
            token.span,
        )
    }

    fn unexpected_end(&self, expected: &'static str) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEnd { expected }, self.end_span())
    }
}
