//! Parse error types.

use geoql_ast::{LineIndex, Span};
use geoql_lexer::{Lexeme, Token};
use std::fmt;
use thiserror::Error;

/// Positioned syntax error returned by [`parse`](crate::parse).
///
/// `line` and `column` are 1-based; `column` counts characters. `offset` is
/// the byte offset into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct SyntaxError {
    pub line: u32,
    pub column: u32,
    pub offset: usize,
    pub message: String,
}

/// Parse error with source location, before line/column resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A different token was expected here.
    UnexpectedToken,
    /// Input ended while a construct was still open.
    UnexpectedEof,
    /// Tokens are well-formed but violate a grammar rule, e.g. mixing a
    /// range and a list inside one literal.
    InvalidSyntax,
    /// A literal is malformed or out of range: unknown unit suffix,
    /// calendar field out of bounds, integer overflow.
    InvalidLiteral,
}

fn describe(lexeme: &Lexeme) -> String {
    match lexeme.token {
        Token::Eof => "end of input".to_string(),
        Token::Illegal => format!("illegal token '{}'", lexeme.text),
        Token::Ident | Token::Int | Token::Float => format!("{} '{}'", lexeme.token, lexeme.text),
        Token::Str => format!("string \"{}\"", lexeme.text),
        token => token.to_string(),
    }
}

fn kind_for(found: &Lexeme) -> ParseErrorKind {
    if found.token == Token::Eof {
        ParseErrorKind::UnexpectedEof
    } else {
        ParseErrorKind::UnexpectedToken
    }
}

impl ParseError {
    /// Create an "expected token" error.
    pub fn expected_token(expected: Token, found: &Lexeme) -> Self {
        Self {
            kind: kind_for(found),
            span: found.span,
            message: format!("expected {}, found {}", expected, describe(found)),
        }
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(found: &Lexeme, context: &str) -> Self {
        Self {
            kind: kind_for(found),
            span: found.span,
            message: format!("unexpected {} {}", describe(found), context),
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            span,
            message: message.into(),
        }
    }

    /// Create an "invalid literal" error.
    pub fn invalid_literal(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidLiteral,
            span,
            message: message.into(),
        }
    }

    /// Resolve the span against the source text.
    pub fn into_syntax_error(self, index: &LineIndex) -> SyntaxError {
        let (line, column) = index.line_col(self.span.start);
        SyntaxError {
            line,
            column,
            offset: self.span.start as usize,
            message: self.message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}
