// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for GeoQL.
//!
//! Raw scanning is done by logos; the [`Tokenizer`] layered on top handles
//! everything that needs context: lower-casing identifiers and classifying
//! them against the keyword table, composing `prefix:name` compound keywords,
//! unescaping strings, and the single-slot pushback the parser relies on.
//!
//! # Design
//!
//! - `Token` is the closed set of lexical categories. Adding a category means
//!   extending `Token`, `KEYWORDS`/`COMPOUND_KEYWORDS` and the parser together.
//! - Scanning never fails: anything unrecognized comes back as
//!   `Token::Illegal` and the parser reports it with a position.
//! - The tokenizer never produces negative numbers. A leading `-` is a
//!   separate `Token::Minus`.
//!
//! # Examples
//!
//! ```
//! use geoql_lexer::{Token, Tokenizer};
//!
//! let mut tokens = Tokenizer::new("speed > 50mph");
//! assert_eq!(tokens.scan().token, Token::Ident);
//! assert_eq!(tokens.scan().token, Token::Gt);
//! let number = tokens.scan();
//! assert_eq!((number.token, number.text.as_str()), (Token::Int, "50"));
//! assert_eq!(tokens.scan().text, "mph");
//! assert_eq!(tokens.scan().token, Token::Eof);
//! ```

use geoql_ast::Span;
use logos::Logos;
use std::fmt;
use tracing::trace;

/// Raw token produced by logos before keyword classification.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // comments
#[logos(skip r"#[^\n]*")] // Skip # comments
enum RawToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("=")]
    Assign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("..")]
    DotDot,
    #[token("@")]
    At,
}

/// GeoQL token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // === Keywords ===
    Trigger,
    Vars,
    When,
    Repeat,
    Every,
    Reset,
    After,
    And,
    Or,
    Not,
    In,
    Nearby,
    Intersects,
    True,
    False,
    // Calendar literal heads
    Date,
    Time,
    Weekday,
    Month,
    // Geometry literal heads
    Point,
    Line,
    Polygon,
    MultiPoint,
    MultiLine,
    MultiPolygon,
    Collection,

    // === Compound keywords (`prefix:name`) ===
    NotIn,
    NotNearby,
    NotIntersects,

    // === Operators ===
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AndAnd,
    OrOr,

    // === Delimiters ===
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    DotDot,
    At,

    // === Literals ===
    Int,
    Float,
    Str,
    /// Identifier that is not a keyword: a selector, variable or unit name.
    Ident,

    Illegal,
    Eof,
}

/// Keyword table. Identifiers are lower-cased before lookup.
const KEYWORDS: &[(&str, Token)] = &[
    ("trigger", Token::Trigger),
    ("vars", Token::Vars),
    ("when", Token::When),
    ("repeat", Token::Repeat),
    ("every", Token::Every),
    ("reset", Token::Reset),
    ("after", Token::After),
    ("and", Token::And),
    ("or", Token::Or),
    ("not", Token::Not),
    ("in", Token::In),
    ("nearby", Token::Nearby),
    ("intersects", Token::Intersects),
    ("true", Token::True),
    ("false", Token::False),
    ("date", Token::Date),
    ("time", Token::Time),
    ("weekday", Token::Weekday),
    ("month", Token::Month),
    ("point", Token::Point),
    ("line", Token::Line),
    ("polygon", Token::Polygon),
    ("multipoint", Token::MultiPoint),
    ("multiline", Token::MultiLine),
    ("multipolygon", Token::MultiPolygon),
    ("collection", Token::Collection),
];

/// Compound keyword table, keyed by `prefix:name`.
const COMPOUND_KEYWORDS: &[(&str, Token)] = &[
    ("not:in", Token::NotIn),
    ("not:nearby", Token::NotNearby),
    ("not:intersects", Token::NotIntersects),
];

/// Keyword for a lower-cased identifier.
pub fn lookup_keyword(word: &str) -> Option<Token> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, token)| *token)
}

/// Keyword for a lower-cased `prefix:name` key.
pub fn lookup_compound(key: &str) -> Option<Token> {
    COMPOUND_KEYWORDS
        .iter()
        .find(|(text, _)| *text == key)
        .map(|(_, token)| *token)
}

/// Whether `word` starts any compound keyword.
fn is_compound_prefix(word: &str) -> bool {
    COMPOUND_KEYWORDS
        .iter()
        .any(|(key, _)| key.split(':').next() == Some(word))
}

impl Token {
    /// Source spelling of fixed tokens, `None` for literal categories.
    pub fn spelling(self) -> Option<&'static str> {
        if let Some((text, _)) = KEYWORDS
            .iter()
            .chain(COMPOUND_KEYWORDS)
            .find(|(_, token)| *token == self)
        {
            return Some(*text);
        }
        let text = match self {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Assign => "=",
            Token::EqEq => "==",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::AndAnd => "&&",
            Token::OrOr => "||",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::DotDot => "..",
            Token::At => "@",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, token)| *token == self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.spelling() {
            return write!(f, "'{}'", text);
        }
        let name = match self {
            Token::Int => "integer",
            Token::Float => "float",
            Token::Str => "string",
            Token::Ident => "identifier",
            Token::Illegal => "illegal token",
            Token::Eof => "end of input",
            _ => "token",
        };
        f.write_str(name)
    }
}

/// A scanned token with its literal text and source span.
///
/// `text` is the lower-cased identifier for words, the unescaped content
/// for strings, and the raw slice for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub text: String,
    pub span: Span,
}

/// Unescape a string literal body.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                _ => return None,
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

fn classify_raw(raw: RawToken) -> Token {
    match raw {
        RawToken::Word => Token::Ident,
        RawToken::Int => Token::Int,
        RawToken::Float => Token::Float,
        RawToken::Str => Token::Str,
        RawToken::Plus => Token::Plus,
        RawToken::Minus => Token::Minus,
        RawToken::Star => Token::Star,
        RawToken::Slash => Token::Slash,
        RawToken::Percent => Token::Percent,
        RawToken::Assign => Token::Assign,
        RawToken::EqEq => Token::EqEq,
        RawToken::NotEq => Token::NotEq,
        RawToken::Lt => Token::Lt,
        RawToken::LtEq => Token::LtEq,
        RawToken::Gt => Token::Gt,
        RawToken::GtEq => Token::GtEq,
        RawToken::AndAnd => Token::AndAnd,
        RawToken::OrOr => Token::OrOr,
        RawToken::LParen => Token::LParen,
        RawToken::RParen => Token::RParen,
        RawToken::LBracket => Token::LBracket,
        RawToken::RBracket => Token::RBracket,
        RawToken::LBrace => Token::LBrace,
        RawToken::RBrace => Token::RBrace,
        RawToken::Comma => Token::Comma,
        RawToken::Colon => Token::Colon,
        RawToken::DotDot => Token::DotDot,
        RawToken::At => Token::At,
    }
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::new(range.start as u32, range.end as u32)
}

/// Token source with single-slot pushback.
pub struct Tokenizer<'src> {
    source: &'src str,
    lexer: logos::Lexer<'src, RawToken>,
    /// Token pushed back by `unread`.
    pending: Option<Lexeme>,
    /// Most recently returned token, eligible for `unread`.
    last: Option<Lexeme>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            lexer: RawToken::lexer(source),
            pending: None,
            last: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Return the next token. After the end of input every call returns
    /// `Token::Eof`.
    pub fn scan(&mut self) -> Lexeme {
        let lexeme = match self.pending.take() {
            Some(lexeme) => lexeme,
            None => self.next_lexeme(),
        };
        trace!(token = ?lexeme.token, text = %lexeme.text, start = lexeme.span.start, "scan");
        self.last = Some(lexeme.clone());
        lexeme
    }

    /// Push the last scanned token back. Only one token can be pushed back;
    /// a second `unread` without an intervening `scan` does nothing.
    pub fn unread(&mut self) {
        if let Some(last) = self.last.take() {
            self.pending = Some(last);
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Lexeme {
        let lexeme = self.scan();
        self.unread();
        lexeme
    }

    /// Byte offset of the read head: the start of a pushed-back token, or
    /// the end of the last token consumed from the source.
    pub fn offset(&self) -> usize {
        match &self.pending {
            Some(lexeme) => lexeme.span.start as usize,
            None => self.lexer.span().end,
        }
    }

    fn next_lexeme(&mut self) -> Lexeme {
        let Some(result) = self.lexer.next() else {
            let end = self.source.len() as u32;
            return Lexeme {
                token: Token::Eof,
                text: String::new(),
                span: Span::point(end),
            };
        };

        let span = to_span(self.lexer.span());
        let slice = self.lexer.slice();
        let Ok(raw) = result else {
            return Lexeme {
                token: Token::Illegal,
                text: slice.to_string(),
                span,
            };
        };

        match raw {
            RawToken::Word => self.word(slice, span),
            RawToken::Str => {
                let body = &slice[1..slice.len() - 1];
                match unescape_string(body) {
                    Some(text) => Lexeme {
                        token: Token::Str,
                        text,
                        span,
                    },
                    None => Lexeme {
                        token: Token::Illegal,
                        text: slice.to_string(),
                        span,
                    },
                }
            }
            other => Lexeme {
                token: classify_raw(other),
                text: slice.to_string(),
                span,
            },
        }
    }

    /// Classify an identifier, composing a compound keyword when a compound
    /// prefix is directly followed by `:` and another identifier.
    fn word(&mut self, slice: &str, span: Span) -> Lexeme {
        let word = slice.to_ascii_lowercase();

        if is_compound_prefix(&word)
            && let Some(rest) = self.lexer.remainder().strip_prefix(':')
        {
            let name_len = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .count();
            let starts_ident = rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
            if starts_ident {
                let name = rest[..name_len].to_ascii_lowercase();
                self.lexer.bump(1 + name_len);
                let key = format!("{}:{}", word, name);
                let span = Span::new(span.start, span.end + 1 + name_len as u32);
                let token = lookup_compound(&key).unwrap_or(Token::Illegal);
                return Lexeme {
                    token,
                    text: key,
                    span,
                };
            }
        }

        let token = lookup_keyword(&word).unwrap_or(Token::Ident);
        Lexeme {
            token,
            text: word,
            span,
        }
    }
}
