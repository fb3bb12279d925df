//! Token stream wrapper for the hand-written parser.

use super::ParseError;
use geoql_ast::Span;
use geoql_lexer::{Lexeme, Token, Tokenizer};

/// Deepest nesting of expressions and geometry collections the parser accepts.
pub const MAX_DEPTH: u32 = 128;

/// Token stream with one token of lookahead and span tracking.
///
/// Lookahead is built on the tokenizer's single-slot `unread`, so the parser
/// can never look further than one token ahead.
pub struct TokenStream<'src> {
    tokens: Tokenizer<'src>,
    /// End offset of the last consumed token.
    last_end: u32,
    /// Current recursion depth, bounded by [`MAX_DEPTH`].
    depth: u32,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: Tokenizer::new(source),
            last_end: 0,
            depth: 0,
        }
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> Lexeme {
        self.tokens.peek()
    }

    /// Kind of the next token.
    pub fn peek_token(&mut self) -> Token {
        self.peek().token
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Lexeme {
        let lexeme = self.tokens.scan();
        self.last_end = lexeme.span.end;
        lexeme
    }

    /// Check if the next token is `expected`.
    pub fn check(&mut self, expected: Token) -> bool {
        self.peek_token() == expected
    }

    /// Consume the next token if it is `expected`.
    pub fn eat(&mut self, expected: Token) -> Option<Lexeme> {
        if self.check(expected) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Expect a specific token and advance if it matches.
    pub fn expect(&mut self, expected: Token) -> Result<Lexeme, ParseError> {
        let next = self.peek();
        if next.token == expected {
            Ok(self.advance())
        } else {
            Err(ParseError::expected_token(expected, &next))
        }
    }

    /// Whether the next token starts exactly where the last consumed token
    /// ended, with no whitespace or comment in between.
    pub fn next_is_adjacent(&mut self) -> bool {
        self.peek().span.start == self.last_end
    }

    /// Span of the next token.
    pub fn current_span(&mut self) -> Span {
        self.peek().span
    }

    /// Enter one level of nesting. Fails once [`MAX_DEPTH`] is reached so
    /// malformed input cannot exhaust the stack.
    pub fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::invalid_syntax(
                "expression nested too deeply",
                self.current_span(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a level entered with [`enter`](Self::enter).
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end.max(start))
    }
}
