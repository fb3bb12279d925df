//! Hand-written recursive descent parser for GeoQL.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper over the tokenizer's scan/unread
//! - `error`: ParseError and the positioned SyntaxError
//! - `expr`: Expression parser using Pratt parsing, plus literal sub-grammars
//! - `trigger`: The trigger statement
//!
//! The first error aborts the parse; there is no recovery.

mod error;
mod stream;

pub use error::{ParseError, ParseErrorKind, SyntaxError};
use stream::TokenStream;

mod expr;
mod trigger;

use geoql_ast::{Expr, LineIndex, Trigger};
use geoql_lexer::Token;
use tracing::debug;

/// Parse a trigger statement.
pub fn parse(source: &str) -> Result<Trigger, SyntaxError> {
    let mut stream = TokenStream::new(source);
    let result = trigger::parse_trigger(&mut stream);
    match result {
        Ok(trigger) => {
            debug!(
                vars = trigger.vars.len(),
                repeat = trigger.repeat.is_some(),
                reset = trigger.reset_after.is_some(),
                "parsed trigger"
            );
            Ok(trigger)
        }
        Err(err) => Err(resolve(source, err)),
    }
}

/// Parse a standalone expression, such as a `when` condition on its own.
pub fn parse_expr(source: &str) -> Result<Expr, SyntaxError> {
    let mut stream = TokenStream::new(source);
    let parsed = expr::parse_expr(&mut stream).and_then(|expr| {
        let end = stream.peek();
        if end.token == Token::Eof {
            Ok(expr)
        } else {
            Err(ParseError::unexpected_token(&end, "after expression"))
        }
    });
    parsed.map_err(|err| resolve(source, err))
}

fn resolve(source: &str, err: ParseError) -> SyntaxError {
    let err = err.into_syntax_error(&LineIndex::new(source));
    debug!(line = err.line, column = err.column, message = %err.message, "parse failed");
    err
}
