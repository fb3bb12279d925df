//! Trigger statement parser.
//!
//! ```text
//! trigger := 'trigger' [ 'vars' varDecl* ] 'when' expr [ repeatClause ] [ resetClause ]
//! varDecl := IDENT '=' literal
//! repeatClause := 'repeat' INT [ 'every' DURATION ]
//! resetClause  := 'reset' 'after' DURATION
//! ```

use super::expr::{parse_expr, parse_literal, parse_signed_number};
use super::{ParseError, TokenStream};
use geoql_ast::{Expr, ExprKind, Repeat, Trigger};
use geoql_lexer::Token;
use indexmap::IndexMap;
use tracing::trace;

pub(super) fn parse_trigger(stream: &mut TokenStream) -> Result<Trigger, ParseError> {
    let start = stream.expect(Token::Trigger)?.span.start;

    let mut vars = IndexMap::new();
    if stream.eat(Token::Vars).is_some() {
        while stream.check(Token::Ident) {
            let name = stream.advance();
            stream.expect(Token::Assign)?;
            let value = parse_literal(stream)?;
            trace!(name = %name.text, "declared variable");
            if vars.insert(name.text.clone(), value).is_some() {
                return Err(ParseError::invalid_syntax(
                    format!("variable '{}' is declared more than once", name.text),
                    name.span,
                ));
            }
        }
    }

    stream.expect(Token::When)?;
    let when = parse_expr(stream)?;

    let repeat = if stream.eat(Token::Repeat).is_some() {
        let count = parse_repeat_count(stream)?;
        let every = if stream.eat(Token::Every).is_some() {
            Some(parse_duration(stream, "every")?)
        } else {
            None
        };
        Some(Repeat { count, every })
    } else {
        None
    };

    let reset_after = if stream.eat(Token::Reset).is_some() {
        stream.expect(Token::After)?;
        Some(parse_duration(stream, "reset after")?)
    } else {
        None
    };

    let end = stream.peek();
    if end.token != Token::Eof {
        return Err(ParseError::unexpected_token(&end, "after trigger statement"));
    }

    Ok(Trigger::new(
        vars,
        when,
        repeat,
        reset_after,
        stream.span_from(start),
    ))
}

fn parse_repeat_count(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let count = parse_signed_number(stream)?;
    match count.kind {
        ExprKind::Int(n) if n > 0 => Ok(count),
        _ => Err(ParseError::invalid_literal(
            "repeat count must be a positive integer",
            count.span,
        )),
    }
}

fn parse_duration(stream: &mut TokenStream, clause: &str) -> Result<Expr, ParseError> {
    let duration = parse_signed_number(stream)?;
    if matches!(duration.kind, ExprKind::Duration(_)) {
        Ok(duration)
    } else {
        Err(ParseError::invalid_literal(
            format!("'{}' expects a duration such as 30s, 15min or 1h", clause),
            duration.span,
        ))
    }
}
