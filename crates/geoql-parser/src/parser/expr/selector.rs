//! Selectors: `name`, `name{"a", "b", *}`, `name:1km`, `name{"a"}:1km, 2km`.

use super::super::{ParseError, TokenStream};
use super::atoms;
use geoql_ast::{Expr, ExprKind, Selector};
use geoql_lexer::Token;
use indexmap::IndexSet;

/// Parse a selector starting at an identifier.
///
/// The selector is a wildcard unless the argument block names at least one
/// string and no `*`.
pub(super) fn parse_selector(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let name = stream.expect(Token::Ident)?;

    let mut args = IndexSet::new();
    let mut star = false;
    if stream.eat(Token::LBrace).is_some() {
        star = parse_args(stream, &mut args)?;
    }

    let mut props = Vec::new();
    if stream.eat(Token::Colon).is_some() {
        loop {
            props.push(atoms::parse_scalar(stream)?);
            if stream.eat(Token::Comma).is_none() {
                break;
            }
        }
    }

    let selector = Selector {
        name: name.text,
        wildcard: star || args.is_empty(),
        args,
        props,
    };
    Ok(Expr::new(
        ExprKind::Selector(selector),
        stream.span_from(name.span.start),
    ))
}

/// Parse the argument block after `{`. Returns whether `*` was listed.
fn parse_args(stream: &mut TokenStream, args: &mut IndexSet<String>) -> Result<bool, ParseError> {
    let mut star = false;
    if stream.eat(Token::RBrace).is_some() {
        return Ok(star);
    }

    loop {
        let next = stream.advance();
        match next.token {
            Token::Str => {
                args.insert(next.text);
            }
            Token::Star => star = true,
            _ => {
                return Err(ParseError::unexpected_token(
                    &next,
                    "in selector arguments (expected a string or '*')",
                ));
            }
        }

        let sep = stream.advance();
        match sep.token {
            Token::Comma => continue,
            Token::RBrace => return Ok(star),
            _ => return Err(ParseError::expected_token(Token::RBrace, &sep)),
        }
    }
}
