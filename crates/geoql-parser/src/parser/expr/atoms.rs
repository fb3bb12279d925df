//! Primary expressions - parentheses, variable references, selectors and
//! the literal dispatcher.

use super::super::{ParseError, TokenStream};
use super::{calendar, collection, geometry, numeric, selector};
use geoql_ast::{Expr, ExprKind};
use geoql_lexer::Token;

/// Parse a unary-level expression.
///
/// A leading `-` is only meaningful before a numeric literal; the numeric
/// parser receives it as an explicit sign.
pub(super) fn parse_unary(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    match stream.peek_token() {
        Token::LParen => parse_parenthesized(stream),
        Token::At => parse_var_ref(stream),
        Token::Ident => selector::parse_selector(stream),
        _ => parse_literal(stream),
    }
}

/// Parse any literal value.
pub(super) fn parse_literal(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let next = stream.peek();
    match next.token {
        Token::Minus | Token::Int | Token::Float => numeric::parse_number_or_range(stream),
        Token::Str | Token::True | Token::False => parse_scalar(stream),
        Token::LBracket => collection::parse_bracketed(stream),
        Token::Date | Token::Time | Token::Weekday | Token::Month => {
            calendar::parse_calendar(stream)
        }
        Token::Point
        | Token::Line
        | Token::Polygon
        | Token::MultiPoint
        | Token::MultiLine
        | Token::MultiPolygon
        | Token::Collection => geometry::parse_geometry_expr(stream),
        _ => Err(ParseError::unexpected_token(
            &next,
            "where a value was expected",
        )),
    }
}

/// Parse a scalar literal: signed number (with optional unit), string or
/// boolean. Scalars are the elements of arrays, ranges and property lists.
pub(super) fn parse_scalar(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let next = stream.peek();
    match next.token {
        Token::Minus | Token::Int | Token::Float => numeric::parse_signed_number(stream),
        Token::Str => {
            let lexeme = stream.advance();
            Ok(Expr::new(ExprKind::Str(lexeme.text), lexeme.span))
        }
        Token::True | Token::False => {
            let lexeme = stream.advance();
            Ok(Expr::new(
                ExprKind::Bool(lexeme.token == Token::True),
                lexeme.span,
            ))
        }
        _ => Err(ParseError::unexpected_token(
            &next,
            "where a scalar literal was expected",
        )),
    }
}

/// Parse parenthesized expression.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let open = stream.expect(Token::LParen)?;
    let inner = super::parse_expr(stream)?;
    stream.expect(Token::RParen)?;
    Ok(Expr::new(
        ExprKind::Paren(Box::new(inner)),
        stream.span_from(open.span.start),
    ))
}

/// Parse `@name`.
fn parse_var_ref(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let at = stream.expect(Token::At)?;
    let name = stream.expect(Token::Ident)?;
    Ok(Expr::new(
        ExprKind::VarRef(name.text),
        stream.span_from(at.span.start),
    ))
}
