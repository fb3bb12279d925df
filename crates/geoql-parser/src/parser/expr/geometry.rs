//! Geometry literals.
//!
//! ```text
//! point[x, y]
//! line[[x, y], [x, y], ...]
//! polygon[[[x, y], ...], [[x, y], ...]]      first ring is the outer boundary
//! multipoint[point[...], ...]                 members must match the multi kind
//! collection[point[...], multiline[...], ...] any members
//! ```
//!
//! Coordinate nesting is handled by composing one list parser: a line is a
//! list of pairs and a polygon is a list of lists of pairs.

use super::super::{ParseError, TokenStream};
use super::numeric;
use geoql_ast::{Coord, Expr, ExprKind, Geometry, GeometryKind};
use geoql_lexer::Token;

/// Parse a geometry literal into an expression node.
pub(super) fn parse_geometry_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_span().start;
    let geometry = parse_geometry(stream)?;
    Ok(Expr::new(
        ExprKind::Geometry(geometry),
        stream.span_from(start),
    ))
}

fn parse_geometry(stream: &mut TokenStream) -> Result<Geometry, ParseError> {
    let keyword = stream.advance();
    let kind = match keyword.token {
        Token::Point => GeometryKind::Point,
        Token::Line => GeometryKind::Line,
        Token::Polygon => GeometryKind::Polygon,
        Token::MultiPoint => GeometryKind::MultiPoint,
        Token::MultiLine => GeometryKind::MultiLine,
        Token::MultiPolygon => GeometryKind::MultiPolygon,
        Token::Collection => GeometryKind::Collection,
        _ => {
            return Err(ParseError::unexpected_token(
                &keyword,
                "where a geometry literal was expected",
            ));
        }
    };

    let geometry = match kind {
        GeometryKind::Point => Geometry::Point(parse_pair(stream)?),
        GeometryKind::Line => Geometry::Line(parse_list(stream, parse_pair)?),
        GeometryKind::Polygon => Geometry::Polygon(parse_list(stream, parse_ring)?),
        GeometryKind::Collection => {
            stream.enter()?;
            let members = parse_list(stream, parse_geometry);
            stream.leave();
            Geometry::Collection(members?)
        }
        GeometryKind::MultiPoint | GeometryKind::MultiLine | GeometryKind::MultiPolygon => {
            let members = parse_multi_members(stream, kind)?;
            Geometry::Multi { kind, members }
        }
    };
    Ok(geometry)
}

/// Members of a multi-object, each of the multi's member kind.
fn parse_multi_members(
    stream: &mut TokenStream,
    kind: GeometryKind,
) -> Result<Vec<Geometry>, ParseError> {
    stream.expect(Token::LBracket)?;
    let mut members = Vec::new();
    loop {
        let start = stream.current_span().start;
        let member = parse_geometry(stream)?;
        if Some(member.kind()) != kind.member_kind() {
            return Err(ParseError::invalid_syntax(
                format!("{} members must be {}, found {}", kind, member_name(kind), member.kind()),
                stream.span_from(start),
            ));
        }
        members.push(member);
        if stream.eat(Token::Comma).is_none() {
            break;
        }
    }
    stream.expect(Token::RBracket)?;
    Ok(members)
}

fn member_name(kind: GeometryKind) -> &'static str {
    kind.member_kind().map_or("geometry", GeometryKind::keyword)
}

/// Parse `[` item (`,` item)* `]`, requiring at least one item.
fn parse_list<T>(
    stream: &mut TokenStream,
    item: fn(&mut TokenStream) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    stream.expect(Token::LBracket)?;
    if stream.check(Token::RBracket) {
        return Err(ParseError::invalid_syntax(
            "empty coordinate list",
            stream.current_span(),
        ));
    }
    let mut items = vec![item(stream)?];
    while stream.eat(Token::Comma).is_some() {
        items.push(item(stream)?);
    }
    stream.expect(Token::RBracket)?;
    Ok(items)
}

fn parse_ring(stream: &mut TokenStream) -> Result<Vec<Coord>, ParseError> {
    parse_list(stream, parse_pair)
}

/// `[x, y]`.
fn parse_pair(stream: &mut TokenStream) -> Result<Coord, ParseError> {
    stream.expect(Token::LBracket)?;
    let x = parse_ordinate(stream)?;
    stream.expect(Token::Comma)?;
    let y = parse_ordinate(stream)?;
    stream.expect(Token::RBracket)?;
    Ok(Coord::new(x, y))
}

fn parse_ordinate(stream: &mut TokenStream) -> Result<f64, ParseError> {
    let number = numeric::parse_signed_number(stream)?;
    match number.kind {
        ExprKind::Int(value) => Ok(value as f64),
        ExprKind::Float(value) => Ok(value),
        _ => Err(ParseError::invalid_literal(
            "coordinates must be plain numbers",
            number.span,
        )),
    }
}
