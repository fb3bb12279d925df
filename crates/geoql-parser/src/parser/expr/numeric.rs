//! Numeric literals, unit suffixes and sign handling.
//!
//! A suffix belongs to the number only when it is directly adjacent
//! (`50mph`, `10%`). `10 % 3` is a modulo expression and `10 km` is a
//! number followed by a selector.
//!
//! Suffixes are classified in a fixed order: percent, pressure, distance,
//! speed, temperature, then the duration fallback for anything starting with
//! `h`, `m` or `s`. The order is what makes `30m` a distance and `mbar` a
//! pressure.

use super::super::{ParseError, TokenStream};
use geoql_ast::foundation::units::classify_suffix;
use geoql_ast::{
    DistanceUnit, Duration, Expr, ExprKind, PressureUnit, Quantity, Span, SpeedUnit,
    TemperatureUnit, UnitKind,
};
use geoql_lexer::{Lexeme, Token};
use tracing::trace;

/// Parse an optional `-` followed by a numeric literal.
pub(super) fn parse_signed_number(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let sign = stream.eat(Token::Minus).map(|minus| minus.span);
    let next = stream.peek();
    match next.token {
        Token::Int | Token::Float => parse_number(stream, sign),
        _ if sign.is_some() => Err(ParseError::unexpected_token(
            &next,
            "after '-' (only numeric literals can be negated)",
        )),
        _ => Err(ParseError::unexpected_token(
            &next,
            "where a number was expected",
        )),
    }
}

/// Parse a signed number, and a bare `low..high` range if one follows.
pub(super) fn parse_number_or_range(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let low = parse_signed_number(stream)?;
    if stream.eat(Token::DotDot).is_none() {
        return Ok(low);
    }
    let high = parse_signed_number(stream)?;
    make_range(low, high)
}

/// Build a range node, checking that both bounds have the same literal kind.
pub(super) fn make_range(low: Expr, high: Expr) -> Result<Expr, ParseError> {
    let span = low.span.merge(&high.span);
    match (low.literal_kind(), high.literal_kind()) {
        (Some(low_kind), Some(high_kind)) if low_kind == high_kind => Ok(Expr::new(
            ExprKind::Range {
                low: Box::new(low),
                high: Box::new(high),
            },
            span,
        )),
        (Some(low_kind), Some(high_kind)) => Err(ParseError::invalid_syntax(
            format!(
                "range bounds must have the same kind, found {} and {}",
                low_kind, high_kind
            ),
            high.span,
        )),
        _ => Err(ParseError::invalid_syntax(
            "range bounds must be literals",
            span,
        )),
    }
}

/// Parse the number at the head of the stream. `sign` is the span of an
/// already consumed `-`.
fn parse_number(stream: &mut TokenStream, sign: Option<Span>) -> Result<Expr, ParseError> {
    let number = stream.advance();
    let start = sign.map_or(number.span.start, |span| span.start);

    let suffix = if stream.next_is_adjacent()
        && matches!(stream.peek_token(), Token::Percent | Token::Ident)
    {
        Some(stream.advance())
    } else {
        None
    };

    let Some(suffix) = suffix else {
        let kind = plain_number(&number, sign.is_some())?;
        return Ok(Expr::new(kind, stream.span_from(start)));
    };
    let span = stream.span_from(start);

    let unit_kind = if suffix.token == Token::Percent {
        Some(UnitKind::Percent)
    } else {
        classify_suffix(&suffix.text)
    };
    let Some(unit_kind) = unit_kind else {
        return Err(unknown_suffix(&suffix));
    };
    trace!(suffix = %suffix.text, kind = %unit_kind, "classified unit suffix");

    if sign.is_some() && !unit_kind.is_signed() {
        return Err(ParseError::invalid_literal(
            format!("{} literal cannot be negative", unit_kind),
            span,
        ));
    }

    let magnitude = float_value(&number)?;
    let value = if sign.is_some() { -magnitude } else { magnitude };

    let kind = match unit_kind {
        UnitKind::Percent => ExprKind::Percent(value),
        UnitKind::Pressure => ExprKind::Pressure(Quantity::new(
            value,
            lookup_unit(PressureUnit::lookup(&suffix.text), &suffix)?,
        )),
        UnitKind::Distance => ExprKind::Distance(Quantity::new(
            value,
            lookup_unit(DistanceUnit::lookup(&suffix.text), &suffix)?,
        )),
        UnitKind::Speed => ExprKind::Speed(Quantity::new(
            value,
            lookup_unit(SpeedUnit::lookup(&suffix.text), &suffix)?,
        )),
        UnitKind::Temperature => ExprKind::Temperature(Quantity::new(
            value,
            lookup_unit(TemperatureUnit::lookup(&suffix.text), &suffix)?,
        )),
        UnitKind::Duration => {
            if number.token != Token::Int {
                return Err(ParseError::invalid_literal(
                    "duration components must be integers",
                    span,
                ));
            }
            let text = format!("{}{}", number.text, suffix.text);
            let duration =
                Duration::parse(&text).map_err(|msg| ParseError::invalid_literal(msg, span))?;
            ExprKind::Duration(duration)
        }
    };

    Ok(Expr::new(kind, span))
}

fn plain_number(number: &Lexeme, negative: bool) -> Result<ExprKind, ParseError> {
    match number.token {
        Token::Int => {
            let text = if negative {
                format!("-{}", number.text)
            } else {
                number.text.clone()
            };
            text.parse::<i64>().map(ExprKind::Int).map_err(|_| {
                ParseError::invalid_literal(
                    format!("integer literal '{}' is out of range", text),
                    number.span,
                )
            })
        }
        _ => {
            let value = float_value(number)?;
            Ok(ExprKind::Float(if negative { -value } else { value }))
        }
    }
}

fn float_value(number: &Lexeme) -> Result<f64, ParseError> {
    let invalid = || {
        ParseError::invalid_literal(
            format!("invalid numeric literal '{}'", number.text),
            number.span,
        )
    };
    let value = number.text.parse::<f64>().map_err(|_| invalid())?;
    if value.is_finite() { Ok(value) } else { Err(invalid()) }
}

fn unknown_suffix(suffix: &Lexeme) -> ParseError {
    ParseError::invalid_literal(format!("unknown unit suffix '{}'", suffix.text), suffix.span)
}

fn lookup_unit<U>(unit: Option<U>, suffix: &Lexeme) -> Result<U, ParseError> {
    unit.ok_or_else(|| unknown_suffix(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(source: &str) -> Result<Expr, ParseError> {
        parse_number_or_range(&mut TokenStream::new(source))
    }

    fn kind(source: &str) -> ExprKind {
        number(source).unwrap().kind
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(kind("42"), ExprKind::Int(42));
        assert_eq!(kind("-42"), ExprKind::Int(-42));
        assert_eq!(kind("-9223372036854775808"), ExprKind::Int(i64::MIN));
        assert_eq!(kind("2.5"), ExprKind::Float(2.5));
        assert_eq!(kind("-1.1"), ExprKind::Float(-1.1));
        assert!(number("99999999999999999999").is_err());
    }

    #[test]
    fn test_float_must_be_finite() {
        assert_eq!(kind("1.5e-7"), ExprKind::Float(1.5e-7));
        let err = number("1.0e999").unwrap_err();
        assert_eq!(err.message, "invalid numeric literal '1.0e999'");
        assert!(number("1.0e999km").is_err());
    }

    #[test]
    fn test_suffix_must_be_adjacent() {
        let mut stream = TokenStream::new("10 km");
        let expr = parse_signed_number(&mut stream).unwrap();
        assert_eq!(expr.kind, ExprKind::Int(10));
        assert_eq!(stream.peek_token(), Token::Ident);

        let mut stream = TokenStream::new("10 % 3");
        let expr = parse_signed_number(&mut stream).unwrap();
        assert_eq!(expr.kind, ExprKind::Int(10));
        assert_eq!(stream.peek_token(), Token::Percent);
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(
            kind("30m"),
            ExprKind::Distance(Quantity::new(30.0, DistanceUnit::Meters))
        );
        assert_eq!(
            kind("1013mbar"),
            ExprKind::Pressure(Quantity::new(1013.0, PressureUnit::Millibar))
        );
        assert_eq!(
            kind("30min"),
            ExprKind::Duration(Duration::from_seconds(1800))
        );
    }

    #[test]
    fn test_sign_rules() {
        assert!(number("-1.1km").is_err());
        assert!(number("-5mph").is_err());
        assert!(number("-5%").is_err());
        assert!(number("-5hpa").is_err());
        assert!(number("-5min").is_err());
        assert_eq!(
            kind("-30C"),
            ExprKind::Temperature(Quantity::new(-30.0, TemperatureUnit::Celsius))
        );
    }

    #[test]
    fn test_minus_requires_number() {
        let err = number("-abc").unwrap_err();
        assert!(err.message.contains("only numeric literals can be negated"));
    }

    #[test]
    fn test_duration_rules() {
        assert_eq!(
            kind("1h30min"),
            ExprKind::Duration(Duration::from_seconds(5400))
        );
        assert!(number("1.5h").is_err());
        assert!(number("30s1h").is_err());
        assert!(number("5sec").is_err());
    }

    #[test]
    fn test_unknown_suffix() {
        let err = number("5parsecs").unwrap_err();
        assert_eq!(err.message, "unknown unit suffix 'parsecs'");
        assert_eq!(err.span, Span::new(1, 8));
    }

    #[test]
    fn test_bare_range() {
        let expr = number("1..5").unwrap();
        let ExprKind::Range { low, high } = &expr.kind else {
            panic!("expected range");
        };
        assert_eq!(low.kind, ExprKind::Int(1));
        assert_eq!(high.kind, ExprKind::Int(5));
        assert_eq!(expr.span, Span::new(0, 4));

        assert!(number("-10c..35c").is_ok());
        let err = number("1..5.0").unwrap_err();
        assert_eq!(
            err.message,
            "range bounds must have the same kind, found int and float"
        );
    }
}
