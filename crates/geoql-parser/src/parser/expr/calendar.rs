//! Calendar literals: `date[...]`, `time[...]`, `weekday[...]`, `month[...]`.
//!
//! Each body is either a comma-separated list or a single `low..high` range
//! of one item kind.

use super::super::{ParseError, TokenStream};
use super::collection::Building;
use geoql_ast::{CalendarSet, Date, Expr, ExprKind, Month, Span, TimeOfDay, Weekday};
use geoql_lexer::{Lexeme, Token};

/// Parse a calendar literal starting at its keyword.
pub(super) fn parse_calendar(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let keyword = stream.advance();
    let kind = match keyword.token {
        Token::Date => ExprKind::Date(parse_body(stream, parse_date)?),
        Token::Time => ExprKind::Time(parse_body(stream, parse_time)?),
        Token::Weekday => ExprKind::Weekday(parse_body(stream, parse_weekday)?),
        Token::Month => ExprKind::Month(parse_body(stream, parse_month)?),
        _ => {
            return Err(ParseError::unexpected_token(
                &keyword,
                "where a calendar literal was expected",
            ));
        }
    };
    Ok(Expr::new(kind, stream.span_from(keyword.span.start)))
}

/// Parse `[item, item, ...]` or `[item..item]`.
fn parse_body<T>(
    stream: &mut TokenStream,
    item: fn(&mut TokenStream) -> Result<T, ParseError>,
) -> Result<CalendarSet<T>, ParseError> {
    stream.expect(Token::LBracket)?;
    if stream.check(Token::RBracket) {
        return Err(ParseError::invalid_syntax(
            "empty calendar literal",
            stream.current_span(),
        ));
    }

    let mut state = Building::Nothing;
    let mut items = vec![item(stream)?];
    let mut range_high = None;

    loop {
        let next = stream.peek();
        match next.token {
            Token::Comma => {
                state.commit(Building::Array, next.span)?;
                stream.advance();
                items.push(item(stream)?);
            }
            Token::DotDot => {
                state.commit(Building::Range, next.span)?;
                stream.advance();
                range_high = Some(item(stream)?);
            }
            Token::RBracket => {
                stream.advance();
                break;
            }
            _ => {
                return Err(ParseError::unexpected_token(
                    &next,
                    "in calendar literal (expected ',', '..' or ']')",
                ));
            }
        }
    }

    match (range_high, items.pop()) {
        (Some(high), Some(low)) => Ok(CalendarSet::Range(low, high)),
        (None, Some(last)) => {
            items.push(last);
            Ok(CalendarSet::List(items))
        }
        (_, None) => Err(ParseError::invalid_syntax(
            "empty calendar literal",
            stream.current_span(),
        )),
    }
}

/// Parse an unsigned integer calendar field.
fn field(stream: &mut TokenStream, what: &str) -> Result<(u32, Lexeme), ParseError> {
    let lexeme = stream.advance();
    if lexeme.token != Token::Int {
        return Err(ParseError::unexpected_token(
            &lexeme,
            &format!("where the {} was expected", what),
        ));
    }
    let value = lexeme.text.parse::<u32>().map_err(|_| {
        ParseError::invalid_literal(format!("{} '{}' is out of range", what, lexeme.text), lexeme.span)
    })?;
    Ok((value, lexeme))
}

/// Consume one or more `-` separators between date fields.
fn date_separator(stream: &mut TokenStream) -> Result<(), ParseError> {
    stream.expect(Token::Minus)?;
    while stream.eat(Token::Minus).is_some() {}
    Ok(())
}

/// `YYYY-MM-DD`.
fn parse_date(stream: &mut TokenStream) -> Result<Date, ParseError> {
    let (year, first) = field(stream, "year")?;
    date_separator(stream)?;
    let (month, _) = field(stream, "month")?;
    date_separator(stream)?;
    let (day, _) = field(stream, "day")?;
    let span = stream.span_from(first.span.start);
    Date::new(year, month, day).map_err(|msg| ParseError::invalid_literal(msg, span))
}

/// `HH:MM` or `HH:MM:SS`.
fn parse_time(stream: &mut TokenStream) -> Result<TimeOfDay, ParseError> {
    let (hour, first) = field(stream, "hour")?;
    stream.expect(Token::Colon)?;
    let (minute, _) = field(stream, "minute")?;
    let second = if stream.eat(Token::Colon).is_some() {
        Some(field(stream, "second")?.0)
    } else {
        None
    };
    let span = stream.span_from(first.span.start);
    TimeOfDay::new(hour, minute, second).map_err(|msg| ParseError::invalid_literal(msg, span))
}

fn named<T>(
    stream: &mut TokenStream,
    what: &str,
    lookup: fn(&str) -> Option<T>,
) -> Result<T, ParseError> {
    let lexeme = stream.advance();
    if lexeme.token != Token::Ident {
        return Err(ParseError::unexpected_token(
            &lexeme,
            &format!("where a {} name was expected", what),
        ));
    }
    lookup(&lexeme.text).ok_or_else(|| {
        ParseError::invalid_literal(format!("unknown {} '{}'", what, lexeme.text), lexeme.span)
    })
}

fn parse_weekday(stream: &mut TokenStream) -> Result<Weekday, ParseError> {
    named(stream, "weekday", Weekday::lookup)
}

/// Month by name (`jan`, `january`) or number (1-12).
fn parse_month(stream: &mut TokenStream) -> Result<Month, ParseError> {
    if !stream.check(Token::Int) {
        return named(stream, "month", Month::lookup);
    }
    let lexeme = stream.advance();
    let span: Span = lexeme.span;
    let number = lexeme.text.parse::<i64>().map_err(|_| {
        ParseError::invalid_literal(format!("month '{}' is out of range", lexeme.text), span)
    })?;
    Month::from_number(number).map_err(|msg| ParseError::invalid_literal(msg, span))
}
