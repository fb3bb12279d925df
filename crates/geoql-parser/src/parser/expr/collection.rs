//! Bracketed arrays and ranges: `[a, b, c]` and `[low..high]`.

use super::super::{ParseError, TokenStream};
use super::{atoms, numeric};
use geoql_ast::{Expr, ExprKind, LiteralKind, Span};
use geoql_lexer::Token;

/// What a bracketed literal body has committed to so far.
///
/// Shared with the calendar literals, which follow the same list-or-range
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Building {
    Nothing,
    Array,
    Range,
}

impl Building {
    /// Commit to `next`, failing if the body already committed to the other
    /// shape.
    pub(super) fn commit(&mut self, next: Building, span: Span) -> Result<(), ParseError> {
        match (*self, next) {
            (Building::Array, Building::Range) | (Building::Range, Building::Array) => {
                Err(ParseError::invalid_syntax(
                    "cannot mix a range and a list in one literal",
                    span,
                ))
            }
            (Building::Range, Building::Range) => Err(ParseError::invalid_syntax(
                "a range has exactly two bounds",
                span,
            )),
            _ => {
                *self = next;
                Ok(())
            }
        }
    }
}

/// Parse `[` scalar (`,` scalar)* `]` or `[` scalar `..` scalar `]`.
///
/// The array's element kind is locked by the first element.
pub(super) fn parse_bracketed(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let open = stream.expect(Token::LBracket)?;
    if stream.check(Token::RBracket) {
        return Err(ParseError::invalid_syntax(
            "empty array literal",
            stream.current_span(),
        ));
    }

    let first = atoms::parse_scalar(stream)?;
    let Some(kind) = first.literal_kind() else {
        return Err(ParseError::invalid_syntax(
            "array elements must be scalar literals",
            first.span,
        ));
    };

    let mut state = Building::Nothing;
    let mut elements = vec![first];
    let mut range_high = None;

    loop {
        let next = stream.peek();
        match next.token {
            Token::Comma => {
                state.commit(Building::Array, next.span)?;
                stream.advance();
                let element = atoms::parse_scalar(stream)?;
                check_element_kind(kind, &element)?;
                elements.push(element);
            }
            Token::DotDot => {
                state.commit(Building::Range, next.span)?;
                stream.advance();
                range_high = Some(atoms::parse_scalar(stream)?);
            }
            Token::RBracket => {
                stream.advance();
                break;
            }
            _ => {
                return Err(ParseError::unexpected_token(
                    &next,
                    "in array literal (expected ',', '..' or ']')",
                ));
            }
        }
    }

    let span = stream.span_from(open.span.start);
    match (range_high, elements.pop()) {
        (Some(high), Some(low)) => {
            let range = numeric::make_range(low, high)?;
            Ok(Expr::new(range.kind, span))
        }
        (None, Some(last)) => {
            elements.push(last);
            Ok(Expr::new(ExprKind::Array { kind, elements }, span))
        }
        (_, None) => Err(ParseError::invalid_syntax("empty array literal", span)),
    }
}

fn check_element_kind(kind: LiteralKind, element: &Expr) -> Result<(), ParseError> {
    match element.literal_kind() {
        Some(found) if found == kind => Ok(()),
        Some(found) => Err(ParseError::invalid_syntax(
            format!(
                "array element kind mismatch: expected {}, found {}",
                kind, found
            ),
            element.span,
        )),
        None => Err(ParseError::invalid_syntax(
            "array elements must be scalar literals",
            element.span,
        )),
    }
}
