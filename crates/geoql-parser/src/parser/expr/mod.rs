//! Expression parser using Pratt parsing (precedence climbing).
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `or`, `||` - left associative
//! 2. `and`, `&&` - left associative
//! 3. `==`, `!=`, `<`, `<=`, `>`, `>=`, `in`, `not in`, `nearby`,
//!    `not nearby`, `intersects`, `not intersects` - non-associative
//! 4. `+`, `-` - left associative
//! 5. `*`, `/`, `%` - left associative
//! 6. Unary `-` - only directly before a numeric literal
//!
//! ## Module Organization
//!
//! - `pratt` - Pratt parser core (precedence table, binary operators)
//! - `atoms` - Primary expressions and the literal dispatcher
//! - `numeric` - Numbers with unit suffixes and sign handling
//! - `collection` - Bracketed arrays and ranges
//! - `selector` - Selector argument and property lists
//! - `calendar` - `date[...]`, `time[...]`, `weekday[...]`, `month[...]`
//! - `geometry` - Geometry literals

mod atoms;
mod calendar;
mod collection;
mod geometry;
mod numeric;
mod pratt;
mod selector;

use super::{ParseError, TokenStream};
use geoql_ast::Expr;

/// Parse a full expression.
pub fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    pratt::parse_pratt(stream, 0)
}

/// Parse a literal value: scalar, unit, array, range, calendar or geometry.
///
/// Used where selectors and variable references are not allowed, such as
/// variable declarations.
pub(super) fn parse_literal(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    atoms::parse_literal(stream)
}

/// Parse a numeric literal that may carry a unit suffix or a leading `-`.
pub(super) fn parse_signed_number(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    numeric::parse_signed_number(stream)
}
