//! Pratt parser core - precedence climbing for binary operators.

use super::super::{ParseError, TokenStream};
use super::atoms;
use geoql_ast::{BinaryOp, Expr};
use geoql_lexer::Token;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    /// `a < b < c` is rejected rather than grouped.
    NonAssoc,
}

const RELATIONAL_PREC: u8 = 30;

/// Get binary operator metadata (precedence and associativity).
///
/// Returns (precedence, associativity) where higher precedence = tighter
/// binding. `not` is listed because it introduces the two-token negated
/// operators (`not in`, `not nearby`, `not intersects`).
fn binary_op_info(token: Token) -> Option<(u8, Assoc)> {
    match token {
        Token::Or | Token::OrOr => Some((10, Assoc::Left)),
        Token::And | Token::AndAnd => Some((20, Assoc::Left)),
        Token::EqEq
        | Token::NotEq
        | Token::Lt
        | Token::LtEq
        | Token::Gt
        | Token::GtEq
        | Token::In
        | Token::NotIn
        | Token::Nearby
        | Token::NotNearby
        | Token::Intersects
        | Token::NotIntersects
        | Token::Not => Some((RELATIONAL_PREC, Assoc::NonAssoc)),
        Token::Plus | Token::Minus => Some((40, Assoc::Left)),
        Token::Star | Token::Slash | Token::Percent => Some((50, Assoc::Left)),
        _ => None,
    }
}

/// Consume an operator whose precedence has already been checked.
fn parse_operator(stream: &mut TokenStream) -> Result<BinaryOp, ParseError> {
    let lexeme = stream.advance();
    let op = match lexeme.token {
        Token::Or | Token::OrOr => BinaryOp::Or,
        Token::And | Token::AndAnd => BinaryOp::And,
        Token::EqEq => BinaryOp::Eq,
        Token::NotEq => BinaryOp::Ne,
        Token::Lt => BinaryOp::Lt,
        Token::LtEq => BinaryOp::Le,
        Token::Gt => BinaryOp::Gt,
        Token::GtEq => BinaryOp::Ge,
        Token::In => BinaryOp::In,
        Token::NotIn => BinaryOp::NotIn,
        Token::Nearby => BinaryOp::Nearby,
        Token::NotNearby => BinaryOp::NotNearby,
        Token::Intersects => BinaryOp::Intersects,
        Token::NotIntersects => BinaryOp::NotIntersects,
        Token::Plus => BinaryOp::Add,
        Token::Minus => BinaryOp::Sub,
        Token::Star => BinaryOp::Mul,
        Token::Slash => BinaryOp::Div,
        Token::Percent => BinaryOp::Mod,
        Token::Not => {
            let next = stream.advance();
            match next.token {
                Token::In => BinaryOp::NotIn,
                Token::Nearby => BinaryOp::NotNearby,
                Token::Intersects => BinaryOp::NotIntersects,
                _ => {
                    return Err(ParseError::unexpected_token(
                        &next,
                        "after 'not' (expected 'in', 'nearby' or 'intersects')",
                    ));
                }
            }
        }
        _ => return Err(ParseError::unexpected_token(&lexeme, "as binary operator")),
    };
    Ok(op)
}

/// Pratt parser - handles binary operators with precedence climbing.
pub(super) fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    stream.enter()?;
    let result = parse_binary(stream, min_prec);
    stream.leave();
    result
}

fn parse_binary(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let mut left = atoms::parse_unary(stream)?;

    while let Some((prec, assoc)) = binary_op_info(stream.peek_token()) {
        if prec < min_prec {
            break;
        }

        let op_span = stream.current_span();
        let op = parse_operator(stream)?;
        let right = parse_pratt(stream, prec + 1)?;
        left = Expr::binary(op, left, right);

        if assoc == Assoc::NonAssoc
            && let Some((next_prec, _)) = binary_op_info(stream.peek_token())
            && next_prec == prec
        {
            return Err(ParseError::invalid_syntax(
                format!(
                    "'{}' cannot be chained with another comparison; use parentheses",
                    op
                ),
                op_span,
            ));
        }
    }

    Ok(left)
}
