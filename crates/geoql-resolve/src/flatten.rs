//! Boolean-tree flattening.
//!
//! The condition tree is rewritten into `leaf, op, leaf, op, ..., leaf`,
//! where every operator slot is an `and`/`or` marker and every leaf is the
//! non-logical subtree found at that position. Parenthesized logic is
//! inlined in place, so grouping is lost: the flat form evaluates strictly
//! left to right with no precedence.
//!
//! `a or b and c` flattens to `a or b and c` and evaluates as
//! `(a or b) and c`, while the tree evaluates it as `a or (b and c)`.

use crate::error::FlattenError;
use geoql_ast::{Expr, ExprKind, Span, Trigger};
use tracing::debug;

/// Flatten a trigger's condition in place.
///
/// A trigger that is already flattened is left as is. On error the trigger
/// keeps its tree.
pub fn flatten(trigger: &mut Trigger) -> Result<(), FlattenError> {
    let changed = trigger.flatten_with(flatten_expr)?;
    match trigger.when_flat() {
        Some(items) if changed => debug!(len = items.len(), "flattened condition"),
        _ => debug!("condition already flattened"),
    }
    Ok(())
}

/// Flatten one condition tree into its alternating sequence.
pub fn flatten_expr(expr: &Expr) -> Result<Vec<Expr>, FlattenError> {
    let mut items = Vec::new();
    collect(expr, &mut items);
    if items.len() % 2 == 0 {
        return Err(FlattenError::EvenLength { len: items.len() });
    }
    Ok(items)
}

fn collect(expr: &Expr, items: &mut Vec<Expr>) {
    let expr = expr.unparen();
    match &expr.kind {
        ExprKind::Binary { op, left, right } if op.is_logical() => {
            collect(left, items);
            items.push(Expr::new(
                ExprKind::Operator(*op),
                Span::new(left.span.end, right.span.start),
            ));
            collect(right, items);
        }
        _ => items.push(expr.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoql_ast::{BinaryOp, Selector};
    use indexmap::IndexMap;

    fn leaf(name: &str) -> Expr {
        Expr::binary(
            BinaryOp::Gt,
            Expr::new(ExprKind::Selector(Selector::bare(name)), Span::default()),
            Expr::new(ExprKind::Int(0), Span::default()),
        )
    }

    fn paren(expr: Expr) -> Expr {
        let span = expr.span;
        Expr::new(ExprKind::Paren(Box::new(expr)), span)
    }

    fn ops(items: &[Expr]) -> Vec<Option<BinaryOp>> {
        items
            .iter()
            .map(|item| match item.kind {
                ExprKind::Operator(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_leaf() {
        let items = flatten_expr(&leaf("a")).unwrap();
        assert_eq!(items, vec![leaf("a")]);
    }

    #[test]
    fn test_nested_groups_are_inlined() {
        // (a and (b or c)) or d
        let inner = paren(Expr::binary(BinaryOp::Or, leaf("b"), leaf("c")));
        let left = paren(Expr::binary(BinaryOp::And, leaf("a"), inner));
        let when = Expr::binary(BinaryOp::Or, left, leaf("d"));

        let items = flatten_expr(&when).unwrap();
        assert_eq!(items.len(), 7);
        assert_eq!(
            ops(&items),
            vec![
                None,
                Some(BinaryOp::And),
                None,
                Some(BinaryOp::Or),
                None,
                Some(BinaryOp::Or),
                None
            ]
        );
        assert_eq!(items[6], leaf("d"));
    }

    #[test]
    fn test_parenthesized_leaf_is_unwrapped() {
        let when = Expr::binary(BinaryOp::And, paren(paren(leaf("a"))), leaf("b"));
        let items = flatten_expr(&when).unwrap();
        assert_eq!(items[0], leaf("a"));
    }

    #[test]
    fn test_flatten_trigger_once() {
        let when = Expr::binary(BinaryOp::And, leaf("a"), leaf("b"));
        let mut trigger = Trigger::new(IndexMap::new(), when, None, None, Span::default());
        flatten(&mut trigger).unwrap();
        assert!(trigger.when().is_none());
        assert_eq!(trigger.when_flat().unwrap().len(), 3);

        flatten(&mut trigger).unwrap();
        assert_eq!(trigger.when_flat().unwrap().len(), 3);
    }
}
