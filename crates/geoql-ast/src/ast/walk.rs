//! Expression tree walking.
//!
//! Shared depth-first traversal used by analysis passes and by callers that
//! want to inspect a parsed condition without writing their own recursion.
//!
//! Two entry points:
//!
//! - [`walk`] calls the visitor with `Some(node)` before the node's children
//!   and, unless the visitor returned [`Walk::Skip`], with `None` after the
//!   children are exhausted. Stateful visitors use the `None` call to pop
//!   whatever they pushed on entry.
//! - [`visit`] is the predicate form: return `false` to prune a subtree.
//!
//! # Examples
//!
//! ```rust
//! use geoql_ast::{Expr, ExprKind, visit};
//!
//! fn selectors(expr: &Expr) -> Vec<String> {
//!     let mut names = Vec::new();
//!     visit(expr, |node| {
//!         if let ExprKind::Selector(sel) = &node.kind {
//!             names.push(sel.name.clone());
//!         }
//!         true
//!     });
//!     names
//! }
//! ```

use super::expr::{Expr, ExprKind};

/// Continuation returned by a visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Do not descend; no post-visit call is made for this node.
    Skip,
}

/// Walk `expr` depth-first in pre-order.
///
/// Children are visited left to right: binary operands, the inner node of a
/// parenthesized expression, array elements, range bounds and selector
/// properties. Geometry and calendar literals are leaves.
pub fn walk<V>(expr: &Expr, visitor: &mut V)
where
    V: FnMut(Option<&Expr>) -> Walk,
{
    if visitor(Some(expr)) == Walk::Skip {
        return;
    }

    match &expr.kind {
        ExprKind::Binary { left, right, .. } => {
            walk(left, visitor);
            walk(right, visitor);
        }
        ExprKind::Paren(inner) => walk(inner, visitor),
        ExprKind::Array { elements, .. } => {
            for element in elements {
                walk(element, visitor);
            }
        }
        ExprKind::Range { low, high } => {
            walk(low, visitor);
            walk(high, visitor);
        }
        ExprKind::Selector(selector) => {
            for prop in &selector.props {
                walk(prop, visitor);
            }
        }

        // === Leaves ===
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::Str(_)
        | ExprKind::Bool(_)
        | ExprKind::Percent(_)
        | ExprKind::Distance(_)
        | ExprKind::Speed(_)
        | ExprKind::Pressure(_)
        | ExprKind::Temperature(_)
        | ExprKind::Duration(_)
        | ExprKind::Date(_)
        | ExprKind::Time(_)
        | ExprKind::Weekday(_)
        | ExprKind::Month(_)
        | ExprKind::VarRef(_)
        | ExprKind::Geometry(_)
        | ExprKind::Operator(_) => {}
    }

    visitor(None);
}

/// Inspect every node of `expr` in pre-order. Returning `false` prunes the
/// node's children.
pub fn visit<F>(expr: &Expr, mut pred: F)
where
    F: FnMut(&Expr) -> bool,
{
    walk(expr, &mut |node: Option<&Expr>| match node {
        Some(node) if !pred(node) => Walk::Skip,
        _ => Walk::Continue,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{BinaryOp, Span};

    fn leaf(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::default())
    }

    fn sample() -> Expr {
        // (a > 1) and b in [1, 2]
        let left = leaf(ExprKind::Paren(Box::new(Expr::binary(
            BinaryOp::Gt,
            leaf(ExprKind::VarRef("a".into())),
            leaf(ExprKind::Int(1)),
        ))));
        let right = Expr::binary(
            BinaryOp::In,
            leaf(ExprKind::VarRef("b".into())),
            leaf(ExprKind::Array {
                kind: crate::ast::LiteralKind::Int,
                elements: vec![leaf(ExprKind::Int(1)), leaf(ExprKind::Int(2))],
            }),
        );
        Expr::binary(BinaryOp::And, left, right)
    }

    #[test]
    fn test_walk_pre_order_with_sentinels() {
        let mut events = Vec::new();
        walk(&sample(), &mut |node: Option<&Expr>| {
            events.push(match node {
                Some(expr) => match &expr.kind {
                    ExprKind::Binary { op, .. } => op.to_string(),
                    ExprKind::Paren(_) => "()".to_string(),
                    ExprKind::VarRef(name) => format!("@{}", name),
                    ExprKind::Int(v) => v.to_string(),
                    ExprKind::Array { .. } => "[]".to_string(),
                    _ => "?".to_string(),
                },
                None => "end".to_string(),
            });
            Walk::Continue
        });

        assert_eq!(
            events,
            vec![
                "and", "()", ">", "@a", "end", "1", "end", "end", "end", "in", "@b", "end", "[]",
                "1", "end", "2", "end", "end", "end", "end",
            ]
        );
    }

    #[test]
    fn test_skip_prunes_subtree_and_post_visit() {
        let mut depth = 0i32;
        let mut max_depth = 0i32;
        let mut seen = 0;
        walk(&sample(), &mut |node: Option<&Expr>| match node {
            Some(expr) => {
                seen += 1;
                if matches!(expr.kind, ExprKind::Paren(_)) {
                    return Walk::Skip;
                }
                depth += 1;
                max_depth = max_depth.max(depth);
                Walk::Continue
            }
            None => {
                depth -= 1;
                Walk::Continue
            }
        });

        // and, (), in, @b, [], 1, 2
        assert_eq!(seen, 7);
        assert_eq!(depth, 0);
        assert_eq!(max_depth, 4);
    }

    #[test]
    fn test_visit_counts_and_prunes() {
        let mut ints = 0;
        visit(&sample(), |node| {
            if matches!(node.kind, ExprKind::Int(_)) {
                ints += 1;
            }
            true
        });
        assert_eq!(ints, 3);

        let mut ints = 0;
        visit(&sample(), |node| {
            if matches!(node.kind, ExprKind::Int(_)) {
                ints += 1;
            }
            !matches!(node.kind, ExprKind::Array { .. })
        });
        assert_eq!(ints, 1);
    }
}
