//! Condition evaluation through a caller-supplied leaf comparator.
//!
//! The evaluator never looks at selector values. Every non-logical binary
//! node is handed to the comparator as `(left, right, op)` and the
//! comparator's answers are combined with `and`/`or`. Both operands of a
//! logical operator are always evaluated, so the comparator sees every leaf
//! on every call.
//!
//! Tree and flattened conditions go through the same leaf handling and
//! reject malformed input with the same [`EvalError::IllegalExpression`].
//! A `true`/`false` literal is accepted as an operand of a logical node in
//! the tree form only. Every leaf slot of a flattened condition must hold a
//! comparison.

use crate::error::{EvalError, LeafError};
use geoql_ast::{BinaryOp, Condition, Expr, ExprKind, Render, Trigger};
use tracing::{debug, trace};

/// Evaluate a trigger's condition, in whichever form it currently holds.
///
/// Leaf operands arrive with parentheses stripped and `@name` references
/// replaced by the declared value.
pub fn evaluate<F>(trigger: &Trigger, leaf: F) -> Result<bool, EvalError>
where
    F: FnMut(&Expr, &Expr, BinaryOp) -> Result<bool, LeafError>,
{
    debug!(flattened = trigger.is_flattened(), "evaluating trigger");
    let mut evaluator = Evaluator { trigger, leaf };
    let result = match trigger.condition() {
        Condition::Tree(when) => evaluator.tree(when),
        Condition::Flat(items) => evaluator.flat(items),
    }?;
    debug!(result, "trigger evaluated");
    Ok(result)
}

struct Evaluator<'a, F> {
    trigger: &'a Trigger,
    leaf: F,
}

impl<'a, F> Evaluator<'a, F>
where
    F: FnMut(&Expr, &Expr, BinaryOp) -> Result<bool, LeafError>,
{
    fn tree(&mut self, expr: &'a Expr) -> Result<bool, EvalError> {
        let expr = expr.unparen();
        match &expr.kind {
            ExprKind::Binary { op, left, right } if op.is_logical() => {
                let left = self.tree(left)?;
                let right = self.tree(right)?;
                Ok(combine(*op, left, right))
            }
            ExprKind::Bool(value) => Ok(*value),
            _ => self.leaf(expr),
        }
    }

    fn flat(&mut self, items: &'a [Expr]) -> Result<bool, EvalError> {
        let Some((first, rest)) = items.split_first() else {
            return Err(EvalError::illegal(
                "flattened condition is empty",
                self.trigger.span,
            ));
        };
        if rest.len() % 2 != 0 {
            return Err(EvalError::illegal(
                format!("flattened condition has even length {}", items.len()),
                self.trigger.span,
            ));
        }

        let mut result = self.leaf(first.unparen())?;
        for pair in rest.chunks_exact(2) {
            let [marker, item] = pair else {
                return Err(EvalError::illegal(
                    "truncated flattened condition",
                    self.trigger.span,
                ));
            };
            let op = match marker.kind {
                ExprKind::Operator(op) if op.is_logical() => op,
                _ => {
                    return Err(EvalError::illegal(
                        format!(
                            "expected 'and' or 'or' between conditions, found {}",
                            marker.render("", true)
                        ),
                        marker.span,
                    ));
                }
            };
            let value = self.leaf(item.unparen())?;
            result = combine(op, result, value);
        }
        Ok(result)
    }

    /// Evaluate one leaf condition.
    fn leaf(&mut self, expr: &'a Expr) -> Result<bool, EvalError> {
        match &expr.kind {
            ExprKind::Binary { op, left, right } if !op.is_logical() => {
                let left = self.operand(left)?;
                let right = self.operand(right)?;
                let result = (self.leaf)(left, right, *op).map_err(EvalError::Leaf)?;
                trace!(%op, result, "leaf evaluated");
                Ok(result)
            }
            ExprKind::Binary { op, .. } => Err(EvalError::illegal(
                format!("'{}' in a leaf position of a flattened condition", op),
                expr.span,
            )),
            ExprKind::Operator(op) => Err(EvalError::illegal(
                format!("operator '{}' where a condition was expected", op),
                expr.span,
            )),
            _ => Err(EvalError::illegal(
                format!("{} does not reduce to a boolean", expr.render("", true)),
                expr.span,
            )),
        }
    }

    /// Strip parentheses and dereference `@name`.
    fn operand(&self, expr: &'a Expr) -> Result<&'a Expr, EvalError> {
        let expr = expr.unparen();
        match &expr.kind {
            ExprKind::VarRef(name) => {
                self.trigger
                    .var(name)
                    .ok_or_else(|| EvalError::UnresolvedVariable {
                        name: name.clone(),
                        span: expr.span,
                    })
            }
            _ => Ok(expr),
        }
    }
}

fn combine(op: BinaryOp, left: bool, right: bool) -> bool {
    match op {
        BinaryOp::Or => left | right,
        _ => left & right,
    }
}
