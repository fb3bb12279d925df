//! Static type checking.
//!
//! Operands are classified into candidate [`Class`] lists and each binary
//! node is resolved against the operator rule table, children before
//! parents. Names resolve as follows:
//!
//! - literals classify by their kind
//! - `@name` resolves one level through the trigger's vars
//! - selectors resolve through the caller's [`Dictionary`]
//!
//! The condition root must be boolean. A flattened trigger is checked leaf
//! by leaf.
//!
//! Beyond its class, every operand of `and`/`or` must be a comparison, the
//! only leaf the evaluator can hand to its comparator. A `true`/`false`
//! literal is also accepted in the tree form. A bare boolean selector such
//! as `moving` is rejected here; write `moving == true`.

pub mod class;
pub mod rules;

pub use class::{CalendarKind, Class};
pub use rules::resolve as resolve_operator;

use crate::dictionary::Dictionary;
use crate::error::TypeError;
use geoql_ast::{Condition, Expr, ExprKind, Render, Trigger};
use tracing::debug;

/// Check a trigger's condition against `dictionary`.
pub fn check(trigger: &Trigger, dictionary: &Dictionary) -> Result<(), TypeError> {
    debug!(
        vars = trigger.vars.len(),
        selectors = dictionary.len(),
        flattened = trigger.is_flattened(),
        "checking trigger"
    );
    let checker = Checker {
        trigger,
        dictionary,
    };

    match trigger.condition() {
        Condition::Tree(when) => {
            checker.require_boolean(when)?;
            require_comparisons(when)?;
        }
        Condition::Flat(items) => {
            for item in items {
                if matches!(item.kind, ExprKind::Operator(_)) {
                    continue;
                }
                checker.require_boolean(item)?;
                if !is_comparison(item) {
                    return Err(not_comparison(item));
                }
            }
        }
    }

    debug!("trigger checked");
    Ok(())
}

struct Checker<'a> {
    trigger: &'a Trigger,
    dictionary: &'a Dictionary,
}

impl Checker<'_> {
    fn require_boolean(&self, expr: &Expr) -> Result<(), TypeError> {
        let classes = self.classify(expr)?;
        if classes.contains(&Class::Boolean) {
            return Ok(());
        }
        Err(TypeError::NotBoolean {
            rendered: expr.render("", true),
            found: describe(&classes),
            span: expr.span,
        })
    }

    /// Candidate classes of an operand, most specific first.
    fn classify(&self, expr: &Expr) -> Result<Vec<Class>, TypeError> {
        let class = match &expr.kind {
            ExprKind::Paren(inner) => return self.classify(inner),
            ExprKind::Binary { op, left, right } => {
                let left_classes = self.classify(left)?;
                let right_classes = self.classify(right)?;
                rules::resolve(*op, &left_classes, &right_classes).ok_or_else(|| {
                    TypeError::Mismatch {
                        op: *op,
                        left: left.render("", true),
                        right: right.render("", true),
                        left_class: describe(&left_classes),
                        right_class: describe(&right_classes),
                        span: expr.span,
                    }
                })?
            }
            ExprKind::Selector(selector) => self
                .dictionary
                .get(&selector.name)
                .map(Class::from)
                .ok_or_else(|| TypeError::UndeclaredSelector {
                    name: selector.name.clone(),
                    span: expr.span,
                })?,
            ExprKind::VarRef(name) => return self.classify_var(name, expr),
            ExprKind::Array { kind, .. } => Class::array_of(*kind),
            ExprKind::Range { low, .. } => match low.literal_kind().and_then(Class::range_of) {
                Some(class) => class,
                None => return Err(self.unclassifiable(expr)),
            },
            ExprKind::Geometry(_) => Class::Geometry,
            ExprKind::Date(_) | ExprKind::Time(_) | ExprKind::Weekday(_) | ExprKind::Month(_) => {
                match Class::of_calendar(&expr.kind) {
                    Some(class) => class,
                    None => return Err(self.unclassifiable(expr)),
                }
            }
            ExprKind::Operator(_) => return Err(self.unclassifiable(expr)),
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::Str(_)
            | ExprKind::Bool(_)
            | ExprKind::Percent(_)
            | ExprKind::Distance(_)
            | ExprKind::Speed(_)
            | ExprKind::Pressure(_)
            | ExprKind::Temperature(_)
            | ExprKind::Duration(_) => match expr.literal_kind() {
                Some(kind) => Class::of_literal(kind),
                None => return Err(self.unclassifiable(expr)),
            },
        };
        Ok(class.candidates())
    }

    /// Resolve `@name` through the vars. Var values are literals, so this
    /// never chains.
    fn classify_var(&self, name: &str, expr: &Expr) -> Result<Vec<Class>, TypeError> {
        let value = self
            .trigger
            .var(name)
            .ok_or_else(|| TypeError::UnresolvedVariable {
                name: name.to_string(),
                span: expr.span,
            })?;
        if matches!(value.kind, ExprKind::VarRef(_)) {
            return Err(TypeError::UnresolvedVariable {
                name: name.to_string(),
                span: expr.span,
            });
        }
        self.classify(value)
    }

    /// An operator marker or malformed node where an operand was expected.
    fn unclassifiable(&self, expr: &Expr) -> TypeError {
        TypeError::NotBoolean {
            rendered: expr.render("", true),
            found: "no operand class".to_string(),
            span: expr.span,
        }
    }
}

/// Walk the logical skeleton of a tree condition down to its leaves.
fn require_comparisons(expr: &Expr) -> Result<(), TypeError> {
    let expr = expr.unparen();
    match &expr.kind {
        ExprKind::Binary { op, left, right } if op.is_logical() => {
            require_comparisons(left)?;
            require_comparisons(right)
        }
        ExprKind::Bool(_) => Ok(()),
        _ if is_comparison(expr) => Ok(()),
        _ => Err(not_comparison(expr)),
    }
}

fn is_comparison(expr: &Expr) -> bool {
    expr.unparen().binary_op().is_some_and(|op| !op.is_logical())
}

fn not_comparison(expr: &Expr) -> TypeError {
    TypeError::NotComparison {
        rendered: expr.render("", true),
        span: expr.span,
    }
}

fn describe(classes: &[Class]) -> String {
    classes
        .first()
        .map_or_else(|| "nothing".to_string(), Class::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::SemanticType;
    use geoql_ast::{BinaryOp, Selector, Span};
    use indexmap::IndexMap;

    fn node(kind: ExprKind) -> Expr {
        Expr::new(kind, Span::default())
    }

    fn int(value: i64) -> Expr {
        node(ExprKind::Int(value))
    }

    fn selector(name: &str) -> Expr {
        node(ExprKind::Selector(Selector::bare(name)))
    }

    fn trigger(when: Expr) -> Trigger {
        Trigger::new(IndexMap::new(), when, None, None, Span::default())
    }

    #[test]
    fn test_literal_arithmetic_comparison() {
        let sum = Expr::binary(BinaryOp::Add, int(1), int(1));
        let ok = Expr::binary(BinaryOp::Gt, sum.clone(), int(400));
        assert!(check(&trigger(ok), &Dictionary::new()).is_ok());

        let bad = Expr::binary(BinaryOp::Gt, sum, node(ExprKind::Str("one".into())));
        match check(&trigger(bad), &Dictionary::new()).unwrap_err() {
            TypeError::Mismatch {
                op, left, right, ..
            } => {
                assert_eq!(op, BinaryOp::Gt);
                assert_eq!(left, "1 + 1");
                assert_eq!(right, "\"one\"");
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_undeclared_selector() {
        let when = Expr::binary(BinaryOp::Gt, selector("speed"), int(1));
        let err = check(&trigger(when), &Dictionary::new()).unwrap_err();
        assert!(matches!(err, TypeError::UndeclaredSelector { ref name, .. } if name == "speed"));
    }

    #[test]
    fn test_root_must_be_boolean() {
        let when = Expr::binary(BinaryOp::Add, int(1), int(2));
        let err = check(&trigger(when), &Dictionary::new()).unwrap_err();
        assert!(matches!(err, TypeError::NotBoolean { ref found, .. } if found == "int"));
    }

    #[test]
    fn test_var_ref_resolves_one_level() {
        let mut vars = IndexMap::new();
        vars.insert("limit".to_string(), int(10));
        let when = Expr::binary(
            BinaryOp::Lt,
            selector("count"),
            node(ExprKind::VarRef("limit".into())),
        );
        let trigger = Trigger::new(vars, when, None, None, Span::default());
        let dictionary: Dictionary = [("count", SemanticType::Int)].into_iter().collect();
        assert!(check(&trigger, &dictionary).is_ok());

        let missing = Expr::binary(
            BinaryOp::Lt,
            selector("count"),
            node(ExprKind::VarRef("nope".into())),
        );
        let err = check(&self::trigger(missing), &dictionary).unwrap_err();
        assert!(matches!(err, TypeError::UnresolvedVariable { .. }));
    }

    #[test]
    fn test_flat_condition_checks_each_leaf() {
        let dictionary: Dictionary = [("a", SemanticType::Int)].into_iter().collect();
        let leaf = Expr::binary(BinaryOp::Gt, selector("a"), int(1));
        let mut flat = trigger(Expr::binary(BinaryOp::Or, leaf.clone(), leaf));
        flat.flatten_with(|when| -> Result<Vec<Expr>, ()> {
            let ExprKind::Binary { left, right, .. } = &when.kind else {
                return Err(());
            };
            Ok(vec![
                (**left).clone(),
                node(ExprKind::Operator(BinaryOp::Or)),
                (**right).clone(),
            ])
        })
        .unwrap();
        assert!(check(&flat, &dictionary).is_ok());
    }

    #[test]
    fn test_logical_operands_must_be_comparisons() {
        let dictionary: Dictionary = [("moving", SemanticType::Boolean), ("a", SemanticType::Int)]
            .into_iter()
            .collect();
        let leaf = Expr::binary(BinaryOp::Gt, selector("a"), int(1));

        let literal = Expr::binary(BinaryOp::And, node(ExprKind::Bool(true)), leaf.clone());
        assert!(check(&trigger(literal), &dictionary).is_ok());

        let bare = Expr::binary(BinaryOp::Or, leaf, selector("moving"));
        let err = check(&trigger(bare), &dictionary).unwrap_err();
        assert!(matches!(err, TypeError::NotComparison { ref rendered, .. } if rendered == "moving"));
    }
}
