//! The trigger statement.

use super::expr::Expr;
use crate::foundation::Span;
use indexmap::IndexMap;

/// Boolean condition of a trigger.
///
/// A freshly parsed trigger holds a `Tree`. Flattening replaces it with the
/// alternating `leaf, op, leaf, ...` sequence in one step; there is no way back.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Tree(Expr),
    Flat(Vec<Expr>),
}

/// `repeat <count> [every <interval>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
    /// Integer literal.
    pub count: Expr,
    /// Duration literal.
    pub every: Option<Expr>,
}

/// A parsed trigger statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// Declared variables in source order.
    pub vars: IndexMap<String, Expr>,
    condition: Condition,
    pub repeat: Option<Repeat>,
    /// Duration literal of `reset after`.
    pub reset_after: Option<Expr>,
    pub span: Span,
}

impl Trigger {
    pub fn new(
        vars: IndexMap<String, Expr>,
        when: Expr,
        repeat: Option<Repeat>,
        reset_after: Option<Expr>,
        span: Span,
    ) -> Self {
        Self {
            vars,
            condition: Condition::Tree(when),
            repeat,
            reset_after,
            span,
        }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Condition tree, `None` once flattened.
    pub fn when(&self) -> Option<&Expr> {
        match &self.condition {
            Condition::Tree(expr) => Some(expr),
            Condition::Flat(_) => None,
        }
    }

    /// Flattened condition, `None` until flattened.
    pub fn when_flat(&self) -> Option<&[Expr]> {
        match &self.condition {
            Condition::Tree(_) => None,
            Condition::Flat(items) => Some(items),
        }
    }

    pub fn is_flattened(&self) -> bool {
        matches!(self.condition, Condition::Flat(_))
    }

    /// Replace the condition tree with the sequence produced by `f`.
    ///
    /// The trigger is left untouched when `f` fails. Returns `Ok(false)`
    /// without calling `f` when the trigger is already flattened.
    pub fn flatten_with<E, F>(&mut self, f: F) -> Result<bool, E>
    where
        F: FnOnce(&Expr) -> Result<Vec<Expr>, E>,
    {
        let Condition::Tree(tree) = &self.condition else {
            return Ok(false);
        };
        let flat = f(tree)?;
        self.condition = Condition::Flat(flat);
        Ok(true)
    }

    /// Look up a declared variable.
    pub fn var(&self, name: &str) -> Option<&Expr> {
        self.vars.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::foundation::BinaryOp;

    fn int(value: i64) -> Expr {
        Expr::new(ExprKind::Int(value), Span::default())
    }

    fn trigger() -> Trigger {
        let when = Expr::binary(BinaryOp::Gt, int(2), int(1));
        Trigger::new(IndexMap::new(), when, None, None, Span::default())
    }

    #[test]
    fn test_fresh_trigger_is_tree() {
        let t = trigger();
        assert!(t.when().is_some());
        assert!(t.when_flat().is_none());
        assert!(!t.is_flattened());
    }

    #[test]
    fn test_flatten_with_transitions_once() {
        let mut t = trigger();
        let changed = t
            .flatten_with(|tree| Ok::<_, ()>(vec![tree.clone()]))
            .unwrap();
        assert!(changed);
        assert!(t.when().is_none());
        assert_eq!(t.when_flat().map(<[Expr]>::len), Some(1));

        let changed = t
            .flatten_with(|_| -> Result<Vec<Expr>, ()> { panic!("not called") })
            .unwrap();
        assert!(!changed);
    }

    #[test]
    fn test_failed_flatten_leaves_tree() {
        let mut t = trigger();
        let before = t.clone();
        assert_eq!(t.flatten_with(|_| Err("boom")), Err("boom"));
        assert_eq!(t, before);
    }
}
