//! Errors raised by the semantic passes.
//!
//! - [`TypeError`]: the checker rejected an operand pairing or a name
//! - [`FlattenError`]: the flattened sequence broke its shape invariant
//! - [`EvalError`]: the evaluator met a structurally invalid condition, or
//!   the caller's leaf comparator failed

use geoql_ast::{BinaryOp, Span};
use thiserror::Error;

/// Error type returned by a caller-supplied leaf comparator.
pub type LeafError = Box<dyn std::error::Error + Send + Sync>;

/// Type checking failure. The first failure aborts the check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    /// No rule accepts the operand classes for this operator.
    #[error("type mismatch: '{op}' cannot combine {left} ({left_class}) with {right} ({right_class})")]
    Mismatch {
        op: BinaryOp,
        /// Rendered left operand.
        left: String,
        /// Rendered right operand.
        right: String,
        left_class: String,
        right_class: String,
        span: Span,
    },

    #[error("selector '{name}' is not declared in the dictionary")]
    UndeclaredSelector { name: String, span: Span },

    #[error("variable '@{name}' is not declared")]
    UnresolvedVariable { name: String, span: Span },

    /// The condition root (or a flattened leaf) is not boolean.
    #[error("condition {rendered} must be boolean, found {found}")]
    NotBoolean {
        rendered: String,
        found: String,
        span: Span,
    },

    /// A logical operand with no comparison for the evaluator to run, such
    /// as a bare boolean selector.
    #[error("condition {rendered} is not a comparison")]
    NotComparison { rendered: String, span: Span },
}

impl TypeError {
    /// Source span of the offending expression.
    pub fn span(&self) -> Span {
        match self {
            TypeError::Mismatch { span, .. }
            | TypeError::UndeclaredSelector { span, .. }
            | TypeError::UnresolvedVariable { span, .. }
            | TypeError::NotBoolean { span, .. }
            | TypeError::NotComparison { span, .. } => *span,
        }
    }
}

/// Flattening failure. Always an internal invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    #[error("flattened condition has even length {len}")]
    EvenLength { len: usize },
}

/// Evaluation failure.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Wrong node kind in a leaf or operator position, or a logical operand
    /// that does not reduce to a boolean.
    #[error("illegal expression: {message}")]
    IllegalExpression { message: String, span: Span },

    #[error("variable '@{name}' is not declared")]
    UnresolvedVariable { name: String, span: Span },

    /// Raised by the leaf comparator.
    #[error("leaf evaluation failed: {0}")]
    Leaf(LeafError),
}

impl EvalError {
    pub(crate) fn illegal(message: impl Into<String>, span: Span) -> Self {
        EvalError::IllegalExpression {
            message: message.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message() {
        let err = TypeError::Mismatch {
            op: BinaryOp::Gt,
            left: "1 + 1".into(),
            right: "\"one\"".into(),
            left_class: "int".into(),
            right_class: "string".into(),
            span: Span::new(13, 24),
        };
        assert_eq!(
            err.to_string(),
            "type mismatch: '>' cannot combine 1 + 1 (int) with \"one\" (string)"
        );
        assert_eq!(err.span(), Span::new(13, 24));
    }

    #[test]
    fn test_leaf_error_is_wrapped() {
        let err = EvalError::Leaf("no value for speed".into());
        assert_eq!(err.to_string(), "leaf evaluation failed: no value for speed");
    }
}
