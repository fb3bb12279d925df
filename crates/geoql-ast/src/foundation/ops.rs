//! Binary operators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator of a `Binary` expression or an operator marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Containment
    In,
    NotIn,
    // Geometry predicates
    Nearby,
    NotNearby,
    Intersects,
    NotIntersects,
    // Logic
    And,
    Or,
}

impl BinaryOp {
    /// `and`/`or`.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_containment(self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::NotIn)
    }

    pub fn is_geometry_predicate(self) -> bool {
        matches!(
            self,
            BinaryOp::Nearby | BinaryOp::NotNearby | BinaryOp::Intersects | BinaryOp::NotIntersects
        )
    }

    /// Operators that may head a leaf condition: comparison, containment and
    /// geometry predicates.
    pub fn is_relational(self) -> bool {
        self.is_comparison() || self.is_containment() || self.is_geometry_predicate()
    }

    /// Source spelling used when rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Nearby => "nearby",
            BinaryOp::NotNearby => "not nearby",
            BinaryOp::Intersects => "intersects",
            BinaryOp::NotIntersects => "not intersects",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
