//! Expression nodes.
//!
//! `ExprKind` is a closed sum type over every expression form. Adding a
//! variant forces the walker, renderer, checker, flattener and evaluator to
//! handle it.

use crate::foundation::{
    BinaryOp, CalendarSet, Date, DistanceUnit, Duration, Geometry, Month, PressureUnit, Quantity,
    Span, SpeedUnit, TemperatureUnit, TimeOfDay, UnitKind, Weekday,
};
use indexmap::IndexSet;
use std::fmt;

/// Expression node with its source span.
///
/// Equality compares structure only; spans are ignored so that a re-parsed
/// rendering compares equal to the original tree.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Kind of a scalar literal. Arrays and ranges are tagged with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Bool,
    Percent,
    Distance,
    Speed,
    Pressure,
    Temperature,
    Duration,
}

impl LiteralKind {
    /// Unit family for quantity kinds, `None` for plain scalars.
    pub fn unit_kind(self) -> Option<UnitKind> {
        match self {
            LiteralKind::Percent => Some(UnitKind::Percent),
            LiteralKind::Distance => Some(UnitKind::Distance),
            LiteralKind::Speed => Some(UnitKind::Speed),
            LiteralKind::Pressure => Some(UnitKind::Pressure),
            LiteralKind::Temperature => Some(UnitKind::Temperature),
            LiteralKind::Duration => Some(UnitKind::Duration),
            LiteralKind::Int | LiteralKind::Float | LiteralKind::String | LiteralKind::Bool => None,
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::String => "string",
            LiteralKind::Bool => "boolean",
            LiteralKind::Percent => "percent",
            LiteralKind::Distance => "distance",
            LiteralKind::Speed => "speed",
            LiteralKind::Pressure => "pressure",
            LiteralKind::Temperature => "temperature",
            LiteralKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Reference to an external data field.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub name: String,
    /// Argument strings, in source order without duplicates.
    pub args: IndexSet<String>,
    /// True when no argument filter applies, or `*` was listed.
    pub wildcard: bool,
    /// Property literals (typically distance radii).
    pub props: Vec<Expr>,
}

impl Selector {
    /// A bare selector: no args, no props, wildcard.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: IndexSet::new(),
            wildcard: true,
            props: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // === Scalar literals ===
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),

    // === Unit literals ===
    Percent(f64),
    Distance(Quantity<DistanceUnit>),
    Speed(Quantity<SpeedUnit>),
    Pressure(Quantity<PressureUnit>),
    /// The only signed quantity.
    Temperature(Quantity<TemperatureUnit>),
    Duration(Duration),

    // === Calendar literals ===
    Date(CalendarSet<Date>),
    Time(CalendarSet<TimeOfDay>),
    Weekday(CalendarSet<Weekday>),
    Month(CalendarSet<Month>),

    // === Composite ===
    /// Homogeneous list; `kind` is fixed by the first element.
    Array {
        kind: LiteralKind,
        elements: Vec<Expr>,
    },
    /// Inclusive range; `low` and `high` have the same literal kind.
    Range {
        low: Box<Expr>,
        high: Box<Expr>,
    },
    Selector(Selector),
    /// `@name`, resolved by name against the trigger's vars.
    VarRef(String),
    Geometry(Geometry),

    // === Structural ===
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Paren(Box<Expr>),
    /// Operator slot of a flattened condition.
    Operator(BinaryOp),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Build a binary node spanning both operands.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = left.span.merge(&right.span);
        Self::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    /// Kind of a scalar or unit literal; `None` for everything else.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        match &self.kind {
            ExprKind::Int(_) => Some(LiteralKind::Int),
            ExprKind::Float(_) => Some(LiteralKind::Float),
            ExprKind::Str(_) => Some(LiteralKind::String),
            ExprKind::Bool(_) => Some(LiteralKind::Bool),
            ExprKind::Percent(_) => Some(LiteralKind::Percent),
            ExprKind::Distance(_) => Some(LiteralKind::Distance),
            ExprKind::Speed(_) => Some(LiteralKind::Speed),
            ExprKind::Pressure(_) => Some(LiteralKind::Pressure),
            ExprKind::Temperature(_) => Some(LiteralKind::Temperature),
            ExprKind::Duration(_) => Some(LiteralKind::Duration),
            _ => None,
        }
    }

    /// Literal values: scalars, units, calendar, arrays, ranges, geometry.
    pub fn is_literal(&self) -> bool {
        self.literal_kind().is_some()
            || matches!(
                self.kind,
                ExprKind::Date(_)
                    | ExprKind::Time(_)
                    | ExprKind::Weekday(_)
                    | ExprKind::Month(_)
                    | ExprKind::Array { .. }
                    | ExprKind::Range { .. }
                    | ExprKind::Geometry(_)
            )
    }

    /// Operator of a binary node.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match &self.kind {
            ExprKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64, start: u32) -> Expr {
        Expr::new(ExprKind::Int(value), Span::new(start, start + 1))
    }

    #[test]
    fn test_equality_ignores_spans() {
        assert_eq!(int(1, 0), int(1, 40));
        assert_ne!(int(1, 0), int(2, 0));
    }

    #[test]
    fn test_binary_span_covers_operands() {
        let expr = Expr::binary(BinaryOp::Add, int(1, 0), int(2, 4));
        assert_eq!(expr.span, Span::new(0, 5));
    }

    #[test]
    fn test_unparen() {
        let inner = int(7, 2);
        let wrapped = Expr::new(
            ExprKind::Paren(Box::new(Expr::new(
                ExprKind::Paren(Box::new(inner.clone())),
                Span::new(1, 4),
            ))),
            Span::new(0, 5),
        );
        assert_eq!(wrapped.unparen(), &inner);
    }

    #[test]
    fn test_literal_kind() {
        let distance = Expr::new(
            ExprKind::Distance(Quantity::new(5.0, DistanceUnit::Kilometers)),
            Span::default(),
        );
        assert_eq!(distance.literal_kind(), Some(LiteralKind::Distance));
        assert_eq!(
            LiteralKind::Distance.unit_kind(),
            Some(UnitKind::Distance)
        );
        let var = Expr::new(ExprKind::VarRef("x".into()), Span::default());
        assert_eq!(var.literal_kind(), None);
        assert!(!var.is_literal());
    }
}
