//! Operand classes.
//!
//! A class is the abstract type the rule table reasons about. An operand
//! may have several candidate classes, tried in order: an int literal is
//! `[int, float]` so that int-op-float finds the float rule when no int rule
//! accepts the right side.

use crate::dictionary::SemanticType;
use geoql_ast::{ExprKind, LiteralKind, UnitKind};
use std::fmt;

/// Calendar literal family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKind {
    Date,
    Time,
    Weekday,
    Month,
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarKind::Date => "date",
            CalendarKind::Time => "time",
            CalendarKind::Weekday => "weekday",
            CalendarKind::Month => "month",
        };
        f.write_str(name)
    }
}

/// Abstract operand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Int,
    Float,
    String,
    Boolean,
    Quantity(UnitKind),
    ArrayInt,
    ArrayFloat,
    ArrayString,
    ArrayBoolean,
    ArrayQuantity(UnitKind),
    RangeInt,
    RangeFloat,
    RangeString,
    RangeQuantity(UnitKind),
    Calendar(CalendarKind),
    Geometry,
}

impl Class {
    /// Unit family carried by quantity classes.
    pub fn unit(self) -> Option<UnitKind> {
        match self {
            Class::Quantity(unit) | Class::ArrayQuantity(unit) | Class::RangeQuantity(unit) => {
                Some(unit)
            }
            _ => None,
        }
    }

    /// Candidate classes in resolution order, with implicit widening.
    pub fn candidates(self) -> Vec<Class> {
        match self {
            Class::Int => vec![Class::Int, Class::Float],
            Class::ArrayInt => vec![Class::ArrayInt, Class::ArrayFloat],
            Class::RangeInt => vec![Class::RangeInt, Class::RangeFloat],
            other => vec![other],
        }
    }

    /// Class of a scalar literal kind.
    pub fn of_literal(kind: LiteralKind) -> Class {
        match kind.unit_kind() {
            Some(unit) => Class::Quantity(unit),
            None => match kind {
                LiteralKind::Int => Class::Int,
                LiteralKind::Float => Class::Float,
                LiteralKind::String => Class::String,
                _ => Class::Boolean,
            },
        }
    }

    /// Class of an array whose elements have `kind`.
    pub fn array_of(kind: LiteralKind) -> Class {
        match Class::of_literal(kind) {
            Class::Int => Class::ArrayInt,
            Class::Float => Class::ArrayFloat,
            Class::String => Class::ArrayString,
            Class::Quantity(unit) => Class::ArrayQuantity(unit),
            _ => Class::ArrayBoolean,
        }
    }

    /// Class of a range whose bounds have `kind`. Boolean ranges have no class.
    pub fn range_of(kind: LiteralKind) -> Option<Class> {
        match Class::of_literal(kind) {
            Class::Int => Some(Class::RangeInt),
            Class::Float => Some(Class::RangeFloat),
            Class::String => Some(Class::RangeString),
            Class::Quantity(unit) => Some(Class::RangeQuantity(unit)),
            _ => None,
        }
    }

    /// Class of a calendar literal node.
    pub fn of_calendar(kind: &ExprKind) -> Option<Class> {
        let calendar = match kind {
            ExprKind::Date(_) => CalendarKind::Date,
            ExprKind::Time(_) => CalendarKind::Time,
            ExprKind::Weekday(_) => CalendarKind::Weekday,
            ExprKind::Month(_) => CalendarKind::Month,
            _ => return None,
        };
        Some(Class::Calendar(calendar))
    }
}

impl From<SemanticType> for Class {
    fn from(ty: SemanticType) -> Self {
        match ty {
            SemanticType::Int => Class::Int,
            SemanticType::Float => Class::Float,
            SemanticType::String => Class::String,
            SemanticType::Boolean => Class::Boolean,
            SemanticType::ArrayInt => Class::ArrayInt,
            SemanticType::ArrayFloat => Class::ArrayFloat,
            SemanticType::ArrayString => Class::ArrayString,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Int => f.write_str("int"),
            Class::Float => f.write_str("float"),
            Class::String => f.write_str("string"),
            Class::Boolean => f.write_str("boolean"),
            Class::Quantity(unit) => write!(f, "{}", unit),
            Class::ArrayInt => f.write_str("int array"),
            Class::ArrayFloat => f.write_str("float array"),
            Class::ArrayString => f.write_str("string array"),
            Class::ArrayBoolean => f.write_str("boolean array"),
            Class::ArrayQuantity(unit) => write!(f, "{} array", unit),
            Class::RangeInt => f.write_str("int range"),
            Class::RangeFloat => f.write_str("float range"),
            Class::RangeString => f.write_str("string range"),
            Class::RangeQuantity(unit) => write!(f, "{} range", unit),
            Class::Calendar(kind) => write!(f, "{}", kind),
            Class::Geometry => f.write_str("geometry"),
        }
    }
}
