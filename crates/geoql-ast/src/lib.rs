// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the GeoQL trigger language
//!
//! This crate contains the expression and trigger node definitions, the
//! literal value types (units, calendar, geometry) and source spans shared by
//! the tokenizer, parser and resolver.

pub mod ast;
pub mod foundation;

// Re-export commonly used types
pub use foundation::{
    BinaryOp, CalendarSet, Coord, Date, DistanceUnit, Duration, Geometry, GeometryKind, LineIndex,
    Month, PressureUnit, Quantity, Span, SpeedUnit, TemperatureUnit, TimeOfDay, UnitKind, Weekday,
};

pub use ast::*;
