//! Foundation types shared by every phase: spans, units, calendar and
//! geometry values, operators.

pub mod calendar;
pub mod geometry;
pub mod ops;
pub mod span;
pub mod units;

pub use calendar::{CalendarSet, Date, Month, TimeOfDay, Weekday};
pub use geometry::{Coord, Geometry, GeometryKind};
pub use ops::BinaryOp;
pub use span::{LineIndex, Span};
pub use units::{
    DistanceUnit, Duration, PressureUnit, Quantity, SpeedUnit, TemperatureUnit, UnitKind,
};
