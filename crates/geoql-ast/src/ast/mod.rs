//! Syntax tree for GeoQL triggers.

pub mod expr;
pub mod render;
pub mod trigger;
pub mod walk;

pub use expr::{Expr, ExprKind, LiteralKind, Selector};
pub use render::{Render, quote};
pub use trigger::{Condition, Repeat, Trigger};
pub use walk::{Walk, visit, walk};
