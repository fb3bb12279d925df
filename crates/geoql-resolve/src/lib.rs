// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Semantic passes over parsed GeoQL triggers
//!
//! This crate type checks a trigger against a caller-supplied selector
//! dictionary, flattens its condition tree into an alternating
//! leaf/operator sequence, and evaluates either form through a caller
//! supplied leaf comparator.

pub mod check;
pub mod dictionary;
pub mod error;
pub mod eval;
pub mod flatten;

pub use check::{Class, check};
pub use dictionary::{Dictionary, SemanticType};
pub use error::{EvalError, FlattenError, LeafError, TypeError};
pub use eval::evaluate;
pub use flatten::{flatten, flatten_expr};
