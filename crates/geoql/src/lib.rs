// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! GeoQL trigger language front end
//!
//! Parses trigger statements, type checks them against a selector
//! dictionary, flattens their condition trees and evaluates conditions
//! through a caller-supplied leaf comparator.
//!
//! ```
//! use geoql::{Dictionary, SemanticType};
//!
//! let mut trigger = geoql::parse("trigger when speed > 50 and battery < 15%").unwrap();
//! let dictionary: Dictionary = [("speed", SemanticType::Int), ("battery", SemanticType::Float)]
//!     .into_iter()
//!     .collect();
//! geoql::check(&trigger, &dictionary).unwrap();
//! geoql::flatten(&mut trigger).unwrap();
//! let fired = geoql::evaluate(&trigger, |_, _, _| Ok(true)).unwrap();
//! assert!(fired);
//! ```

pub use geoql_ast::*;
pub use geoql_lexer::{Lexeme, Token, Tokenizer};
pub use geoql_parser::{SyntaxError, parse_expr};
pub use geoql_resolve::{
    Class, Dictionary, EvalError, FlattenError, LeafError, SemanticType, TypeError, flatten_expr,
};

use thiserror::Error;
use tracing::debug;

/// Any error produced by the front end.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result type for front end operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse one trigger statement.
pub fn parse(source: &str) -> Result<Trigger> {
    Ok(geoql_parser::parse(source)?)
}

/// Type check a trigger against a selector dictionary.
pub fn check(trigger: &Trigger, dictionary: &Dictionary) -> Result<()> {
    Ok(geoql_resolve::check(trigger, dictionary)?)
}

/// Flatten a trigger's condition in place. No-op when already flattened.
pub fn flatten(trigger: &mut Trigger) -> Result<()> {
    Ok(geoql_resolve::flatten(trigger)?)
}

/// Evaluate a trigger's condition with `leaf` resolving each comparison.
pub fn evaluate<F>(trigger: &Trigger, leaf: F) -> Result<bool>
where
    F: FnMut(&Expr, &Expr, BinaryOp) -> std::result::Result<bool, LeafError>,
{
    Ok(geoql_resolve::evaluate(trigger, leaf)?)
}

/// Parse and check in one step.
pub fn compile(source: &str, dictionary: &Dictionary) -> Result<Trigger> {
    let trigger = parse(source)?;
    check(&trigger, dictionary)?;
    debug!(vars = trigger.vars.len(), "trigger compiled");
    Ok(trigger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert() {
        let err = parse("trigger when").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));

        let err = compile("trigger when 1 + 1 > \"one\"", &Dictionary::new()).unwrap_err();
        assert!(matches!(err, Error::Type(TypeError::Mismatch { .. })));
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = parse("trigger when a >").unwrap_err();
        let Error::Syntax(inner) = &err else {
            panic!("expected syntax error");
        };
        assert_eq!(err.to_string(), inner.to_string());
    }
}
