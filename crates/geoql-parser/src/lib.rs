// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for the GeoQL trigger language.

pub mod parser;

pub use parser::{ParseError, ParseErrorKind, SyntaxError, parse, parse_expr};

// Re-export lexer
pub use geoql_lexer::Token;
