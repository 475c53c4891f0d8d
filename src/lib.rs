//! SimpleConfig: a small, indentation-based configuration language.
//!
//! ```text
//! title = "X"
//! SERVER frontend:
//!   ip = "10.0.0.1"
//! SERVER backend:
//!   ip = "10.0.0.2"
//! ```
//!
//! [`parse`] turns text into a [`Document`], [`Builder`] assembles the same
//! tree in code, and [`to_string`] renders either back into canonical text.

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod serializer;

use std::str::FromStr;

pub use ast::{Document, Mapping, Value};
pub use builder::Builder;
pub use config::Config;
pub use error::ConfigError;
pub use serializer::{to_string, to_string_with, Dialect};

/// Parse a whole SimpleConfig document.
///
/// # Examples
/// ```
/// use simple_cfg::{parse, Value};
///
/// let doc = parse("DATABASE:\n  ports = 5432, 5433\n").unwrap();
/// assert_eq!(
///     doc.get("DATABASE.ports"),
///     Some(&Value::List(vec![Value::Integer(5432), Value::Integer(5433)]))
/// );
/// ```
///
/// # Errors
/// Stops at the first line that is neither a comment, a block header nor an
/// assignment, or at a grouping header whose name already holds a scalar.
pub fn parse(input: &str) -> Result<Document, ConfigError> {
    parser::Parser::new(input).parse_document()
}

impl FromStr for Document {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
