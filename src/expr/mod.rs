//! Expression language used inside configuration values.

/// Context-sensitive tokenizer for expression source text.
pub mod lexer;
/// Recursive-descent parser producing [`crate::ast::Expression`] trees.
pub mod parser;

pub use parser::{parse, parse_with_options};
