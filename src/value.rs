//! Classification of raw configuration strings into literals and expressions.

use serde::{Deserialize, Serialize};

use crate::ast::Expression;
use crate::error::ParseError;
use crate::expr::parse_with_options;
use crate::options::ParseOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
/// A configuration value after classification.
pub enum ConfigValue {
    /// Plain text, returned as-is (minus the escape bracket for `[[...`).
    Literal(String),
    Expression(Expression),
}

/// Returns `true` when `text` is written as a bracketed expression.
///
/// A leading `[[` escapes the bracket and marks the text as a literal.
pub fn is_expression(text: &str) -> bool {
    text.starts_with('[') && !text.starts_with("[[") && text.ends_with(']')
}

/// Classifies `text` and parses it when it is an expression.
pub fn parse_value(text: &str) -> Result<ConfigValue, ParseError> {
    parse_value_with_options(text, &ParseOptions::default())
}

pub fn parse_value_with_options(
    text: &str,
    options: &ParseOptions,
) -> Result<ConfigValue, ParseError> {
    if let Some(escaped) = text.strip_prefix("[[") {
        return Ok(ConfigValue::Literal(format!("[{escaped}")));
    }
    if is_expression(text) {
        return parse_with_options(text, options).map(ConfigValue::Expression);
    }
    Ok(ConfigValue::Literal(text.to_string()))
}
