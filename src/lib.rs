//! Lexer and parser for bracketed configuration expressions.
//!
//! An expression is a function call wrapped in square brackets, optionally
//! followed by member accesses: `[resourceId('Type', 'name').properties.id]`.
//! [`parse`] turns source text into an [`Expression`] tree or a [`ParseError`]
//! describing the first problem found.

pub mod ast;
pub mod error;
pub mod expr;
pub mod options;
pub mod value;
pub mod visit;

pub use ast::{
    Argument, BooleanLiteral, Expression, FunctionCall, MemberName, NumberLiteral, StringLiteral,
};
pub use error::{Found, InvalidNode, ParseError, ParseErrorKind};
pub use expr::lexer::{LexContext, Lexer, Token, TokenKind};
pub use expr::{parse, parse_with_options};
pub use options::ParseOptions;
pub use value::{is_expression, parse_value, parse_value_with_options, ConfigValue};
pub use visit::{SyntaxNode, Visitor};
