//! Error definitions for lexing and parsing expressions.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::expr::lexer::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Error returned by [`crate::parse`]. Positions are character offsets.
pub enum ParseError {
    /// The current character matches no rule of the active lex context.
    #[error("lexical error at position {position}: unexpected {found}; expected {}", join_expected(.expected))]
    Lexical {
        position: usize,
        found: Found,
        expected: Vec<TokenKind>,
    },
    /// A token was lexed but the grammar does not allow it here.
    #[error("unexpected {found} at position {position}; expected {}", join_expected(.expected))]
    UnexpectedToken {
        position: usize,
        found: TokenKind,
        /// Source text of the offending token.
        text: String,
        expected: Vec<TokenKind>,
    },
    /// Input ended before the expression was complete.
    #[error("unexpected end of input at position {position}; expected {}", join_expected(.expected))]
    UnexpectedEndOfInput {
        position: usize,
        expected: Vec<TokenKind>,
    },
    /// Function calls nest deeper than [`crate::ParseOptions::max_depth`].
    #[error("function calls nested deeper than {limit} at position {position}")]
    NestingTooDeep { position: usize, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A syntax-tree node built outside the parser whose text could not be
/// written back as parseable source.
pub enum InvalidNode {
    /// Function names are `[A-Za-z][A-Za-z0-9_-]*` and not `true`/`false`.
    #[error("invalid function name {0:?}")]
    FunctionName(String),
    /// String literal text may not contain a quote.
    #[error("string literal text {0:?} contains a quote")]
    StringText(String),
    /// Number literals are one or more ASCII digits.
    #[error("invalid number literal {0:?}")]
    Number(String),
    /// Member names are one or more letters, digits, `-` or `_`.
    #[error("invalid member name {0:?}")]
    MemberName(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Coarse classification of a [`ParseError`].
pub enum ParseErrorKind {
    Lexical,
    UnexpectedToken,
    UnexpectedEndOfInput,
    NestingTooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
/// What the lexer or parser actually saw at the error position.
pub enum Found {
    Token(TokenKind),
    Char(char),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(kind) => write!(f, "{kind}"),
            Found::Char(c) => write!(f, "character {c:?}"),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

impl ParseError {
    /// Character offset into the source where the error was detected.
    pub fn position(&self) -> usize {
        match self {
            ParseError::Lexical { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }

    /// Token kinds that would have been accepted at [`Self::position`].
    pub fn expected(&self) -> &[TokenKind] {
        match self {
            ParseError::Lexical { expected, .. }
            | ParseError::UnexpectedToken { expected, .. }
            | ParseError::UnexpectedEndOfInput { expected, .. } => expected,
            ParseError::NestingTooDeep { .. } => &[],
        }
    }

    pub fn found(&self) -> Found {
        match self {
            ParseError::Lexical { found, .. } => *found,
            ParseError::UnexpectedToken { found, .. } => Found::Token(*found),
            ParseError::UnexpectedEndOfInput { .. } => Found::EndOfInput,
            ParseError::NestingTooDeep { .. } => Found::Token(TokenKind::FunctionName),
        }
    }

    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::Lexical { .. } => ParseErrorKind::Lexical,
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            ParseError::UnexpectedEndOfInput { .. } => ParseErrorKind::UnexpectedEndOfInput,
            ParseError::NestingTooDeep { .. } => ParseErrorKind::NestingTooDeep,
        }
    }

    /// Human-readable description, identical to the `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn join_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {last}", head.join(", "))
        }
    }
}
