//! Syntax tree produced by the expression parser.
//!
//! Nodes are built once during a parse and are read-only afterwards. The
//! `Display` impls write the canonical source form, so
//! `parse(&tree.to_string())` yields an equal tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidNode;
use crate::expr::lexer::is_ident_body;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Top-level `[function(...).member...]` construct.
pub struct Expression {
    /// The call directly inside the brackets.
    function: FunctionCall,
    /// Member accesses following the call.
    members: Vec<MemberName>,
}

impl Expression {
    pub fn new(function: FunctionCall, members: Vec<MemberName>) -> Self {
        Self { function, members }
    }

    pub fn function(&self) -> &FunctionCall {
        &self.function
    }

    /// Member accesses in source order; may be empty.
    pub fn members(&self) -> &[MemberName] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FunctionCallRepr")]
/// Function name plus its parenthesized argument list.
pub struct FunctionCall {
    /// Identifier before `(`.
    name: String,
    /// Arguments in source order; may be empty.
    arguments: Vec<Argument>,
}

impl FunctionCall {
    /// Builds a call, rejecting names the lexer would not scan as one
    /// function name.
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Result<Self, InvalidNode> {
        let name = name.into();
        if !is_function_name(&name) {
            return Err(InvalidNode::FunctionName(name));
        }
        Ok(Self { name, arguments })
    }

    pub(crate) fn from_source(name: &str, arguments: Vec<Argument>) -> Self {
        Self {
            name: name.to_string(),
            arguments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }
}

#[derive(Deserialize)]
struct FunctionCallRepr {
    name: String,
    arguments: Vec<Argument>,
}

impl TryFrom<FunctionCallRepr> for FunctionCall {
    type Error = InvalidNode;

    fn try_from(repr: FunctionCallRepr) -> Result<Self, Self::Error> {
        FunctionCall::new(repr.name, repr.arguments)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A single call argument.
pub enum Argument {
    /// Nested call.
    Function(FunctionCall),
    /// `'...'` literal.
    String(StringLiteral),
    /// Digit run.
    Number(NumberLiteral),
    /// `true` or `false`.
    Boolean(BooleanLiteral),
}

/// Serialized shape shared by the leaf nodes that carry source text.
#[derive(Deserialize)]
struct RawText {
    raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawText")]
/// Text between the quotes of a `'...'` literal, delimiters excluded.
pub struct StringLiteral {
    /// Verbatim content, whitespace included.
    raw_text: String,
}

impl StringLiteral {
    pub fn new(raw_text: impl Into<String>) -> Result<Self, InvalidNode> {
        let raw_text = raw_text.into();
        if raw_text.contains('\'') {
            return Err(InvalidNode::StringText(raw_text));
        }
        Ok(Self { raw_text })
    }

    pub(crate) fn from_source(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl TryFrom<RawText> for StringLiteral {
    type Error = InvalidNode;

    fn try_from(raw: RawText) -> Result<Self, Self::Error> {
        StringLiteral::new(raw.raw_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawText")]
/// Verbatim digit run. No numeric conversion happens during parsing.
pub struct NumberLiteral {
    /// ASCII digits, leading zeros kept.
    raw_text: String,
}

impl NumberLiteral {
    pub fn new(raw_text: impl Into<String>) -> Result<Self, InvalidNode> {
        let raw_text = raw_text.into();
        if raw_text.is_empty() || !raw_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidNode::Number(raw_text));
        }
        Ok(Self { raw_text })
    }

    pub(crate) fn from_source(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl TryFrom<RawText> for NumberLiteral {
    type Error = InvalidNode;

    fn try_from(raw: RawText) -> Result<Self, Self::Error> {
        NumberLiteral::new(raw.raw_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    /// `true` or `false` keyword.
    value: bool,
}

impl BooleanLiteral {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawText")]
/// Name following a `.` in the member chain.
pub struct MemberName {
    /// Letters, digits, `-` and `_`; may start with any of them.
    raw_text: String,
}

impl MemberName {
    pub fn new(raw_text: impl Into<String>) -> Result<Self, InvalidNode> {
        let raw_text = raw_text.into();
        if raw_text.is_empty() || !raw_text.chars().all(is_ident_body) {
            return Err(InvalidNode::MemberName(raw_text));
        }
        Ok(Self { raw_text })
    }

    pub(crate) fn from_source(raw_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

impl TryFrom<RawText> for MemberName {
    type Error = InvalidNode;

    fn try_from(raw: RawText) -> Result<Self, Self::Error> {
        MemberName::new(raw.raw_text)
    }
}

/// `true` and `false` lex as keywords at a call position, so they are
/// excluded even though they match the identifier shape.
fn is_function_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_with_letter = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic());
    starts_with_letter && chars.all(is_ident_body) && name != "true" && name != "false"
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.function)?;
        for member in &self.members {
            write!(f, ".{member}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Function(call) => write!(f, "{call}"),
            Argument::String(s) => write!(f, "{s}"),
            Argument::Number(n) => write!(f, "{n}"),
            Argument::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.raw_text)
    }
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
