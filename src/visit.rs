//! Read-only traversal over expression trees.

use std::fmt::Write as _;

use crate::ast::{
    Argument, BooleanLiteral, Expression, FunctionCall, MemberName, NumberLiteral, StringLiteral,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Borrowed view of any node in an [`Expression`] tree.
pub enum SyntaxNode<'a> {
    Expression(&'a Expression),
    FunctionCall(&'a FunctionCall),
    StringLiteral(&'a StringLiteral),
    NumberLiteral(&'a NumberLiteral),
    BooleanLiteral(&'a BooleanLiteral),
    MemberName(&'a MemberName),
}

impl<'a> SyntaxNode<'a> {
    /// Node kind name, as used in S-expression output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SyntaxNode::Expression(_) => "expression",
            SyntaxNode::FunctionCall(_) => "function",
            SyntaxNode::StringLiteral(_) => "string",
            SyntaxNode::NumberLiteral(_) => "number",
            SyntaxNode::BooleanLiteral(_) => "boolean",
            SyntaxNode::MemberName(_) => "memberName",
        }
    }

    /// Structural children in source order. Leaves have none.
    pub fn children(&self) -> Vec<SyntaxNode<'a>> {
        match *self {
            SyntaxNode::Expression(expr) => {
                let mut out = vec![SyntaxNode::FunctionCall(expr.function())];
                out.extend(expr.members().iter().map(SyntaxNode::MemberName));
                out
            }
            SyntaxNode::FunctionCall(call) => {
                call.arguments().iter().map(SyntaxNode::from).collect()
            }
            _ => Vec::new(),
        }
    }
}

impl<'a> From<&'a Argument> for SyntaxNode<'a> {
    fn from(arg: &'a Argument) -> Self {
        match arg {
            Argument::Function(call) => SyntaxNode::FunctionCall(call),
            Argument::String(s) => SyntaxNode::StringLiteral(s),
            Argument::Number(n) => SyntaxNode::NumberLiteral(n),
            Argument::Boolean(b) => SyntaxNode::BooleanLiteral(b),
        }
    }
}

/// Tree visitor. Every method defaults to walking the node's children.
pub trait Visitor {
    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_function_call(&mut self, call: &FunctionCall) {
        walk_function_call(self, call);
    }

    fn visit_argument(&mut self, arg: &Argument) {
        walk_argument(self, arg);
    }

    fn visit_string(&mut self, _lit: &StringLiteral) {}

    fn visit_number(&mut self, _lit: &NumberLiteral) {}

    fn visit_boolean(&mut self, _lit: &BooleanLiteral) {}

    fn visit_member(&mut self, _member: &MemberName) {}
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expression) {
    visitor.visit_function_call(expr.function());
    for member in expr.members() {
        visitor.visit_member(member);
    }
}

pub fn walk_function_call<V: Visitor + ?Sized>(visitor: &mut V, call: &FunctionCall) {
    for arg in call.arguments() {
        visitor.visit_argument(arg);
    }
}

pub fn walk_argument<V: Visitor + ?Sized>(visitor: &mut V, arg: &Argument) {
    match arg {
        Argument::Function(call) => visitor.visit_function_call(call),
        Argument::String(s) => visitor.visit_string(s),
        Argument::Number(n) => visitor.visit_number(n),
        Argument::Boolean(b) => visitor.visit_boolean(b),
    }
}

/// Renders `(expression (function (functionName "f") ...) (memberName "m"))`.
struct SexpWriter {
    out: String,
}

impl SexpWriter {
    fn leaf(&mut self, kind: &str, text: &str) {
        let _ = write!(self.out, " ({kind} {text:?})");
    }
}

impl Visitor for SexpWriter {
    fn visit_expression(&mut self, expr: &Expression) {
        self.out.push_str("(expression");
        walk_expression(self, expr);
        self.out.push(')');
    }

    fn visit_function_call(&mut self, call: &FunctionCall) {
        self.out.push_str(" (function");
        self.leaf("functionName", call.name());
        walk_function_call(self, call);
        self.out.push(')');
    }

    fn visit_string(&mut self, lit: &StringLiteral) {
        self.leaf("string", lit.raw_text());
    }

    fn visit_number(&mut self, lit: &NumberLiteral) {
        let _ = write!(self.out, " (number {})", lit.raw_text());
    }

    fn visit_boolean(&mut self, lit: &BooleanLiteral) {
        let _ = write!(self.out, " (boolean {})", lit.value());
    }

    fn visit_member(&mut self, member: &MemberName) {
        self.leaf("memberName", member.raw_text());
    }
}

impl Expression {
    /// Structural S-expression view of the tree.
    pub fn to_sexp(&self) -> String {
        let mut writer = SexpWriter { out: String::new() };
        writer.visit_expression(self);
        writer.out
    }
}
