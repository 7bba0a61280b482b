//! Recursive-descent parser for bracketed expressions.
//!
//! Grammar:
//!
//! ```text
//! expression := '[' function ( '.' MemberName )* ']' END
//! function   := FunctionName '(' ( argument ( ',' argument )* )? ')'
//! argument   := function | string | 'true' | 'false' | Number
//! string     := '\'' StringChars? '\''
//! ```
//!
//! Tokens are pulled one at a time, each under the lex context of the grammar
//! position that needs it, and every decision is made on that single token.

use tracing::{debug, trace};

use crate::ast::{
    Argument, BooleanLiteral, Expression, FunctionCall, MemberName, NumberLiteral, StringLiteral,
};
use crate::error::ParseError;
use crate::options::ParseOptions;

use super::lexer::{LexContext, Lexer, Token, TokenKind};

const FIRST_ARGUMENT: &[TokenKind] = &[
    TokenKind::RParen,
    TokenKind::FunctionName,
    TokenKind::Quote,
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
];
const NEXT_ARGUMENT: &[TokenKind] = &[
    TokenKind::FunctionName,
    TokenKind::Quote,
    TokenKind::Number,
    TokenKind::True,
    TokenKind::False,
];
const AFTER_ARGUMENT: &[TokenKind] = &[TokenKind::Comma, TokenKind::RParen];
const AFTER_FUNCTION: &[TokenKind] = &[TokenKind::Dot, TokenKind::RBracket];
const STRING_BODY: &[TokenKind] = &[TokenKind::StringChars, TokenKind::Quote];

/// Parses a complete expression such as `[f('a', 1).b]` with default options.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parses a complete expression. The first error stops the parse.
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Expression, ParseError> {
    trace!(
        len = source.len(),
        max_depth = options.max_depth,
        "parsing expression"
    );
    let mut parser = Parser {
        lexer: Lexer::new(source),
        depth: 0,
        max_depth: options.max_depth,
    };
    match parser.parse_expression() {
        Ok(expr) => Ok(expr),
        Err(err) => {
            debug!(%err, "expression rejected");
            Err(err)
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.expect(LexContext::TopLevel, TokenKind::LBracket)?;
        let name = self.expect(LexContext::TopLevel, TokenKind::FunctionName)?;
        let function = self.parse_call(name)?;

        let mut members = Vec::new();
        loop {
            let token = self.next(LexContext::TopLevel, AFTER_FUNCTION)?;
            match token.kind {
                TokenKind::Dot => {
                    let member = self.expect(LexContext::AfterDot, TokenKind::MemberName)?;
                    members.push(MemberName::from_source(member.text));
                }
                TokenKind::RBracket => break,
                _ => return Err(self.unexpected(token, AFTER_FUNCTION)),
            }
        }

        self.expect(LexContext::TopLevel, TokenKind::EndOfInput)?;
        Ok(Expression::new(function, members))
    }

    /// Parses `( arguments? )` after an already consumed function name.
    fn parse_call(&mut self, name: Token<'a>) -> Result<FunctionCall, ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                position: self.lexer.char_offset(name.start),
                limit: self.max_depth,
            });
        }

        self.expect(LexContext::TopLevel, TokenKind::LParen)?;

        let mut arguments = Vec::new();
        let mut token = self.next(LexContext::InArguments, FIRST_ARGUMENT)?;
        if token.kind != TokenKind::RParen {
            let mut expected = FIRST_ARGUMENT;
            loop {
                arguments.push(self.parse_argument(token, expected)?);
                let separator = self.next(LexContext::TopLevel, AFTER_ARGUMENT)?;
                match separator.kind {
                    TokenKind::Comma => {
                        expected = NEXT_ARGUMENT;
                        token = self.next(LexContext::InArguments, NEXT_ARGUMENT)?;
                    }
                    TokenKind::RParen => break,
                    _ => return Err(self.unexpected(separator, AFTER_ARGUMENT)),
                }
            }
        }

        self.depth -= 1;
        Ok(FunctionCall::from_source(name.text, arguments))
    }

    fn parse_argument(
        &mut self,
        token: Token<'a>,
        expected: &[TokenKind],
    ) -> Result<Argument, ParseError> {
        match token.kind {
            TokenKind::FunctionName => Ok(Argument::Function(self.parse_call(token)?)),
            TokenKind::Quote => Ok(Argument::String(self.parse_string()?)),
            TokenKind::Number => Ok(Argument::Number(NumberLiteral::from_source(token.text))),
            TokenKind::True => Ok(Argument::Boolean(BooleanLiteral::new(true))),
            TokenKind::False => Ok(Argument::Boolean(BooleanLiteral::new(false))),
            _ => Err(self.unexpected(token, expected)),
        }
    }

    /// Parses the rest of a string literal after its opening quote.
    fn parse_string(&mut self) -> Result<StringLiteral, ParseError> {
        let token = self.next(LexContext::InString, STRING_BODY)?;
        match token.kind {
            TokenKind::Quote => Ok(StringLiteral::from_source("")),
            TokenKind::StringChars => {
                self.expect(LexContext::InString, TokenKind::Quote)?;
                Ok(StringLiteral::from_source(token.text))
            }
            _ => Err(self.unexpected(token, STRING_BODY)),
        }
    }

    /// Pulls the next token. Lexical errors report the parser's expected set.
    fn next(&mut self, context: LexContext, expected: &[TokenKind]) -> Result<Token<'a>, ParseError> {
        self.lexer.next_token(context).map_err(|err| match err {
            ParseError::Lexical {
                position, found, ..
            } => ParseError::Lexical {
                position,
                found,
                expected: expected.to_vec(),
            },
            other => other,
        })
    }

    fn expect(&mut self, context: LexContext, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        let expected = [kind];
        let token = self.next(context, &expected)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(token, &expected))
        }
    }

    fn unexpected(&self, token: Token<'a>, expected: &[TokenKind]) -> ParseError {
        let position = self.lexer.char_offset(token.start);
        if token.kind == TokenKind::EndOfInput {
            ParseError::UnexpectedEndOfInput {
                position,
                expected: expected.to_vec(),
            }
        } else {
            ParseError::UnexpectedToken {
                position,
                found: token.kind,
                text: token.text.to_string(),
                expected: expected.to_vec(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Found, ParseErrorKind};

    #[test]
    fn parses_call_without_arguments_or_members() {
        let expr = parse("[f()]").unwrap();
        assert_eq!(expr.function().name(), "f");
        assert!(expr.function().arguments().is_empty());
        assert!(expr.members().is_empty());
    }

    #[test]
    fn comma_inside_string_is_not_a_separator() {
        let expr = parse("[f('a, b').x.y]").unwrap();
        assert_eq!(
            expr.function().arguments(),
            &[Argument::String(StringLiteral::new("a, b").unwrap())]
        );
        let members: Vec<&str> = expr.members().iter().map(MemberName::raw_text).collect();
        assert_eq!(members, vec!["x", "y"]);
    }

    #[test]
    fn keeps_literal_argument_order() {
        let expr = parse("[f(true, false, 42)]").unwrap();
        assert_eq!(
            expr.function().arguments(),
            &[
                Argument::Boolean(BooleanLiteral::new(true)),
                Argument::Boolean(BooleanLiteral::new(false)),
                Argument::Number(NumberLiteral::new("42").unwrap()),
            ]
        );
    }

    #[test]
    fn empty_leading_argument_is_rejected_at_comma() {
        let err = parse("[f(,)]").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
        assert_eq!(err.position(), 3);
        assert_eq!(err.found(), Found::Token(TokenKind::Comma));
        assert_eq!(err.expected(), FIRST_ARGUMENT);
    }

    #[test]
    fn truncated_call_is_end_of_input() {
        let err = parse("[f(").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedEndOfInput);
        assert_eq!(err.position(), 3);
    }

    #[test]
    fn lexical_error_carries_parser_expectation() {
        let err = parse("[f(1) $]").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Lexical);
        assert_eq!(err.found(), Found::Char('$'));
        assert_eq!(err.expected(), AFTER_FUNCTION);
    }

    #[test]
    fn nesting_limit_is_enforced() {
        let options = ParseOptions::default().with_max_depth(2);
        assert!(parse_with_options("[a(b(1))]", &options).is_ok());

        let err = parse_with_options("[a(b(c(1)))]", &options).unwrap_err();
        assert_eq!(
            err,
            ParseError::NestingTooDeep {
                position: 5,
                limit: 2
            }
        );
    }

    #[test]
    fn sibling_calls_do_not_accumulate_depth() {
        let options = ParseOptions::default().with_max_depth(2);
        assert!(parse_with_options("[a(b(1), c(2), d(3))]", &options).is_ok());
    }
}
