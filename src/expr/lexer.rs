//! Context-sensitive scanner for expression source text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Found, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Terminal symbols of the expression grammar.
pub enum TokenKind {
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Identifier starting with a letter.
    FunctionName,
    /// `,`
    Comma,
    /// `'`
    Quote,
    /// Everything between two quotes, whitespace included.
    StringChars,
    /// Run of ASCII digits.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `.`
    Dot,
    /// Identifier-body run after `.`, or one that cannot be a function name.
    MemberName,
    /// End of the source buffer.
    EndOfInput,
}

impl TokenKind {
    /// Short label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::FunctionName => "function name",
            TokenKind::Comma => "','",
            TokenKind::Quote => "quote",
            TokenKind::StringChars => "string characters",
            TokenKind::Number => "number",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Dot => "'.'",
            TokenKind::MemberName => "member name",
            TokenKind::EndOfInput => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A classified slice of the source. `start` and `end` are byte offsets.
pub struct Token<'a> {
    /// Terminal symbol.
    pub kind: TokenKind,
    /// Source slice covered by the token; empty for end of input.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the last character.
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scanner start state, chosen by the parser for each token it pulls.
pub enum LexContext {
    /// Outside any argument list: after `[`, `)`, a member name, or `]`.
    ///
    /// A digit run followed by a letter or `_` is scanned as a member name,
    /// and `-`/`_` may start a member name.
    TopLevel,
    /// Directly after `(` or `,`, where an argument (or `)`) is expected.
    ///
    /// Digit runs are always numbers here.
    InArguments,
    /// Directly after `.`. Every identifier-body run is a member name,
    /// including the spellings `true` and `false`.
    AfterDot,
    /// Between the quotes of a string literal. Whitespace is content.
    InString,
}

/// Pull-based scanner over a complete source buffer.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Current byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Converts a byte offset into this source into a character offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        self.source[..byte].chars().count()
    }

    /// Scans the next token under `context`.
    ///
    /// End of input is itself a token in every context except
    /// [`LexContext::InString`], where it means the string is unterminated.
    pub fn next_token(&mut self, context: LexContext) -> Result<Token<'a>, ParseError> {
        if context == LexContext::InString {
            return self.string_token();
        }

        self.eat_while(is_skippable);
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(self.token(TokenKind::EndOfInput, start));
        };

        if context == LexContext::AfterDot {
            if is_ident_body(c) {
                self.eat_while(is_ident_body);
                return Ok(self.token(TokenKind::MemberName, start));
            }
            return Err(self.unexpected_char(start, c, starters(context)));
        }

        if let Some(kind) = punctuation(c) {
            self.pos += c.len_utf8();
            return Ok(self.token(kind, start));
        }

        if c.is_ascii_alphabetic() {
            self.eat_while(is_ident_body);
            let kind = match &self.source[start..self.pos] {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                _ => TokenKind::FunctionName,
            };
            return Ok(self.token(kind, start));
        }

        if c.is_ascii_digit() {
            self.eat_while(|c| c.is_ascii_digit());
            let continues_identifier = matches!(self.peek(), Some(n) if n.is_ascii_alphabetic() || n == '_');
            if context == LexContext::TopLevel && continues_identifier {
                self.eat_while(is_ident_body);
                return Ok(self.token(TokenKind::MemberName, start));
            }
            return Ok(self.token(TokenKind::Number, start));
        }

        if context == LexContext::TopLevel && (c == '-' || c == '_') {
            self.eat_while(is_ident_body);
            return Ok(self.token(TokenKind::MemberName, start));
        }

        Err(self.unexpected_char(start, c, starters(context)))
    }

    fn string_token(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.pos;
        match self.peek() {
            None => Err(ParseError::Lexical {
                position: self.char_offset(start),
                found: Found::EndOfInput,
                expected: starters(LexContext::InString),
            }),
            Some('\'') => {
                self.pos += 1;
                Ok(self.token(TokenKind::Quote, start))
            }
            Some(_) => {
                self.eat_while(|c| c != '\'');
                Ok(self.token(TokenKind::StringChars, start))
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start..self.pos],
            start,
            end: self.pos,
        }
    }

    fn unexpected_char(&self, start: usize, c: char, expected: Vec<TokenKind>) -> ParseError {
        ParseError::Lexical {
            position: self.char_offset(start),
            found: Found::Char(c),
            expected,
        }
    }
}

/// Letters, digits, `-` and `_`.
pub fn is_ident_body(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_skippable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn punctuation(c: char) -> Option<TokenKind> {
    let kind = match c {
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        ',' => TokenKind::Comma,
        '\'' => TokenKind::Quote,
        '.' => TokenKind::Dot,
        _ => return None,
    };
    Some(kind)
}

const PUNCTUATION: [TokenKind; 7] = [
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::Comma,
    TokenKind::Quote,
    TokenKind::Dot,
];

/// Every kind `next_token` can return under `context`.
fn starters(context: LexContext) -> Vec<TokenKind> {
    let words: &[TokenKind] = match context {
        LexContext::TopLevel => &[
            TokenKind::FunctionName,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Number,
            TokenKind::MemberName,
            TokenKind::EndOfInput,
        ],
        LexContext::InArguments => &[
            TokenKind::FunctionName,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Number,
            TokenKind::EndOfInput,
        ],
        LexContext::AfterDot => return vec![TokenKind::MemberName, TokenKind::EndOfInput],
        LexContext::InString => return vec![TokenKind::StringChars, TokenKind::Quote],
    };
    PUNCTUATION.iter().chain(words).copied().collect()
}
