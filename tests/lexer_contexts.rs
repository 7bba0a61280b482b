use dsc_expression::{parse, LexContext, Lexer, TokenKind};

const IDENTIFIERS: &[&str] = &[
    "f",
    "concat",
    "resourceId",
    "base64",
    "my-func",
    "my_func",
    "A1-b_2",
    "truest",
    "falsey",
    "true-ish",
    "false_",
    "t",
    "fals",
    "x-",
];

fn single_token(input: &str, context: LexContext) -> (TokenKind, String) {
    let mut lexer = Lexer::new(input);
    let token = lexer.next_token(context).unwrap();
    let end = lexer.next_token(context).unwrap();
    assert_eq!(end.kind, TokenKind::EndOfInput, "trailing token in {input:?}");
    (token.kind, token.text.to_string())
}

#[test]
fn identifiers_lex_as_one_function_name() {
    for ident in IDENTIFIERS {
        for context in [LexContext::TopLevel, LexContext::InArguments] {
            assert_eq!(
                single_token(ident, context),
                (TokenKind::FunctionName, ident.to_string()),
                "{ident} in {context:?}"
            );
        }
    }
}

#[test]
fn identifiers_parse_as_whole_function_names() {
    for ident in IDENTIFIERS {
        let expr = parse(&format!("[{ident}()]")).unwrap();
        assert_eq!(expr.function().name(), *ident);
    }
}

#[test]
fn bare_keywords_lex_as_booleans_outside_member_position() {
    for context in [LexContext::TopLevel, LexContext::InArguments] {
        assert_eq!(single_token("true", context).0, TokenKind::True);
        assert_eq!(single_token("false", context).0, TokenKind::False);
    }
    assert_eq!(single_token("true", LexContext::AfterDot).0, TokenKind::MemberName);
    assert_eq!(single_token("false", LexContext::AfterDot).0, TokenKind::MemberName);
}

#[test]
fn digit_runs_follow_context_rules() {
    assert_eq!(single_token("42", LexContext::InArguments).0, TokenKind::Number);
    assert_eq!(single_token("42", LexContext::TopLevel).0, TokenKind::Number);
    assert_eq!(
        single_token("42x", LexContext::TopLevel),
        (TokenKind::MemberName, "42x".to_string())
    );
    assert_eq!(
        single_token("4_2-a", LexContext::TopLevel),
        (TokenKind::MemberName, "4_2-a".to_string())
    );
    assert_eq!(
        single_token("42-x", LexContext::AfterDot),
        (TokenKind::MemberName, "42-x".to_string())
    );

    let mut lexer = Lexer::new("42-x");
    let number = lexer.next_token(LexContext::TopLevel).unwrap();
    assert_eq!((number.kind, number.text), (TokenKind::Number, "42"));
    let rest = lexer.next_token(LexContext::TopLevel).unwrap();
    assert_eq!((rest.kind, rest.text), (TokenKind::MemberName, "-x"));
}

#[test]
fn token_spans_are_byte_offsets() {
    let mut lexer = Lexer::new("  'é' ");
    let quote = lexer.next_token(LexContext::InArguments).unwrap();
    assert_eq!((quote.start, quote.end), (2, 3));
    let body = lexer.next_token(LexContext::InString).unwrap();
    assert_eq!((body.kind, body.start, body.end), (TokenKind::StringChars, 3, 5));
    assert_eq!(&lexer.source()[body.start..body.end], "é");
    assert_eq!(lexer.char_offset(body.end), 4);
}
