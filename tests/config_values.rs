use dsc_expression::{
    is_expression, parse_value, parse_value_with_options, ConfigValue, ParseErrorKind,
    ParseOptions,
};
use serde_json::json;

#[test]
fn classifies_plain_and_escaped_text() {
    assert!(!is_expression("plain"));
    assert!(!is_expression("[[escaped]"));
    assert!(!is_expression("[open"));
    assert!(is_expression("[f()]"));

    assert_eq!(
        parse_value("[[concat('a')]").unwrap(),
        ConfigValue::Literal("[concat('a')]".to_string())
    );
    assert_eq!(
        parse_value("C:\\path [1]").unwrap(),
        ConfigValue::Literal("C:\\path [1]".to_string())
    );
}

#[test]
fn expressions_are_parsed() {
    let value = parse_value("[parameters('name').value]").unwrap();
    let ConfigValue::Expression(expr) = value else {
        panic!("expected an expression");
    };
    assert_eq!(expr.function().name(), "parameters");
    assert_eq!(expr.members()[0].raw_text(), "value");
}

#[test]
fn broken_expressions_report_errors() {
    let err = parse_value("[f(]").unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::UnexpectedToken);
}

#[test]
fn options_apply_to_value_parsing() {
    let options = ParseOptions::default().with_max_depth(1);
    let err = parse_value_with_options("[f(g())]", &options).unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::NestingTooDeep);
    assert!(parse_value_with_options("[f(1)]", &options).is_ok());
}

#[test]
fn serializes_with_type_tag() {
    let value = parse_value("hello").unwrap();
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"type": "literal", "value": "hello"})
    );

    let value = parse_value("[f(1)]").unwrap();
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({
            "type": "expression",
            "value": {
                "function": {"name": "f", "arguments": [{"type": "number", "raw_text": "1"}]},
                "members": []
            }
        })
    );
}
