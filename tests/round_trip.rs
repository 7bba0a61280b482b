use dsc_expression::{parse, Expression};

const VALID: &[&str] = &[
    "[f()]",
    "[f('a, b').x.y]",
    "[f(true, false, 42)]",
    "[g(h(1,2), 'x').m]",
    "[concat('', base64('a b c'), resourceId('Microsoft.Test/type', 'name')).properties.id]",
    "[a(b(c(d(e(f())))))]",
    "[f( 'spaces  inside' ,\n\t7 ).m-1.2x._]",
    "[my-func(truest(), 0).true.false]",
];

fn reparse(expr: &Expression) -> Expression {
    parse(&expr.to_string()).unwrap()
}

#[test]
fn reserialized_trees_parse_to_equal_trees() {
    for src in VALID {
        let expr = parse(src).unwrap_or_else(|e| panic!("{src}: {e}"));
        assert_eq!(reparse(&expr), expr, "{src}");
    }
}

#[test]
fn reserialization_is_a_fixed_point() {
    for src in VALID {
        let once = parse(src).unwrap().to_string();
        let twice = parse(&once).unwrap().to_string();
        assert_eq!(once, twice);
    }
}

#[test]
fn canonical_text_drops_insignificant_whitespace_only() {
    let expr = parse("[ f ( ' a ' , 1 ) . x ]").unwrap();
    assert_eq!(expr.to_string(), "[f(' a ', 1).x]");
}

#[test]
fn json_form_round_trips() {
    for src in VALID {
        let expr = parse(src).unwrap();
        let json = serde_json::to_string(&expr).unwrap();
        let back: Expression = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
    }
}
