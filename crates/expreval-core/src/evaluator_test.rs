use super::{evaluate, evaluate_expression, resolve, EvalError, ExpressionError};
use crate::ast::{AstNode, BinaryOp};
use crate::codec::{deserialize, serialize};
use crate::parser::parse_expression;
use serde_json::json;

fn eval(expression: &str, json: &str) -> bool {
    evaluate_expression(expression, json).expect("eval")
}

fn eval_err(expression: &str, json: &str) -> EvalError {
    match evaluate_expression(expression, json) {
        Err(ExpressionError::Eval(error)) => error,
        other => panic!("expected evaluation error, got {other:?}"),
    }
}

#[test]
fn numeric_comparison_against_document() {
    assert!(eval("customer.age > 25", r#"{"customer":{"age":30}}"#));
    assert!(!eval("customer.age > 25", r#"{"customer":{"age":20}}"#));
    assert!(!eval("(customer.age < 20)", r#"{"customer":{"age":25}}"#));
    assert!(eval("customer.age >= 30", r#"{"customer":{"age":30}}"#));
    assert!(eval("customer.age <= 30", r#"{"customer":{"age":30}}"#));
}

#[test]
fn string_equality_against_document() {
    assert!(eval(
        "customer.address.city == \"Seattle\"",
        r#"{"customer":{"address":{"city":"Seattle"}}}"#
    ));
    assert!(!eval(
        "customer.address.city == \"seattle\"",
        r#"{"customer":{"address":{"city":"Seattle"}}}"#
    ));
}

#[test]
fn missing_path_equals_null_literal() {
    assert!(!eval("customer.address != null", r#"{"customer":{}}"#));
    assert!(eval("customer.address == null", r#"{"customer":{}}"#));
    assert!(eval("customer.address == null", r#"{"customer":{"address":null}}"#));
    assert!(eval("customer.address != null", r#"{"customer":{"address":{"city":"x"}}}"#));
}

#[test]
fn boolean_literal_expressions() {
    assert!(eval("true AND true OR (false == false)", "{}"));
    assert!(!eval("false != false OR true == false", "{}"));
    assert!(eval("true", "{}"));
    assert!(!eval("false", "{}"));
}

#[test]
fn combined_conditions() {
    let document = r#"{"customer":{"age":30,"name":"John","type":"Regular","isBlocked":true,
        "address":{"city":"New York"}}}"#;
    assert!(eval(
        "(customer.age > 25 AND customer.name == \"John\") OR (customer.address.city == \"Seattle\")",
        document
    ));
    assert!(eval(
        "((customer.age > 25 AND (customer.name == \"John\" OR customer.name == \"Jane\")) OR customer.type == \"VIP\") AND customer.isBlocked",
        document
    ));
    assert!(eval(
        "(customer.age < 20) OR (customer.name == \"John\")",
        document
    ));
}

#[test]
fn numbers_compare_by_text_for_equality() {
    let document = r#"{"customer":{"salary":5000,"expenses":3800,"ratio":5000.0}}"#;
    assert!(eval("customer.salary == 5000 OR customer.expenses > 1000", document));
    assert!(!eval("customer.ratio == 5000", document));
    assert!(eval("customer.ratio >= 5000", document));
}

#[test]
fn standalone_variable_is_true_only_for_true_text() {
    assert!(eval("flags.active", r#"{"flags":{"active":true}}"#));
    assert!(eval("flags.active", r#"{"flags":{"active":"TRUE"}}"#));
    assert!(!eval("flags.active", r#"{"flags":{"active":false}}"#));
    assert!(!eval("flags.active", r#"{"flags":{"active":1}}"#));
}

#[test]
fn standalone_missing_variable_is_an_error() {
    assert!(matches!(
        eval_err("flags.active", r#"{"flags":{}}"#),
        EvalError::MissingCondition { ref operand } if operand == "flags.active"
    ));
}

#[test]
fn ordering_comparison_requires_present_numeric_values() {
    assert!(matches!(
        eval_err("customer.age > 25", r#"{"customer":{}}"#),
        EvalError::MissingNumber { op: BinaryOp::Gt, .. }
    ));
    assert!(matches!(
        eval_err("customer.age > 25", r#"{"customer":{"age":"old"}}"#),
        EvalError::NotANumber { ref value, .. } if value == "old"
    ));
    assert!(matches!(
        eval_err("customer.age > customer", r#"{"customer":{"age":3}}"#),
        EvalError::NotANumber { ref value, .. } if value.is_empty()
    ));
}

#[test]
fn only_exact_non_finite_spellings_are_numbers() {
    for text in ["inf", "infinity", "INF", "nan", "-inf", "+nan", "e5"] {
        let document = json!({ "x": text }).to_string();
        assert!(
            matches!(eval_err("x > 5", &document), EvalError::NotANumber { ref value, .. } if value == text),
            "`{text}` must not parse as a number"
        );
    }
    assert!(eval("x > 5", r#"{"x":"Infinity"}"#));
    assert!(eval("x < 5", r#"{"x":" -Infinity "}"#));
    assert!(!eval("x > 5", r#"{"x":"NaN"}"#));
    assert!(eval("x >= 5", r#"{"x":"5e0"}"#));
}

#[test]
fn numeric_strings_in_document_are_coerced() {
    assert!(eval("order.total > 99", r#"{"order":{"total":"100.50"}}"#));
    assert!(eval("order.total < limit", r#"{"order":{"total":1.5},"limit":2}"#));
}

#[test]
fn chained_comparison_compares_boolean_text() {
    assert!(eval("a == b == flag", r#"{"a":1,"b":1,"flag":true}"#));
    assert!(!eval("a == b == flag", r#"{"a":1,"b":2,"flag":true}"#));
}

#[test]
fn malformed_document_is_an_evaluation_error() {
    assert!(matches!(eval_err("a == 1", "{not json"), EvalError::InvalidJson(_)));
}

#[test]
fn evaluates_deserialized_tree() {
    let tree = parse_expression("customer.age > 25 AND customer.address.city == \"Seattle\"")
        .expect("parse");
    let restored = deserialize(&serialize(&tree).expect("serialize")).expect("deserialize");
    assert!(evaluate(
        &restored,
        r#"{"customer":{"age":28,"address":{"city":"Seattle"}}}"#
    )
    .expect("eval"));
}

#[test]
fn resolve_renders_literals_and_scalars() {
    let document = json!({"n": 42, "s": "x", "b": false, "o": {"k": 1}, "z": null});
    assert_eq!(resolve(&AstNode::Number(7), &document).expect("resolve"), Some("7".to_string()));
    assert_eq!(resolve(&AstNode::Boolean(true), &document).expect("resolve"), Some("true".to_string()));
    assert_eq!(resolve(&AstNode::Null, &document).expect("resolve"), None);
    assert_eq!(resolve(&AstNode::value("n"), &document).expect("resolve"), Some("42".to_string()));
    assert_eq!(resolve(&AstNode::value("b"), &document).expect("resolve"), Some("false".to_string()));
    assert_eq!(resolve(&AstNode::value("o"), &document).expect("resolve"), Some(String::new()));
    assert_eq!(resolve(&AstNode::value("z"), &document).expect("resolve"), None);
    assert_eq!(resolve(&AstNode::value("s.t"), &document).expect("resolve"), None);
}
