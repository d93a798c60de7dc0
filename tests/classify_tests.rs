// tests/classify_tests.rs

use mbql_expr::ast::Expression;
use mbql_expr::classify::{Classifier, has_options, is_case, is_literal, is_metric, is_segment};
use mbql_expr::config::Registry;
use mbql_expr::query::DimensionResolver;
use serde_json::{Value, json};
use std::cell::RefCell;

/// Treats any `["field", ...]` array as a dimension and records what it saw.
#[derive(Default)]
struct FieldRefs {
    seen: RefCell<Vec<Value>>,
}

impl DimensionResolver for FieldRefs {
    fn is_dimension(&self, expr: &Value) -> bool {
        self.seen.borrow_mut().push(expr.clone());
        expr.as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_str)
            == Some("field")
    }
}

fn registry_with_between_operator() -> Registry {
    let mut registry = Registry::default();
    registry.functions.remove("between");
    registry.operators.insert("between".to_string());
    registry
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literals() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    assert_eq!(
        classifier.classify(&json!("Widget")),
        Some(Expression::StringLiteral("Widget"))
    );
    assert!(matches!(
        classifier.classify(&json!(4.5)),
        Some(Expression::NumberLiteral(n)) if n.as_f64() == Some(4.5)
    ));
    assert_eq!(
        classifier.classify(&json!(true)),
        Some(Expression::BooleanLiteral(true))
    );
    assert!(is_literal(&json!("x")));
    assert!(is_literal(&json!(1)));
    assert!(!is_literal(&json!(false)));
}

#[test]
fn test_not_expressions() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    for value in [
        json!(null),
        json!({"a": 1}),
        json!([]),
        json!([1, 2]),
        json!(["no-such-clause", 1]),
        json!(["metric", "5"]),
        json!(["metric", 5, 6]),
    ] {
        assert!(!classifier.is_expression(&value), "{value}");
    }
}

// ============================================================================
// Operators and Functions
// ============================================================================

#[test]
fn test_operator_application() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["+", ["field", 1, null], 10]);
    let Some(Expression::Operator(app)) = classifier.classify(&expr) else {
        panic!("expected an operator");
    };
    assert_eq!(app.name, "+");
    assert_eq!(app.args.len(), 2);
    assert!(matches!(app.args[0], Expression::Dimension(_)));
    assert!(app.options.is_none());
}

#[test]
fn test_operator_with_bad_argument() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    assert!(!classifier.is_operator(&json!(["+", 1, null])));
    assert!(!classifier.is_operator(&json!(["+", 1, ["bogus"]])));
    assert!(classifier.is_operator(&json!(["+", 1, ["-", 2, 3]])));
}

#[test]
fn test_function_application() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    assert!(classifier.is_function(&json!(["count"])));
    assert!(classifier.is_function(&json!(["concat", ["field", 2, null], "!"])));
    assert!(!classifier.is_operator(&json!(["concat", "a", "b"])));
    assert!(!classifier.is_function(&json!(["+", 1, 2])));
}

#[test]
fn test_trailing_options_are_excluded() {
    let registry = registry_with_between_operator();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["between", ["field", 1, null], 1, 10, {"case-sensitive": false}]);
    assert!(has_options(&expr));

    let Some(Expression::Operator(app)) = classifier.classify(&expr) else {
        panic!("expected an operator");
    };
    assert_eq!(app.args.len(), 3);
    assert_eq!(
        app.options.and_then(|options| options.get("case-sensitive")),
        Some(&json!(false))
    );

    // the options object never reaches the dimension resolver
    let seen = resolver.seen.borrow();
    assert!(seen.iter().all(|value| !value.is_object()), "{seen:?}");
}

#[test]
fn test_trailing_array_is_not_options() {
    let registry = registry_with_between_operator();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["between", ["field", 1, null], 1, 10, ["field", 2, null]]);
    assert!(!has_options(&expr));
    let Some(Expression::Operator(app)) = classifier.classify(&expr) else {
        panic!("expected an operator");
    };
    assert_eq!(app.args.len(), 4);
}

#[test]
fn test_options_only_in_last_position() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["contains", {"case-sensitive": false}, ["field", 1, null], "a"]);
    assert!(!has_options(&expr));
    assert!(!classifier.is_function(&expr));
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_dimension_is_delegated() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["field", 7, {"source-field": 2}]);
    assert!(classifier.is_dimension(&expr));
    assert_eq!(resolver.seen.borrow().last(), Some(&expr));
    assert!(!classifier.is_dimension(&json!(["expression", "Margin"])));
}

#[test]
fn test_metric_and_segment_shapes() {
    assert!(is_metric(&json!(["metric", 5])));
    assert!(!is_metric(&json!(["metric"])));
    assert!(!is_metric(&json!(["metric", "5"])));
    assert!(is_segment(&json!(["segment", 3])));
    assert!(!is_segment(&json!(["segment", 3, {}])));
}

#[test]
fn test_metric_wins_without_registry_entry() {
    let registry = Registry::default();
    assert!(!registry.is_function("metric"));
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    assert!(matches!(
        classifier.classify(&json!(["metric", 5])),
        Some(Expression::Metric(id)) if id.as_i64() == Some(5)
    ));
    assert!(matches!(
        classifier.classify(&json!(["segment", 3])),
        Some(Expression::Segment(_))
    ));
}

#[test]
fn test_metric_inside_operator() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    assert!(classifier.is_operator(&json!(["/", ["metric", 5], ["metric", 6]])));
}

// ============================================================================
// Case
// ============================================================================

#[test]
fn test_case_matches_on_head_only() {
    let registry = Registry::default();
    let resolver = FieldRefs::default();
    let classifier = Classifier::new(&registry, &resolver);

    let expr = json!(["case", [[["<", ["field", 1, null], 10], "low"]], {"default": "high"}]);
    assert!(is_case(&expr));
    assert!(matches!(
        classifier.classify(&expr),
        Some(Expression::Case(args)) if args.len() == 2
    ));

    // branch shape is left to validation
    assert!(is_case(&json!(["case", "not", "checked"])));
    assert!(classifier.is_expression(&json!(["case"])));
}
