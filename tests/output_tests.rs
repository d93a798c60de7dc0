// tests/output_tests.rs

use mbql_expr::config::ExpressionConfig;
use mbql_expr::metadata::Metadata;
use mbql_expr::output::{FormatError, format_expression};
use mbql_expr::resolve::ResolveError;
use serde_json::{Value, json};

const METADATA: &str = r#"{
  "table": {
    "metrics": [{"id": 5, "name": "Revenue"}],
    "segments": [{"id": 3, "name": "Big Orders"}],
    "fields": [
      {"id": 1, "name": "Total", "base_type": "type/Float"},
      {"id": 2, "name": "Title", "base_type": "type/Text"}
    ]
  },
  "dimensions": [
    {"path": ["Total"], "ref": ["field", 1, null]},
    {"path": ["Title"], "ref": ["field", 2, null]},
    {"path": ["Product", "Category"], "ref": ["field", 7, {"source-field": 2}]},
    {"path": ["Margin"], "ref": ["expression", "Margin"], "expression": true}
  ]
}"#;

fn format(expr: Value) -> Result<String, FormatError> {
    let metadata = Metadata::from_json(METADATA).unwrap();
    format_expression(&expr, &ExpressionConfig::default(), &metadata)
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(format(json!("Widget")).unwrap(), r#""Widget""#);
    assert_eq!(format(json!(r#"say "hi""#)).unwrap(), r#""say \"hi\"""#);
    assert_eq!(format(json!(42)).unwrap(), "42");
    assert_eq!(format(json!(2.0)).unwrap(), "2");
    assert_eq!(format(json!(1.5)).unwrap(), "1.5");
    assert_eq!(format(json!(-3)).unwrap(), "-3");
    assert_eq!(format(json!(true)).unwrap(), "True");
    assert_eq!(format(json!(false)).unwrap(), "False");
}

#[test]
fn test_float_literals_keep_their_value() {
    let cases = vec![
        (1e-30, format!("0.{}1", "0".repeat(29))),
        (0.30000000000000004, "0.30000000000000004".to_string()),
        (123456789.12345679, "123456789.12345679".to_string()),
        (1e25, format!("1{}", "0".repeat(25))),
        (0.1, "0.1".to_string()),
        (-2.50, "-2.5".to_string()),
    ];

    for (value, expected) in cases {
        let text = format(json!(value)).unwrap();
        assert_eq!(text, expected, "Failed for value: {}", value);
        assert_eq!(text.parse::<f64>().unwrap(), value);
    }
}

#[test]
fn test_tiny_float_in_comparison_is_not_zero() {
    let expr = json!(["<", ["field", 1, null], 1e-30]);
    let text = format(expr).unwrap();
    assert_ne!(text, "[Total] < 0");
    assert!(text.starts_with("[Total] < 0.0000"));
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_infix_operators() {
    assert_eq!(format(json!(["+", ["field", 1, null], 10])).unwrap(), "[Total] + 10");
    assert_eq!(format(json!(["+", 1, 2, 3])).unwrap(), "1 + 2 + 3");
}

#[test]
fn test_precedence_parentheses() {
    assert_eq!(format(json!(["*", ["+", 1, 2], 3])).unwrap(), "(1 + 2) * 3");
    assert_eq!(format(json!(["+", ["*", 1, 2], 3])).unwrap(), "1 * 2 + 3");
    assert_eq!(format(json!(["-", 1, ["-", 2, 3]])).unwrap(), "1 - (2 - 3)");
    assert_eq!(format(json!(["-", ["-", 1, 2], 3])).unwrap(), "1 - 2 - 3");
}

#[test]
fn test_logical_operators() {
    let expr = json!(["and", [">", ["field", 1, null], 10], ["or", true, false]]);
    assert_eq!(format(expr).unwrap(), "[Total] > 10 AND (True OR False)");
}

#[test]
fn test_unary_operators() {
    assert_eq!(format(json!(["not", ["=", ["field", 1, null], 0]])).unwrap(), "NOT ([Total] = 0)");
    assert_eq!(format(json!(["not", ["segment", 3]])).unwrap(), "NOT [Big Orders]");
    assert_eq!(format(json!(["-", ["field", 1, null]])).unwrap(), "-[Total]");
    assert_eq!(format(json!(["-", ["+", 1, 2]])).unwrap(), "-(1 + 2)");
    assert_eq!(format(json!(["+", 5])).unwrap(), "+5");
    assert_eq!(format(json!(["+", ["field", 1, null]])).unwrap(), "+[Total]");
}

#[test]
fn test_negative_number_operands() {
    assert_eq!(format(json!(["-", -1])).unwrap(), "-(-1)");
    assert_eq!(format(json!(["-", 1, -2])).unwrap(), "1 - (-2)");
    assert_eq!(format(json!(["*", 2, -1.5])).unwrap(), "2 * (-1.5)");
    assert_eq!(format(json!(["-", -2, 1])).unwrap(), "-2 - 1");
    assert_eq!(format(json!(["-", ["-", 1]])).unwrap(), "-(-1)");
    assert_eq!(format(json!(["-", 1, ["-", 2]])).unwrap(), "1 - (-2)");
    assert_eq!(format(json!(["+", 1, ["+", 2]])).unwrap(), "1 + (+2)");
    assert_eq!(format(json!(["+", ["-", 1], 2])).unwrap(), "-1 + 2");
}

#[test]
fn test_operator_without_readable_form() {
    assert_eq!(
        format(json!(["+"])),
        Err(FormatError::OperatorArity {
            operator: "+".to_string(),
            arity: 0,
        })
    );
    assert_eq!(
        format(json!(["*", 2])),
        Err(FormatError::OperatorArity {
            operator: "*".to_string(),
            arity: 1,
        })
    );
    assert!(matches!(
        format(json!(["not", true, false])),
        Err(FormatError::OperatorArity { arity: 2, .. })
    ));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_calls() {
    assert_eq!(format(json!(["count"])).unwrap(), "Count");
    assert_eq!(format(json!(["cum-sum", ["field", 1, null]])).unwrap(), "CumulativeSum([Total])");
    assert_eq!(
        format(json!(["concat", ["field", 2, null], " ", ["+", 1, 2]])).unwrap(),
        r#"concat([Title], " ", 1 + 2)"#
    );
}

#[test]
fn test_function_options_are_omitted() {
    let expr = json!(["contains", ["field", 2, null], "abc", {"case-sensitive": false}]);
    assert_eq!(format(expr).unwrap(), r#"contains([Title], "abc")"#);
}

// ============================================================================
// References
// ============================================================================

#[test]
fn test_dimension_names() {
    assert_eq!(
        format(json!(["field", 7, {"source-field": 2}])).unwrap(),
        "[Product.Category]"
    );
    assert_eq!(format(json!(["expression", "Margin"])).unwrap(), "[Margin]");
}

#[test]
fn test_metric_and_segment_names() {
    assert_eq!(format(json!(["/", ["metric", 5], 2])).unwrap(), "[Revenue] / 2");
    assert_eq!(format(json!(["segment", 3])).unwrap(), "[Big Orders]");
}

#[test]
fn test_unknown_references() {
    assert_eq!(
        format(json!(["field", 99, null])),
        Err(FormatError::UnknownDimension(r#"["field",99,null]"#.to_string()))
    );
    assert_eq!(format(json!(["metric", 8])), Err(FormatError::UnknownMetric("8".to_string())));
    assert_eq!(format(json!(["segment", 8])), Err(FormatError::UnknownSegment("8".to_string())));
}

#[test]
fn test_metric_without_table() {
    let metadata = Metadata::default();
    let result = format_expression(&json!(["metric", 5]), &ExpressionConfig::default(), &metadata);
    assert_eq!(result, Err(FormatError::Resolve(ResolveError::MissingTable)));
}

// ============================================================================
// Case
// ============================================================================

#[test]
fn test_case_with_default() {
    let expr = json!([
        "case",
        [[["<", ["field", 1, null], 10], "low"], [["<", ["field", 1, null], 100], "mid"]],
        {"default": "high"}
    ]);
    assert_eq!(
        format(expr).unwrap(),
        r#"case([Total] < 10, "low", [Total] < 100, "mid", "high")"#
    );
}

#[test]
fn test_case_without_default() {
    let expr = json!(["case", [[["segment", 3], 1]]]);
    assert_eq!(format(expr).unwrap(), "case([Big Orders], 1)");
}

#[test]
fn test_malformed_case() {
    assert!(matches!(
        format(json!(["case", [["only-one"]]])),
        Err(FormatError::MalformedCase(_))
    ));
}

// ============================================================================
// Not Expressions
// ============================================================================

#[test]
fn test_not_an_expression() {
    assert_eq!(format(json!(null)), Err(FormatError::NotAnExpression("null".to_string())));
    assert!(matches!(format(json!(["+", 1, null])), Err(FormatError::NotAnExpression(_))));
}
