//! A self-contained query context loaded from JSON.
//!
//! ```text
//! {
//!   "table": {
//!     "metrics": [{"id": 5, "name": "Revenue"}],
//!     "segments": [{"id": 3, "name": "Big Orders"}],
//!     "fields": [{"id": 1, "name": "Total", "base_type": "type/Float"}]
//!   },
//!   "dimensions": [
//!     {"path": ["Total"], "ref": ["field", 1, null]},
//!     {"path": ["Product", "Category"], "ref": ["field", 7, {"source-field": 2}]},
//!     {"path": ["Margin"], "ref": ["expression", "Margin"], "expression": true}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::FK_SYMBOL;
use crate::query::{Dimension, DimensionResolver, LegacyQuery, Table};

/// A candidate column of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionOption {
    /// Display names from the source table to the column, one per join hop.
    pub path: Vec<String>,
    /// The MBQL reference this dimension is written as.
    #[serde(rename = "ref")]
    pub reference: Value,
    #[serde(default)]
    pub expression: bool,
}

impl Dimension for DimensionOption {
    fn render(&self) -> String {
        self.path.join(&format!(" {FK_SYMBOL} "))
    }

    fn is_expression(&self) -> bool {
        self.expression
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub table: Option<Table>,
    pub dimensions: Vec<DimensionOption>,
}

impl Metadata {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// `["field", id-or-name, options-or-null]`, `["expression", name, options?]`
/// and `["aggregation", index, options?]`.
pub fn is_column_reference(expr: &Value) -> bool {
    let Some(items) = expr.as_array() else {
        return false;
    };
    let trailing_ok = |rest: &[Value]| match rest {
        [] => true,
        [options] => options.is_null() || options.is_object(),
        _ => false,
    };

    match items.as_slice() {
        [Value::String(head), Value::Number(_) | Value::String(_), rest @ ..]
            if head == "field" =>
        {
            !rest.is_empty() && trailing_ok(rest)
        }
        [Value::String(head), Value::String(_), rest @ ..] if head == "expression" => {
            trailing_ok(rest)
        }
        [Value::String(head), Value::Number(_), rest @ ..] if head == "aggregation" => {
            trailing_ok(rest)
        }
        _ => false,
    }
}

impl DimensionResolver for Metadata {
    fn is_dimension(&self, expr: &Value) -> bool {
        is_column_reference(expr)
    }

    fn dimension_for(&self, expr: &Value) -> Option<&dyn Dimension> {
        self.dimensions
            .iter()
            .find(|dimension| dimension.reference == *expr)
            .map(|dimension| dimension as &dyn Dimension)
    }
}

impl LegacyQuery for Metadata {
    fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    fn dimension_options(&self) -> Vec<&dyn Dimension> {
        self.dimensions
            .iter()
            .map(|dimension| dimension as &dyn Dimension)
            .collect()
    }
}

#[test]
fn test_column_references() {
    use serde_json::json;

    assert!(is_column_reference(&json!(["field", 1, null])));
    assert!(is_column_reference(&json!(["field", "TOTAL", {"base-type": "type/Float"}])));
    assert!(!is_column_reference(&json!(["field", 1])));
    assert!(is_column_reference(&json!(["expression", "Margin"])));
    assert!(is_column_reference(&json!(["aggregation", 0])));
    assert!(!is_column_reference(&json!(["metric", 5])));
    assert!(!is_column_reference(&json!("field")));
}
