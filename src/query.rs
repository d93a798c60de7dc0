//! The query context consumed by name resolution and classification.
//!
//! The host application owns the query model; this crate only reads it
//! through the traits below and never mutates what it is given.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base type carried by boolean fields.
pub const BOOLEAN_TYPE: &str = "type/Boolean";

/// A saved metric defined on the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub id: i64,
    pub name: String,
}

/// A saved segment (named filter) defined on the source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub base_type: String,
}

impl Field {
    pub fn is_boolean(&self) -> bool {
        self.base_type == BOOLEAN_TYPE
    }
}

/// Metadata of the query's source table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub metrics: Vec<Metric>,
    pub segments: Vec<Segment>,
    pub fields: Vec<Field>,
}

/// A column the expression editor can refer to.
pub trait Dimension {
    /// Display name; foreign-key paths are joined with
    /// [`crate::config::FK_SYMBOL`] surrounded by spaces.
    fn render(&self) -> String;

    /// True when the dimension is backed by a custom expression of the query.
    fn is_expression(&self) -> bool;
}

/// Recognizes MBQL column references.
pub trait DimensionResolver {
    fn is_dimension(&self, expr: &Value) -> bool;

    /// The dimension an MBQL reference points at, if it is known.
    fn dimension_for(&self, _expr: &Value) -> Option<&dyn Dimension> {
        None
    }
}

/// The legacy query model: table metadata plus the dimension enumerator.
pub trait LegacyQuery: DimensionResolver {
    fn table(&self) -> Option<&Table>;

    fn dimension_options(&self) -> Vec<&dyn Dimension>;
}
