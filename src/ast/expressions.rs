use serde::Serialize;
use serde_json::{Map, Number, Value};

/// An MBQL value after classification.
///
/// Variants borrow from the raw value they were classified from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Expression<'a> {
    /// String literal
    ///
    /// # Example
    /// ```text
    /// "Widget"
    /// ```
    StringLiteral(&'a str),

    /// Number literal
    NumberLiteral(&'a Number),

    /// Boolean literal
    BooleanLiteral(bool),

    /// Application of an operator such as `+` or `and`
    ///
    /// # Example
    /// ```text
    /// ["+", ["field", 1, null], 10]
    /// ```
    Operator(Application<'a>),

    /// Application of a function such as `concat` or `count`
    ///
    /// # Example
    /// ```text
    /// ["concat", ["field", 2, null], "!"]
    /// ```
    Function(Application<'a>),

    /// Reference to a column of the query, kept as written
    ///
    /// # Example
    /// ```text
    /// ["field", 1, null]
    /// ```
    Dimension(&'a Value),

    /// Reference to a saved metric by id
    ///
    /// # Example
    /// ```text
    /// ["metric", 5]
    /// ```
    Metric(&'a Number),

    /// Reference to a saved segment by id
    Segment(&'a Number),

    /// Conditional form; everything after the `"case"` head, unchecked
    Case(&'a [Value]),
}

/// A named clause with classified arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Application<'a> {
    pub name: &'a str,
    pub args: Vec<Expression<'a>>,
    /// Trailing options object, excluded from `args`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a Map<String, Value>>,
}
