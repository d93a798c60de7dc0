//! Structural classification of raw MBQL values.
//!
//! [`Classifier::classify`] tries each kind of expression in a fixed order
//! and returns the first match:
//!
//! 1. string or number literal
//! 2. operator application
//! 3. function application
//! 4. dimension (delegated to the [`DimensionResolver`])
//! 5. boolean literal
//! 6. metric reference
//! 7. segment reference
//! 8. `case` form
//!
//! Nothing here fails on malformed input; a value that fits no kind is
//! simply not an expression.

use serde_json::{Map, Number, Value};

use crate::ast::{Application, Expression};
use crate::config::Registry;
use crate::query::DimensionResolver;

/// True when the last element of `expr` is a plain JSON object.
///
/// Arrays, strings, numbers, booleans and null in final position are never
/// options.
pub fn has_options(expr: &Value) -> bool {
    trailing_options(expr).is_some()
}

fn trailing_options(expr: &Value) -> Option<&Map<String, Value>> {
    expr.as_array()?.last()?.as_object()
}

/// The numeric id of a `[tag, <number>]` reference.
fn reference_id<'a>(expr: &'a Value, tag: &str) -> Option<&'a Number> {
    match expr.as_array()?.as_slice() {
        [Value::String(head), Value::Number(id)] if head == tag => Some(id),
        _ => None,
    }
}

/// `["metric", <number>]`, independent of the registry.
pub fn is_metric(expr: &Value) -> bool {
    reference_id(expr, "metric").is_some()
}

/// `["segment", <number>]`, independent of the registry.
pub fn is_segment(expr: &Value) -> bool {
    reference_id(expr, "segment").is_some()
}

/// Any array headed by `"case"`. The branches are left to validation.
pub fn is_case(expr: &Value) -> bool {
    case_args(expr).is_some()
}

fn case_args(expr: &Value) -> Option<&[Value]> {
    match expr.as_array()?.split_first()? {
        (Value::String(head), rest) if head == "case" => Some(rest),
        _ => None,
    }
}

pub fn is_string_literal(expr: &Value) -> bool {
    expr.is_string()
}

pub fn is_number_literal(expr: &Value) -> bool {
    expr.is_number()
}

pub fn is_boolean_literal(expr: &Value) -> bool {
    expr.is_boolean()
}

/// String or number. Booleans are checked after dimensions.
pub fn is_literal(expr: &Value) -> bool {
    is_string_literal(expr) || is_number_literal(expr)
}

/// Classifies MBQL values against a registry and a dimension resolver.
pub struct Classifier<'c, R: DimensionResolver + ?Sized> {
    registry: &'c Registry,
    resolver: &'c R,
}

impl<'c, R: DimensionResolver + ?Sized> Classifier<'c, R> {
    pub fn new(registry: &'c Registry, resolver: &'c R) -> Self {
        Classifier { registry, resolver }
    }

    /// Classifies `expr`, or returns `None` when it is not an expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbql_expr::ast::Expression;
    /// use mbql_expr::classify::Classifier;
    /// use mbql_expr::config::Registry;
    /// use mbql_expr::metadata::Metadata;
    /// use serde_json::json;
    ///
    /// let registry = Registry::default();
    /// let metadata = Metadata::default();
    /// let classifier = Classifier::new(&registry, &metadata);
    ///
    /// let expr = json!(["+", ["field", 1, null], 10]);
    /// assert!(matches!(classifier.classify(&expr), Some(Expression::Operator(_))));
    /// assert!(classifier.classify(&json!(null)).is_none());
    /// ```
    pub fn classify<'a>(&self, expr: &'a Value) -> Option<Expression<'a>> {
        match expr {
            Value::String(s) => return Some(Expression::StringLiteral(s)),
            Value::Number(n) => return Some(Expression::NumberLiteral(n)),
            _ => {}
        }
        if let Some(app) = self.application(expr, |name| self.registry.is_operator(name)) {
            return Some(Expression::Operator(app));
        }
        if let Some(app) = self.application(expr, |name| self.registry.is_function(name)) {
            return Some(Expression::Function(app));
        }
        if self.resolver.is_dimension(expr) {
            return Some(Expression::Dimension(expr));
        }
        if let Value::Bool(b) = expr {
            return Some(Expression::BooleanLiteral(*b));
        }
        if let Some(id) = reference_id(expr, "metric") {
            return Some(Expression::Metric(id));
        }
        if let Some(id) = reference_id(expr, "segment") {
            return Some(Expression::Segment(id));
        }
        case_args(expr).map(Expression::Case)
    }

    /// `[name, arg..., options?]` where `name` satisfies `is_head` and every
    /// argument before a trailing options object is an expression.
    fn application<'a>(
        &self,
        expr: &'a Value,
        is_head: impl Fn(&str) -> bool,
    ) -> Option<Application<'a>> {
        let (head, rest) = expr.as_array()?.split_first()?;
        let name = head.as_str().filter(|name| is_head(name))?;

        let options = trailing_options(expr).filter(|_| !rest.is_empty());
        let args = match options {
            Some(_) => &rest[..rest.len() - 1],
            None => rest,
        };

        let args = args
            .iter()
            .map(|arg| self.classify(arg))
            .collect::<Option<Vec<_>>>()?;

        Some(Application {
            name,
            args,
            options,
        })
    }

    pub fn is_expression(&self, expr: &Value) -> bool {
        self.classify(expr).is_some()
    }

    pub fn is_operator(&self, expr: &Value) -> bool {
        self.application(expr, |name| self.registry.is_operator(name))
            .is_some()
    }

    pub fn is_function(&self, expr: &Value) -> bool {
        self.application(expr, |name| self.registry.is_function(name))
            .is_some()
    }

    /// Forwards `expr` unchanged to the dimension resolver.
    pub fn is_dimension(&self, expr: &Value) -> bool {
        self.resolver.is_dimension(expr)
    }
}
