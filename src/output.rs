//! Rendering of MBQL expressions as custom-expression editor text.
//!
//! # Features
//!
//! - **Literals** - strings in the literal quote style, numbers as the
//!   shortest text that reads back to the same value (`2.0` prints as `2`),
//!   booleans as `True`/`False`
//! - **Operators** - infix, with parentheses only where precedence or a
//!   negative number operand needs them; word operators in upper case
//! - **Functions** - editor spelling from the registry, options omitted
//! - **References** - dimensions, metrics and segments by formatted name
//!
//! # Examples
//!
//! ```
//! use mbql_expr::config::ExpressionConfig;
//! use mbql_expr::metadata::Metadata;
//! use mbql_expr::output::format_expression;
//! use serde_json::json;
//!
//! let config = ExpressionConfig::default();
//! let metadata = Metadata::default();
//!
//! let expr = json!(["*", ["+", 1, 2], 3.0]);
//! assert_eq!(format_expression(&expr, &config, &metadata).unwrap(), "(1 + 2) * 3");
//! ```

use rust_decimal::Decimal;
use serde_json::{Number, Value};
use thiserror::Error;

use crate::ast::{Application, Expression};
use crate::classify::Classifier;
use crate::config::ExpressionConfig;
use crate::identifier::format_string_literal;
use crate::query::LegacyQuery;
use crate::resolve::{
    ResolveError, format_dimension_name, format_metric_name, format_segment_name,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("not an expression: {0}")]
    NotAnExpression(String),
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("unknown segment: {0}")]
    UnknownSegment(String),
    #[error("malformed case expression: {0}")]
    MalformedCase(String),
    #[error("operator {operator} cannot take {arity} argument(s)")]
    OperatorArity { operator: String, arity: usize },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Binding strength of an operator printed in infix position.
fn binary_precedence(op: &str) -> Option<u8> {
    match op {
        "or" => Some(1),
        "and" => Some(2),
        "=" | "!=" | "<" | ">" | "<=" | ">=" => Some(4),
        "+" | "-" => Some(5),
        "*" | "/" => Some(6),
        _ => None,
    }
}

/// Operators with a fixed infix or prefix spelling in the editor.
fn is_builtin_operator(op: &str) -> bool {
    op == "not" || binary_precedence(op).is_some()
}

/// `None` for applications printed in call form.
fn operator_precedence(app: &Application) -> Option<u8> {
    match (app.name, app.args.len()) {
        ("not", 1) => Some(3),
        ("-" | "+", 1) => Some(7),
        ("not", _) => None,
        (name, n) if n >= 2 => binary_precedence(name),
        _ => None,
    }
}

/// Whether `expr` prints with a leading `-` or `+`, which cannot follow
/// another operator symbol directly.
fn starts_with_sign(expr: &Expression) -> bool {
    match expr {
        Expression::NumberLiteral(n) => n.as_f64().is_some_and(f64::is_sign_negative),
        Expression::Operator(app) => matches!((app.name, app.args.len()), ("-" | "+", 1)),
        _ => false,
    }
}

fn operator_symbol(op: &str) -> String {
    match op {
        "and" | "or" | "not" => op.to_uppercase(),
        _ => op.to_string(),
    }
}

/// Integers print as written. Floats go through an exact decimal parse of
/// their JSON text, so `2.0` loses its zero fraction without any rounding;
/// text outside `Decimal`'s range falls back to `f64`'s shortest form.
fn format_number(n: &Number) -> String {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        return n.to_string();
    };
    Decimal::from_str_exact(&n.to_string())
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|_| f.to_string())
}

pub struct ExpressionPrinter<'c, Q: LegacyQuery + ?Sized> {
    config: &'c ExpressionConfig,
    query: &'c Q,
}

impl<'c, Q: LegacyQuery + ?Sized> ExpressionPrinter<'c, Q> {
    pub fn new(config: &'c ExpressionConfig, query: &'c Q) -> Self {
        ExpressionPrinter { config, query }
    }

    pub fn print(&self, expr: &Value) -> Result<String, FormatError> {
        let classifier = Classifier::new(&self.config.registry, self.query);
        let classified = classifier
            .classify(expr)
            .ok_or_else(|| FormatError::NotAnExpression(expr.to_string()))?;
        self.print_expression(&classified)
    }

    fn print_expression(&self, expr: &Expression) -> Result<String, FormatError> {
        match expr {
            Expression::StringLiteral(s) => Ok(format_string_literal(s, self.config)),
            Expression::NumberLiteral(n) => Ok(format_number(n)),
            Expression::BooleanLiteral(b) => Ok(if *b { "True" } else { "False" }.to_string()),
            Expression::Operator(app) => self.print_operator(app),
            Expression::Function(app) => self.print_call(app),
            Expression::Dimension(reference) => self.print_dimension(reference),
            Expression::Metric(id) => self.print_metric(id),
            Expression::Segment(id) => self.print_segment(id),
            Expression::Case(args) => self.print_case(args),
        }
    }

    fn print_operand(
        &self,
        expr: &Expression,
        parent: u8,
        right: bool,
    ) -> Result<String, FormatError> {
        let text = self.print_expression(expr)?;
        let needs_parens = (right && starts_with_sign(expr))
            || match expr {
                Expression::Operator(app) => operator_precedence(app)
                    .is_some_and(|p| p < parent || (right && p == parent)),
                _ => false,
            };
        Ok(if needs_parens { format!("({text})") } else { text })
    }

    fn print_operator(&self, app: &Application) -> Result<String, FormatError> {
        let Some(precedence) = operator_precedence(app) else {
            if is_builtin_operator(app.name) {
                return Err(FormatError::OperatorArity {
                    operator: app.name.to_string(),
                    arity: app.args.len(),
                });
            }
            return self.print_call(app);
        };
        let symbol = operator_symbol(app.name);

        // a unary operand is parenthesized whenever it is an operator or
        // starts with a sign
        if let [operand] = app.args.as_slice() {
            let operand = self.print_operand(operand, u8::MAX, true)?;
            return Ok(match app.name {
                "not" => format!("{symbol} {operand}"),
                _ => format!("{symbol}{operand}"),
            });
        }

        let operands = app
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| self.print_operand(arg, precedence, i > 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(operands.join(&format!(" {symbol} ")))
    }

    fn print_call(&self, app: &Application) -> Result<String, FormatError> {
        let name = self.config.registry.display_name(app.name);
        if app.args.is_empty() {
            return Ok(name.to_string());
        }
        let args = app
            .args
            .iter()
            .map(|arg| self.print_expression(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{name}({})", args.join(", ")))
    }

    fn print_dimension(&self, reference: &Value) -> Result<String, FormatError> {
        self.query
            .dimension_for(reference)
            .map(|dimension| format_dimension_name(dimension, self.config))
            .ok_or_else(|| FormatError::UnknownDimension(reference.to_string()))
    }

    fn print_metric(&self, id: &Number) -> Result<String, FormatError> {
        let table = self.query.table().ok_or(ResolveError::MissingTable)?;
        table
            .metrics
            .iter()
            .find(|metric| id.as_i64() == Some(metric.id))
            .map(|metric| format_metric_name(metric, self.config))
            .ok_or_else(|| FormatError::UnknownMetric(id.to_string()))
    }

    fn print_segment(&self, id: &Number) -> Result<String, FormatError> {
        let table = self.query.table().ok_or(ResolveError::MissingTable)?;
        table
            .segments
            .iter()
            .find(|segment| id.as_i64() == Some(segment.id))
            .map(|segment| format_segment_name(segment, self.config))
            .ok_or_else(|| FormatError::UnknownSegment(id.to_string()))
    }

    /// `["case", [[condition, value], ...], {"default": value}?]`
    fn print_case(&self, args: &[Value]) -> Result<String, FormatError> {
        let malformed = || FormatError::MalformedCase(Value::from(args.to_vec()).to_string());

        let (pairs, options) = match args {
            [Value::Array(pairs)] => (pairs, None),
            [Value::Array(pairs), Value::Object(options)] => (pairs, Some(options)),
            _ => return Err(malformed()),
        };

        let mut parts = Vec::with_capacity(pairs.len() * 2 + 1);
        for pair in pairs {
            let Some([condition, value]) = pair.as_array().map(Vec::as_slice) else {
                return Err(malformed());
            };
            parts.push(self.print(condition)?);
            parts.push(self.print(value)?);
        }
        if let Some(default) = options.and_then(|options| options.get("default")) {
            parts.push(self.print(default)?);
        }

        let name = self.config.registry.display_name("case");
        Ok(format!("{name}({})", parts.join(", ")))
    }
}

/// Formats a raw MBQL expression as editor text.
pub fn format_expression<Q: LegacyQuery + ?Sized>(
    expr: &Value,
    config: &ExpressionConfig,
    query: &Q,
) -> Result<String, FormatError> {
    ExpressionPrinter::new(config, query).print(expr)
}
