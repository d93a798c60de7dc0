//! Classify and format MBQL expressions given as JSON

use super::CliError;
use crate::{Classifier, ExpressionConfig, Metadata, format_expression};

/// Options shared by the `classify` and `format` commands
#[derive(Debug, Clone, Default)]
pub struct ExpressionOptions {
    /// MBQL expression as JSON
    pub input: Option<String>,
    /// Query metadata as JSON (see [`Metadata`])
    pub metadata: Option<String>,
    /// Editor configuration as JSON (see [`ExpressionConfig`])
    pub config: Option<String>,
}

struct Loaded {
    expr: serde_json::Value,
    metadata: Metadata,
    config: ExpressionConfig,
}

fn load(options: &ExpressionOptions) -> Result<Loaded, CliError> {
    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let expr = serde_json::from_str(input)?;
    let metadata = match &options.metadata {
        Some(json) => Metadata::from_json(json)?,
        None => Metadata::default(),
    };
    let config = match &options.config {
        Some(json) => ExpressionConfig::from_json(json)?,
        None => ExpressionConfig::default(),
    };
    Ok(Loaded {
        expr,
        metadata,
        config,
    })
}

/// Classify an expression, returning the classification as JSON
pub fn execute_classify(options: &ExpressionOptions) -> Result<serde_json::Value, CliError> {
    let loaded = load(options)?;
    let classifier = Classifier::new(&loaded.config.registry, &loaded.metadata);

    let expression = classifier
        .classify(&loaded.expr)
        .ok_or_else(|| CliError::NotAnExpression(loaded.expr.to_string()))?;
    Ok(serde_json::to_value(&expression)?)
}

/// Format an expression as editor text
pub fn execute_format(options: &ExpressionOptions) -> Result<String, CliError> {
    let loaded = load(options)?;
    Ok(format_expression(
        &loaded.expr,
        &loaded.config,
        &loaded.metadata,
    )?)
}
