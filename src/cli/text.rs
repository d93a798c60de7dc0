//! Commands working on plain text: quoting, identifiers, tokens

use super::CliError;
use crate::{
    ExpressionConfig, QuoteStyle, Tokenized, format_identifier, quote_string, tokenize,
    unquote_string,
};

pub fn execute_quote(text: &str, style: &str) -> Result<String, CliError> {
    Ok(quote_string(text, style)?)
}

pub fn execute_unquote(text: &str) -> Result<String, CliError> {
    Ok(unquote_string(text)?)
}

/// Format `name` as an identifier.
///
/// `style` overrides the identifier quote default; `allow_bare` lets plain
/// words through unquoted.
pub fn execute_identifier(
    name: &str,
    style: Option<&str>,
    allow_bare: bool,
    config: Option<&str>,
) -> Result<String, CliError> {
    let mut config = match config {
        Some(json) => ExpressionConfig::from_json(json)?,
        None => ExpressionConfig::default(),
    };
    if let Some(style) = style {
        config.quotes.identifier_quote_default = style.parse::<QuoteStyle>()?;
    }
    if allow_bare {
        config.quotes.identifier_always_quoted = false;
    }
    Ok(format_identifier(name, &config))
}

pub fn execute_tokenize(text: &str) -> Tokenized {
    tokenize(text)
}
