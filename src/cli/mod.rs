//! CLI support for mbql-expr
//!
//! Programmatic access to the `mbqlx` commands, so other tools can run
//! them without spawning a process.

mod expression;
mod text;

pub use expression::{ExpressionOptions, execute_classify, execute_format};
pub use text::{execute_identifier, execute_quote, execute_tokenize, execute_unquote};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Quoting error: {0}")]
    Quote(#[from] crate::QuoteError),
    #[error("Formatting error: {0}")]
    Format(#[from] crate::FormatError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
    #[error("Not an expression: {0}")]
    NotAnExpression(String),
}
