//! Quoting engine for string literals and identifiers.
//!
//! Four styles are supported:
//!
//! | Style         | Text form | Escaping                                   |
//! |---------------|-----------|--------------------------------------------|
//! | `DoubleQuote` | `"`       | unescaped `"` and control characters       |
//! | `SingleQuote` | `'`       | unescaped `'` and control characters       |
//! | `Bracket`     | `[`       | `[` and `]` via [`crate::escape`]          |
//! | `None`        | (empty)   | none, the text is used as is               |
//!
//! The text-keyed entry points ([`quote_string`], [`unquote_string`]) accept
//! any string so that a misconfigured style surfaces as
//! [`QuoteError::UnknownStyle`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::debug;

use crate::escape::{escape_string, unescape_string};

/// Error raised for a quote character outside the supported styles.
///
/// This is a configuration defect, never a consequence of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Unknown quoting style: {0:?}")]
    UnknownStyle(String),
}

/// A delimiting convention for literals and identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuoteStyle {
    DoubleQuote,
    SingleQuote,
    Bracket,
    None,
}

impl QuoteStyle {
    /// The opening delimiter, or the empty string for [`QuoteStyle::None`].
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStyle::DoubleQuote => "\"",
            QuoteStyle::SingleQuote => "'",
            QuoteStyle::Bracket => "[",
            QuoteStyle::None => "",
        }
    }

    /// Quotes `s` in this style. Never fails.
    pub fn quote(&self, s: &str) -> String {
        match self {
            QuoteStyle::DoubleQuote => quote_with(s, '"'),
            QuoteStyle::SingleQuote => quote_with(s, '\''),
            QuoteStyle::Bracket => format!("[{}]", escape_string(s)),
            QuoteStyle::None => s.to_string(),
        }
    }
}

impl FromStr for QuoteStyle {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\"" => Ok(QuoteStyle::DoubleQuote),
            "'" => Ok(QuoteStyle::SingleQuote),
            "[" => Ok(QuoteStyle::Bracket),
            "" => Ok(QuoteStyle::None),
            other => Err(QuoteError::UnknownStyle(other.to_string())),
        }
    }
}

impl TryFrom<String> for QuoteStyle {
    type Error = QuoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuoteStyle> for String {
    fn from(style: QuoteStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Control characters written as two-character escapes inside quotes.
fn escape_control(ch: char) -> Option<&'static str> {
    match ch {
        '\u{8}' => Some("\\b"),
        '\t' => Some("\\t"),
        '\n' => Some("\\n"),
        '\u{c}' => Some("\\f"),
        '\r' => Some("\\r"),
        _ => None,
    }
}

fn unescape_control(ch: char) -> Option<char> {
    match ch {
        'b' => Some('\u{8}'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'f' => Some('\u{c}'),
        'r' => Some('\r'),
        _ => None,
    }
}

fn quote_with(s: &str, quote: char) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push(quote);

    let mut previous = None;
    for ch in s.chars() {
        if ch == quote && previous != Some('\\') {
            result.push('\\');
            result.push(ch);
        } else if let Some(escaped) = escape_control(ch) {
            result.push_str(escaped);
        } else {
            result.push(ch);
        }
        previous = Some(ch);
    }

    result.push(quote);
    result
}

/// Everything between the first and the last character.
fn interior(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

fn unquote_with(s: &str, quote: char) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = interior(s).chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if let Some(control) = unescape_control(next) {
                    result.push(control);
                    chars.next();
                    continue;
                }
                if next == quote {
                    result.push(quote);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(ch);
    }
    result
}

/// Quotes `s` using the style named by `quote`.
///
/// `quote` is one of `"`, `'`, `[` or the empty string (no quoting).
///
/// # Examples
///
/// ```
/// use mbql_expr::quote::quote_string;
///
/// assert_eq!(quote_string(r#"abc "def""#, "\"").unwrap(), r#""abc \"def\"""#);
/// assert_eq!(quote_string("a[b]c", "[").unwrap(), r"[a\[b\]c]");
/// assert_eq!(quote_string("as is", "").unwrap(), "as is");
/// assert!(quote_string("x", "`").is_err());
/// ```
pub fn quote_string(s: &str, quote: &str) -> Result<String, QuoteError> {
    let style: QuoteStyle = quote.parse().inspect_err(|_e| {
        #[cfg(feature = "tracing")]
        debug!(quote, "refusing to quote with unknown style");
    })?;
    Ok(style.quote(s))
}

/// Reverses [`quote_string`], choosing the style from the first character.
///
/// An unquoted (or empty) input has no recognizable style and fails with
/// [`QuoteError::UnknownStyle`].
///
/// # Examples
///
/// ```
/// use mbql_expr::quote::unquote_string;
///
/// assert_eq!(unquote_string(r#""a\tb""#).unwrap(), "a\tb");
/// assert_eq!(unquote_string(r"[Total \[USD\]]").unwrap(), "Total [USD]");
/// ```
pub fn unquote_string(s: &str) -> Result<String, QuoteError> {
    match s.chars().next() {
        Some(quote @ ('"' | '\'')) => Ok(unquote_with(s, quote)),
        Some('[') => Ok(interior(&unescape_string(s)).to_string()),
        first => {
            #[cfg(feature = "tracing")]
            debug!(?first, "refusing to unquote text with unknown style");
            Err(QuoteError::UnknownStyle(
                first.map(String::from).unwrap_or_default(),
            ))
        }
    }
}
