//! Editor configuration: the reserved-word registry, quoting defaults and
//! foreign-key separators.
//!
//! Every entry point takes an [`ExpressionConfig`] explicitly, so different
//! editor modes can carry different function sets side by side. All types
//! deserialize from JSON with missing fields falling back to the custom
//! expression editor's defaults.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::quote::QuoteStyle;

/// Canonical symbol joining foreign-key path segments in rendered names.
pub const FK_SYMBOL: &str = "→";

const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "=", "!=", "<", ">", "<=", ">=", "and", "or", "not",
];

/// MBQL function names paired with their editor spelling.
const FUNCTIONS: &[(&str, &str)] = &[
    // aggregations
    ("count", "Count"),
    ("cum-count", "CumulativeCount"),
    ("sum", "Sum"),
    ("cum-sum", "CumulativeSum"),
    ("distinct", "Distinct"),
    ("stddev", "StandardDeviation"),
    ("avg", "Average"),
    ("min", "Min"),
    ("max", "Max"),
    ("median", "Median"),
    ("percentile", "Percentile"),
    ("var", "Variance"),
    ("share", "Share"),
    ("count-where", "CountIf"),
    ("sum-where", "SumIf"),
    // strings
    ("lower", "lower"),
    ("upper", "upper"),
    ("substring", "substring"),
    ("regex-match-first", "regexextract"),
    ("concat", "concat"),
    ("replace", "replace"),
    ("trim", "trim"),
    ("rtrim", "rtrim"),
    ("ltrim", "ltrim"),
    ("length", "length"),
    // numbers
    ("abs", "abs"),
    ("floor", "floor"),
    ("ceil", "ceil"),
    ("round", "round"),
    ("sqrt", "sqrt"),
    ("power", "power"),
    ("log", "log"),
    ("exp", "exp"),
    // filters
    ("contains", "contains"),
    ("starts-with", "startsWith"),
    ("ends-with", "endsWith"),
    ("between", "between"),
    ("time-interval", "interval"),
    ("is-null", "isnull"),
    ("not-null", "notnull"),
    ("is-empty", "isempty"),
    ("not-empty", "notempty"),
    // misc
    ("coalesce", "coalesce"),
    ("case", "case"),
];

/// Operator and function names known to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registry {
    pub operators: BTreeSet<String>,
    pub functions: BTreeSet<String>,
    /// MBQL name -> editor name, used when formatting function calls.
    pub display_names: BTreeMap<String, String>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            operators: OPERATORS.iter().map(|op| op.to_string()).collect(),
            functions: FUNCTIONS.iter().map(|(name, _)| name.to_string()).collect(),
            display_names: FUNCTIONS
                .iter()
                .map(|(name, display)| (name.to_string(), display.to_string()))
                .collect(),
        }
    }
}

impl Registry {
    pub fn is_operator(&self, name: &str) -> bool {
        self.operators.contains(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// Case-sensitive membership in the combined operator and function set.
    pub fn is_reserved_word(&self, name: &str) -> bool {
        self.is_operator(name) || self.is_function(name)
    }

    /// Editor spelling of an MBQL function, falling back to the MBQL name.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.display_names
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

/// Quoting defaults for one editor context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Quote identifiers even when they are plain words.
    pub identifier_always_quoted: bool,
    pub identifier_quote_default: QuoteStyle,
    pub literal_quote_default: QuoteStyle,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        QuoteConfig {
            identifier_always_quoted: true,
            identifier_quote_default: QuoteStyle::Bracket,
            literal_quote_default: QuoteStyle::DoubleQuote,
        }
    }
}

/// Foreign-key path separators accepted when parsing dimension names.
///
/// `default` is used when formatting; every entry of `symbols` is tried
/// when parsing, so names written with an older separator still resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separators {
    pub symbols: Vec<String>,
    pub default: String,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            symbols: vec![".".to_string(), format!(" {FK_SYMBOL} ")],
            default: ".".to_string(),
        }
    }
}

/// Everything an entry point needs to know about the editor dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    pub registry: Registry,
    pub quotes: QuoteConfig,
    pub separators: Separators,
}

impl ExpressionConfig {
    /// Loads a configuration from JSON; absent fields keep their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use mbql_expr::config::ExpressionConfig;
    /// use mbql_expr::quote::QuoteStyle;
    ///
    /// let json = r#"{"quotes": {"literal_quote_default": "'"}}"#;
    /// let config = ExpressionConfig::from_json(json).unwrap();
    /// assert_eq!(config.quotes.literal_quote_default, QuoteStyle::SingleQuote);
    /// assert!(config.registry.is_function("count"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[test]
fn test_unknown_quote_style_rejected_at_load() {
    let result = ExpressionConfig::from_json(r#"{"quotes": {"identifier_quote_default": "`"}}"#);
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Unknown quoting style"), "{message}");
}

#[test]
fn test_display_name_fallback() {
    let registry = Registry::default();
    assert_eq!(registry.display_name("cum-sum"), "CumulativeSum");
    assert_eq!(registry.display_name("my-udf"), "my-udf");
}
