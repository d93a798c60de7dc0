//! Identifier and literal formatting.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::ExpressionConfig;

fn simple_identifier() -> &'static Regex {
    static SIMPLE: OnceLock<Regex> = OnceLock::new();
    SIMPLE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid identifier pattern"))
}

/// True for a non-empty run of ASCII letters, digits and underscores.
pub fn is_simple_identifier(name: &str) -> bool {
    simple_identifier().is_match(name)
}

/// Formats `name` for the editor, quoting it only when it has to be.
///
/// A name stays bare when the configuration does not force quoting, it is a
/// simple identifier, and it does not collide with an operator or function
/// name. Everything else is quoted with the identifier quote default.
///
/// # Examples
///
/// ```
/// use mbql_expr::config::ExpressionConfig;
/// use mbql_expr::identifier::format_identifier;
///
/// let mut config = ExpressionConfig::default();
/// config.quotes.identifier_always_quoted = false;
///
/// assert_eq!(format_identifier("my_column", &config), "my_column");
/// assert_eq!(format_identifier("count", &config), "[count]");
/// assert_eq!(format_identifier("Order Total", &config), "[Order Total]");
/// ```
pub fn format_identifier(name: &str, config: &ExpressionConfig) -> String {
    let quotes = &config.quotes;
    if !quotes.identifier_always_quoted
        && is_simple_identifier(name)
        && !config.registry.is_reserved_word(name)
    {
        return name.to_string();
    }
    quotes.identifier_quote_default.quote(name)
}

/// Quotes a string literal with the literal quote default.
pub fn format_string_literal(s: &str, config: &ExpressionConfig) -> String {
    config.quotes.literal_quote_default.quote(s)
}

#[test]
fn test_simple_identifier_is_ascii_only() {
    assert!(is_simple_identifier("Total_2"));
    assert!(!is_simple_identifier(""));
    assert!(!is_simple_identifier("prix_é"));
    assert!(!is_simple_identifier("a-b"));
}
