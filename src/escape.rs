//! Bracket escaping for bracket-quoted identifiers.
//!
//! Only `[` and `]` take part in this layer. Control characters are the
//! business of [`crate::quote`] and never reach bracket-quoted text.

/// Precedes every `[` and `]` in `s` with a backslash.
///
/// # Examples
///
/// ```
/// use mbql_expr::escape::escape_string;
///
/// assert_eq!(escape_string("Total [USD]"), r"Total \[USD\]");
/// assert_eq!(escape_string(r"a\b"), r"a\b");
/// ```
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '[' | ']') {
            result.push('\\');
        }
        result.push(ch);
    }
    result
}

/// Reverses [`escape_string`].
///
/// A backslash directly in front of `[` or `]` is dropped; the bracket
/// itself is kept. Every other backslash is copied through unchanged.
///
/// # Examples
///
/// ```
/// use mbql_expr::escape::unescape_string;
///
/// assert_eq!(unescape_string(r"Total \[USD\]"), "Total [USD]");
/// assert_eq!(unescape_string(r"tab\t"), r"tab\t");
/// ```
pub fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && matches!(chars.peek(), Some('[' | ']')) {
            continue;
        }
        result.push(ch);
    }
    result
}

#[test]
fn test_escape_leaves_other_backslashes() {
    assert_eq!(escape_string(r"\n[x]"), r"\n\[x\]");
    assert_eq!(unescape_string(r"\n\[x\]"), r"\n[x]");
}

#[test]
fn test_escaped_backslash_before_bracket() {
    let original = r"a\[";
    let escaped = escape_string(original);
    assert_eq!(escaped, r"a\\[");
    assert_eq!(unescape_string(&escaped), original);
}
