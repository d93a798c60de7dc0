use serde::Serialize;

/// A token of custom-expression text with its byte span, so
/// `&source[token.start..token.end]` is the token's text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    /// Whole number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Integer(i64),

    /// Number with a fraction or an exponent
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// .5
    /// 1e3
    /// ```
    Float(f64),

    /// String literal in single or double quotes, already unquoted
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// 'it\'s'
    /// ```
    String(String),

    /// `True` or `False`, in any letter case
    Boolean(bool),

    /// Bare word: a function name or an unquoted column name
    ///
    /// # Examples
    /// ```text
    /// concat
    /// Total_2
    /// ```
    Identifier(String),

    /// Column, metric or segment name in brackets, already unquoted
    ///
    /// # Examples
    /// ```text
    /// [Order Total]
    /// [Product → Category]
    /// ```
    BracketIdentifier(String),

    /// Arithmetic, comparison or logical operator, in MBQL spelling
    ///
    /// Word operators are lower-cased: `AND` becomes `and`.
    Operator(String),

    /// Comma separating arguments
    Comma,

    /// Left parenthesis
    LParen,

    /// Right parenthesis
    RParen,
}
