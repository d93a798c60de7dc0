use serde::Serialize;
use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::trace;

use crate::ast::{Token, TokenKind};
use crate::quote::unquote_string;

/// A problem found while tokenizing. Tokenizing goes on after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} at position {position}")]
pub struct TokenError {
    pub message: String,
    pub position: usize,
}

/// Tokens of a custom expression plus everything that went wrong.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub errors: Vec<TokenError>,
}

/// Spans and error positions are byte offsets into the source text.
pub struct Lexer {
    input: Vec<(usize, char)>,
    len: usize,
    position: usize,
    errors: Vec<TokenError>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.char_indices().collect(),
            len: input.len(),
            position: 0,
            errors: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.peek_char(0)
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).map(|&(_, ch)| ch)
    }

    /// Byte offset of the current character.
    fn offset(&self) -> usize {
        self.input
            .get(self.position)
            .map_or(self.len, |&(offset, _)| offset)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn error(&mut self, message: impl Into<String>, position: usize) {
        let message = message.into();
        #[cfg(feature = "tracing")]
        trace!(%message, position, "tokenizer error");
        self.errors.push(TokenError { message, position });
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads up to and including the unescaped `close`, returning the raw
    /// text with its delimiters. A missing `close` is reported and supplied.
    fn read_delimited(&mut self, close: char, missing: &str) -> String {
        let start = self.offset();
        let mut raw = String::new();
        raw.extend(self.current_char());
        self.advance();

        while let Some(ch) = self.current_char() {
            raw.push(ch);
            self.advance();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.current_char() {
                        raw.push(escaped);
                        self.advance();
                    }
                }
                c if c == close => return raw,
                _ => {}
            }
        }

        self.error(missing, start);
        raw.push(close);
        raw
    }

    fn read_quoted(&mut self, quote: char) -> TokenKind {
        let raw = self.read_delimited(quote, "Missing closing quotes");
        TokenKind::String(unquote_string(&raw).unwrap_or_default())
    }

    fn read_bracketed(&mut self) -> TokenKind {
        let raw = self.read_delimited(']', "Missing a closing bracket");
        TokenKind::BracketIdentifier(unquote_string(&raw).unwrap_or_default())
    }

    fn read_digits(&mut self, number: &mut String) {
        while let Some(ch) = self.current_char().filter(char::is_ascii_digit) {
            number.push(ch);
            self.advance();
        }
    }

    fn read_number(&mut self) -> TokenKind {
        let start = self.offset();
        let mut number = String::new();
        let mut is_float = false;

        self.read_digits(&mut number);

        if self.current_char() == Some('.') {
            is_float = true;
            number.push('.');
            self.advance();
            self.read_digits(&mut number);
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            let sign = matches!(self.peek_char(1), Some('+' | '-'));
            let digit_at = if sign { 2 } else { 1 };
            if self.peek_char(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                number.push('e');
                self.advance();
                if sign {
                    number.extend(self.current_char());
                    self.advance();
                }
                self.read_digits(&mut number);
            }
        }

        if is_float {
            TokenKind::Float(number.parse::<f64>().unwrap_or_else(|_| {
                self.error(format!("Invalid number '{number}'"), start);
                f64::NAN
            }))
        } else {
            match number.parse::<i64>() {
                Ok(n) => TokenKind::Integer(n),
                // Too large for i64; keep the magnitude.
                Err(_) => TokenKind::Float(number.parse::<f64>().unwrap_or(f64::INFINITY)),
            }
        }
    }

    fn read_operator(&mut self, ch: char) -> Option<TokenKind> {
        let two = self.peek_char(1) == Some('=');
        let op = match ch {
            '+' | '-' | '*' | '/' | '=' => ch.to_string(),
            '<' | '>' if two => {
                self.advance();
                format!("{ch}=")
            }
            '<' | '>' => ch.to_string(),
            '!' if two => {
                self.advance();
                "!=".to_string()
            }
            _ => return None,
        };
        self.advance();
        Some(TokenKind::Operator(op))
    }

    /// Next token, or `None` at the end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();
            let start = self.offset();
            let ch = self.current_char()?;

            let kind = match ch {
                ',' => {
                    self.advance();
                    TokenKind::Comma
                }
                '(' => {
                    self.advance();
                    TokenKind::LParen
                }
                ')' => {
                    self.advance();
                    TokenKind::RParen
                }
                '"' | '\'' => self.read_quoted(ch),
                '[' => self.read_bracketed(),
                ch if ch.is_ascii_digit() => self.read_number(),
                '.' if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
                ch if ch.is_alphabetic() || ch == '_' => {
                    let ident = self.read_identifier();
                    match ident.to_lowercase().as_str() {
                        word @ ("and" | "or" | "not") => TokenKind::Operator(word.to_string()),
                        "true" => TokenKind::Boolean(true),
                        "false" => TokenKind::Boolean(false),
                        _ => TokenKind::Identifier(ident),
                    }
                }
                ch => match self.read_operator(ch) {
                    Some(kind) => kind,
                    None => {
                        self.error(format!("Unexpected character '{ch}'"), start);
                        self.advance();
                        continue;
                    }
                },
            };

            return Some(Token {
                kind,
                start,
                end: self.offset(),
            });
        }
    }

    /// Consumes the lexer, returning every token and error.
    pub fn tokenize(mut self) -> Tokenized {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        Tokenized {
            tokens,
            errors: self.errors,
        }
    }
}

/// Tokenizes custom-expression text.
///
/// # Examples
///
/// ```
/// use mbql_expr::ast::TokenKind;
/// use mbql_expr::lexer::tokenize;
///
/// let result = tokenize("[Price] * 1.1");
/// assert!(result.errors.is_empty());
/// assert_eq!(result.tokens[0].kind, TokenKind::BracketIdentifier("Price".to_string()));
/// assert_eq!(result.tokens[1].kind, TokenKind::Operator("*".to_string()));
/// assert_eq!(result.tokens[2].kind, TokenKind::Float(1.1));
/// ```
pub fn tokenize(source: &str) -> Tokenized {
    Lexer::new(source).tokenize()
}

#[test]
fn test_keywords() {
    let kinds: Vec<_> = tokenize("AND or Not True false")
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Operator("and".to_string()),
            TokenKind::Operator("or".to_string()),
            TokenKind::Operator("not".to_string()),
            TokenKind::Boolean(true),
            TokenKind::Boolean(false),
        ]
    );
}

#[test]
fn test_spans() {
    let tokens = tokenize("concat([A], 'b')").tokens;
    let spans: Vec<_> = tokens.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(spans, vec![(0, 6), (6, 7), (7, 10), (10, 11), (12, 15), (15, 16)]);
}

#[test]
fn test_spans_are_byte_offsets() {
    let source = "[é] + 1";
    let tokens = tokenize(source).tokens;
    let spans: Vec<_> = tokens.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(spans, vec![(0, 4), (5, 6), (7, 8)]);
    assert_eq!(&source[tokens[0].start..tokens[0].end], "[é]");
}
