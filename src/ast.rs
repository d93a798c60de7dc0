//! # Custom Expressions - Syntax Trees
//!
//! Two shapes of the same expression language live here:
//!
//! - **[tokens]** - Tokens of editor text, produced by [`crate::lexer`]
//! - **[expressions]** - Classified MBQL values, produced by
//!   [`crate::classify`]
//!
//! ## MBQL Shape
//!
//! MBQL writes expressions as nested JSON arrays with the clause name in
//! head position and an optional options object last:
//!
//! ```text
//! ["+", ["field", 1, null], 10]
//! ["contains", ["field", 2, null], "abc", {"case-sensitive": false}]
//! ["metric", 5]
//! ["case", [[["<", ["field", 1, null], 10], "low"]], {"default": "high"}]
//! ```
//!
//! ## Editor Shape
//!
//! The same expressions as the editor shows them:
//!
//! ```text
//! [Price] + 10
//! contains([Title], "abc")
//! [Revenue]
//! case([Price] < 10, "low", "high")
//! ```
pub mod expressions;
pub mod tokens;

pub use expressions::{Application, Expression};
pub use tokens::{Token, TokenKind};
