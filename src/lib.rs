pub mod ast;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod escape;
pub mod identifier;
pub mod lexer;
pub mod metadata;
pub mod output;
pub mod query;
pub mod quote;
pub mod resolve;

pub use ast::{Application, Expression, Token, TokenKind};
pub use classify::{
    Classifier, has_options, is_boolean_literal, is_case, is_literal, is_metric,
    is_number_literal, is_segment, is_string_literal,
};
pub use config::{ExpressionConfig, FK_SYMBOL, QuoteConfig, Registry, Separators};
pub use escape::{escape_string, unescape_string};
pub use identifier::{format_identifier, format_string_literal};
pub use lexer::{Lexer, TokenError, Tokenized, tokenize};
pub use metadata::{DimensionOption, Metadata};
pub use output::{ExpressionPrinter, FormatError, format_expression};
pub use query::{Dimension, DimensionResolver, Field, LegacyQuery, Metric, Segment, Table};
pub use quote::{QuoteError, QuoteStyle, quote_string, unquote_string};
pub use resolve::{
    ResolveError, SegmentMatch, format_dimension_name, format_metric_name, format_segment_name,
    get_dimension_name, get_display_name_with_separator, parse_dimension, parse_metric,
    parse_segment,
};
