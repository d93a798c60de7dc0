//! Resolution of metric, segment and dimension names against a query.
//!
//! Name lookups are soft: no match is `None`, never an error. The one hard
//! failure is a query without a source table, which is a caller bug.

use thiserror::Error;
#[cfg(feature = "tracing")]
use tracing::trace;

use crate::config::{ExpressionConfig, FK_SYMBOL, Separators};
use crate::identifier::format_identifier;
use crate::query::{Dimension, Field, LegacyQuery, Metric, Segment, Table};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("query has no source table")]
    MissingTable,
}

/// A segment name resolves either to a segment or to a boolean field
/// standing in for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMatch<'q> {
    Segment(&'q Segment),
    BooleanField(&'q Field),
}

impl SegmentMatch<'_> {
    pub fn name(&self) -> &str {
        match self {
            SegmentMatch::Segment(segment) => &segment.name,
            SegmentMatch::BooleanField(field) => &field.name,
        }
    }
}

fn source_table<Q: LegacyQuery + ?Sized>(query: &Q) -> Result<&Table, ResolveError> {
    query.table().ok_or(ResolveError::MissingTable)
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Finds the metric called `name`, ignoring case.
pub fn parse_metric<'q, Q: LegacyQuery + ?Sized>(
    name: &str,
    query: &'q Q,
) -> Result<Option<&'q Metric>, ResolveError> {
    let table = source_table(query)?;
    Ok(table.metrics.iter().find(|metric| same_name(&metric.name, name)))
}

/// Finds the segment called `name`, ignoring case, then falls back to a
/// boolean field of that name.
pub fn parse_segment<'q, Q: LegacyQuery + ?Sized>(
    name: &str,
    query: &'q Q,
) -> Result<Option<SegmentMatch<'q>>, ResolveError> {
    let table = source_table(query)?;

    if let Some(segment) = table.segments.iter().find(|s| same_name(&s.name, name)) {
        return Ok(Some(SegmentMatch::Segment(segment)));
    }

    Ok(table
        .fields
        .iter()
        .filter(|field| field.is_boolean())
        .find(|field| same_name(&field.name, name))
        .map(SegmentMatch::BooleanField))
}

pub fn format_metric_name(metric: &Metric, config: &ExpressionConfig) -> String {
    format_identifier(&metric.name, config)
}

pub fn format_segment_name(segment: &Segment, config: &ExpressionConfig) -> String {
    format_identifier(&segment.name, config)
}

/// Replaces the canonical ` → ` join in `display_name` with `separator`.
///
/// # Examples
///
/// ```
/// use mbql_expr::resolve::get_display_name_with_separator;
///
/// assert_eq!(get_display_name_with_separator("Product → Category", "."), "Product.Category");
/// ```
pub fn get_display_name_with_separator(display_name: &str, separator: &str) -> String {
    display_name.replace(&format!(" {FK_SYMBOL} "), separator)
}

pub fn get_dimension_name(dimension: &dyn Dimension, separator: &str) -> String {
    get_display_name_with_separator(&dimension.render(), separator)
}

pub fn format_dimension_name(dimension: &dyn Dimension, config: &ExpressionConfig) -> String {
    format_identifier(
        &get_dimension_name(dimension, &config.separators.default),
        config,
    )
}

/// Finds the dimension whose name, under any configured separator, is `name`.
///
/// `reference` is the name of the expression being edited. An
/// expression-backed dimension rendered as `reference` is skipped so an
/// expression never resolves to itself.
pub fn parse_dimension<'q, Q: LegacyQuery + ?Sized>(
    name: &str,
    reference: Option<&str>,
    query: &'q Q,
    separators: &Separators,
) -> Option<&'q dyn Dimension> {
    query
        .dimension_options()
        .into_iter()
        .filter(|dimension| {
            let is_self =
                dimension.is_expression() && Some(dimension.render().as_str()) == reference;
            #[cfg(feature = "tracing")]
            if is_self {
                trace!(name, "skipping self-referencing expression dimension");
            }
            !is_self
        })
        .find(|dimension| {
            separators
                .symbols
                .iter()
                .any(|separator| get_dimension_name(*dimension, separator) == name)
        })
}
