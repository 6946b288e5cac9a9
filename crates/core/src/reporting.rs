//! Denormalized vendor price reports.
//!
//! A report flattens one override into a single row: vendor contact details,
//! the effective price, and the category's ancestor names. The first
//! [`REPORT_LEVELS`] names land in fixed `level1..levelN` columns; the full
//! path is kept alongside so deeper hierarchies are not truncated.

/// Number of fixed level columns on a report row.
pub const REPORT_LEVELS: usize = 5;

/// Spread a root-first path over the fixed level columns.
pub fn level_columns(path: &[String]) -> [Option<String>; REPORT_LEVELS] {
    std::array::from_fn(|i| path.get(i).cloned())
}
