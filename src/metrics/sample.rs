//! Built-in three-month sample, used both as the ingestion fallback and as
//! the downloadable template.

use super::row::MetricsRow;
use super::table::MetricsTable;
use crate::error::Result;

/// Month, EngagedAccounts, Followers, Reach, Interactions, Likes, Comments
pub const SAMPLE_ROWS: [(&str, [u32; 6]); 3] = [
    ("December", [59, 476, 1322, 125, 95, 30]),
    ("January", [171, 558, 8778, 345, 256, 89]),
    ("February", [286, 728, 10096, 587, 432, 155]),
];

pub fn sample_rows() -> Vec<MetricsRow> {
    SAMPLE_ROWS
        .iter()
        .map(|(month, values)| MetricsRow::observed(*month, values.map(f64::from)))
        .collect()
}

/// The sample as a fully derived table.
pub fn sample_table(reference_year: i32) -> Result<MetricsTable> {
    MetricsTable::build(sample_rows(), reference_year)
}
