//! CSV rendering of the sample template and of enriched tables.

use super::sample::SAMPLE_ROWS;
use super::schema::{ColumnMapping, Measure};
use super::table::MetricsTable;
use crate::error::{CoreError, Result};

const DERIVED_HEADERS: [&str; 4] = [
    "FollowerGrowthPct",
    "ReachGrowthPct",
    "EngagedGrowthPct",
    "EngagementRatePct",
];

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer.into_inner().map_err(|e| CoreError::Export(e.to_string()))
}

fn export_err(e: csv::Error) -> CoreError {
    CoreError::Export(e.to_string())
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The sample table with canonical headers. Identical bytes on every call.
pub fn sample_csv() -> Result<Vec<u8>> {
    sample_csv_with(&ColumnMapping::default())
}

/// The sample table under the caller's header names.
pub fn sample_csv_with(mapping: &ColumnMapping) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(mapping.headers()).map_err(export_err)?;
    for (month, values) in SAMPLE_ROWS.iter() {
        let mut record = vec![month.to_string()];
        record.extend(values.iter().map(|v| v.to_string()));
        writer.write_record(&record).map_err(export_err)?;
    }
    finish(writer)
}

/// Enriched table as CSV: the seven input columns followed by the four
/// derived indicators. Undefined values are written as empty cells.
pub fn table_csv(table: &MetricsTable, mapping: &ColumnMapping) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = mapping.headers();
    header.extend(DERIVED_HEADERS);
    writer.write_record(&header).map_err(export_err)?;

    for record in table {
        let mut fields = vec![record.row.month.clone()];
        fields.extend(Measure::ALL.iter().map(|m| cell(record.row.get(*m))));
        let d = &record.derived;
        fields.extend([
            cell(d.follower_growth_pct),
            cell(d.reach_growth_pct),
            cell(d.engaged_growth_pct),
            cell(d.engagement_rate_pct),
        ]);
        writer.write_record(&fields).map_err(export_err)?;
    }
    finish(writer)
}
