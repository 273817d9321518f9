//! Chronologically ordered, enriched metrics table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::resolve_month_in;
use super::row::{growth_pct, DerivedField, DerivedMetrics, MetricsRow};
use super::schema::Measure;
use crate::error::{CoreError, Result};

/// A row together with its resolved month and derived indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// First day of the resolved calendar month
    pub period: NaiveDate,
    pub row: MetricsRow,
    pub derived: DerivedMetrics,
}

/// Immutable table built once per ingestion.
///
/// Invariant: records are sorted ascending by `period` and never empty.
/// Deserialized tables are rebuilt from their rows to keep it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredTable")]
pub struct MetricsTable {
    records: Vec<MetricsRecord>,
    reference_year: i32,
}

/// Serialized shape of a [`MetricsTable`], before validation.
#[derive(Deserialize)]
struct StoredTable {
    records: Vec<MetricsRecord>,
    reference_year: i32,
}

impl TryFrom<StoredTable> for MetricsTable {
    type Error = CoreError;

    fn try_from(stored: StoredTable) -> Result<Self> {
        let rows = stored.records.into_iter().map(|record| record.row).collect();
        MetricsTable::build(rows, stored.reference_year)
    }
}

/// Headline figures comparing the first and last months of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub first_month: String,
    pub last_month: String,
    pub months: usize,
    pub follower_growth_pct: Option<f64>,
    pub reach_growth_pct: Option<f64>,
    pub engaged_growth_pct: Option<f64>,
    /// Mean over the months where the rate is defined
    pub mean_engagement_rate_pct: Option<f64>,
}

impl MetricsTable {
    /// Resolve, sort and derive. Fails on the first unresolvable month label
    /// or when `rows` is empty; no partial table is produced.
    pub fn build(rows: Vec<MetricsRow>, reference_year: i32) -> Result<Self> {
        if rows.is_empty() {
            return Err(CoreError::ParseFailure("table has no data rows".to_string()));
        }

        let mut dated = rows
            .into_iter()
            .map(|row| resolve_month_in(&row.month, reference_year).map(|period| (period, row)))
            .collect::<Result<Vec<_>>>()?;

        // Stable: rows sharing a month keep their input order.
        dated.sort_by_key(|(period, _)| *period);

        let mut records: Vec<MetricsRecord> = Vec::with_capacity(dated.len());
        for (period, row) in dated {
            let derived = DerivedMetrics::derive(records.last().map(|prev| &prev.row), &row);
            records.push(MetricsRecord { period, row, derived });
        }

        debug!(rows = records.len(), "built metrics table");
        Ok(Self { records, reference_year })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in chronological order. Each call starts a fresh iterator.
    pub fn all_rows(&self) -> impl Iterator<Item = &MetricsRecord> + '_ {
        self.records.iter()
    }

    /// Earliest month in the table.
    pub fn first_month(&self) -> &MetricsRecord {
        // build() rejects empty input
        &self.records[0]
    }

    pub fn last_month(&self) -> &MetricsRecord {
        &self.records[self.records.len() - 1]
    }

    /// Look up a month by any accepted spelling of its label.
    ///
    /// When several rows resolve to the same month the first one is returned.
    pub fn rows_for(&self, month_label: &str) -> Result<&MetricsRecord> {
        let not_found = || CoreError::NotFound(month_label.to_string());
        let period = resolve_month_in(month_label, self.reference_year).map_err(|_| not_found())?;
        self.records
            .iter()
            .find(|record| record.period == period)
            .ok_or_else(not_found)
    }

    /// Month labels in chronological order.
    pub fn months(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.row.month.as_str()).collect()
    }

    /// `(month, value)` pairs of one measure, for plotting.
    pub fn series(&self, measure: Measure) -> Vec<(String, Option<f64>)> {
        self.records
            .iter()
            .map(|r| (r.row.month.clone(), r.row.get(measure)))
            .collect()
    }

    /// `(month, value)` pairs of one derived indicator.
    pub fn derived_series(&self, field: DerivedField) -> Vec<(String, Option<f64>)> {
        self.records
            .iter()
            .map(|r| (r.row.month.clone(), r.derived.get(field)))
            .collect()
    }

    pub fn summary(&self) -> TableSummary {
        let first = &self.first_month().row;
        let last = &self.last_month().row;
        let overall = |measure: Measure| {
            if self.records.len() < 2 {
                None
            } else {
                growth_pct(first.get(measure), last.get(measure))
            }
        };

        let rates: Vec<f64> = self
            .records
            .iter()
            .filter_map(|r| r.derived.engagement_rate_pct)
            .collect();
        let mean_engagement_rate_pct = if rates.is_empty() {
            None
        } else {
            Some(rates.iter().sum::<f64>() / rates.len() as f64)
        };

        TableSummary {
            first_month: first.month.clone(),
            last_month: last.month.clone(),
            months: self.records.len(),
            follower_growth_pct: overall(Measure::Followers),
            reach_growth_pct: overall(Measure::Reach),
            engaged_growth_pct: overall(Measure::EngagedAccounts),
            mean_engagement_rate_pct,
        }
    }
}

impl<'a> IntoIterator for &'a MetricsTable {
    type Item = &'a MetricsRecord;
    type IntoIter = std::slice::Iter<'a, MetricsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::calendar::DEFAULT_REFERENCE_YEAR;

    fn rows() -> Vec<MetricsRow> {
        vec![
            MetricsRow::observed("Fevereiro", [286.0, 728.0, 10096.0, 587.0, 432.0, 155.0]),
            MetricsRow::observed("Dezembro", [59.0, 476.0, 1322.0, 125.0, 95.0, 30.0]),
            MetricsRow::observed("Janeiro", [171.0, 558.0, 8778.0, 345.0, 256.0, 89.0]),
        ]
    }

    #[test]
    fn test_build_sorts_chronologically() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        assert_eq!(table.months(), vec!["Dezembro", "Janeiro", "Fevereiro"]);
        assert_eq!(table.first_month().row.month, "Dezembro");
    }

    #[test]
    fn test_growth_uses_sorted_predecessor() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        let jan = table.rows_for("jan").unwrap();
        let growth = jan.derived.follower_growth_pct.unwrap();
        assert!((growth - 17.2268907563).abs() < 1e-6);
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(MetricsTable::build(Vec::new(), DEFAULT_REFERENCE_YEAR).is_err());
    }

    #[test]
    fn test_rows_for_unknown_month() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        assert_eq!(table.rows_for("Março"), Err(CoreError::NotFound("Março".to_string())));
        assert_eq!(table.rows_for("Smarch"), Err(CoreError::NotFound("Smarch".to_string())));
    }

    #[test]
    fn test_stable_sort_for_duplicate_months() {
        let mut input = rows();
        input.push(MetricsRow::observed("Dec", [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]));
        let table = MetricsTable::build(input, DEFAULT_REFERENCE_YEAR).unwrap();
        assert_eq!(table.months(), vec!["Dezembro", "Dec", "Janeiro", "Fevereiro"]);
        assert_eq!(table.rows_for("December").unwrap().row.month, "Dezembro");
    }

    #[test]
    fn test_deserialize_empty_table_fails() {
        let result = serde_json::from_str::<MetricsTable>(r#"{"records":[],"reference_year":2025}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rebuilds_order_and_derived() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        let mut value = serde_json::to_value(&table).unwrap();
        let records = value["records"].as_array_mut().unwrap();
        records.reverse();
        records[0]["derived"]["follower_growth_pct"] = serde_json::json!(999.0);

        let restored: MetricsTable = serde_json::from_value(value).unwrap();
        assert_eq!(restored, table);
        assert_eq!(restored.first_month().row.month, "Dezembro");
    }

    #[test]
    fn test_summary() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        let summary = table.summary();
        assert_eq!(summary.first_month, "Dezembro");
        assert_eq!(summary.last_month, "Fevereiro");
        assert_eq!(summary.months, 3);
        let followers = summary.follower_growth_pct.unwrap();
        assert!((followers - (728.0 - 476.0) / 476.0 * 100.0).abs() < 1e-9);
        assert!(summary.mean_engagement_rate_pct.is_some());
    }

    #[test]
    fn test_series_in_chronological_order() {
        let table = MetricsTable::build(rows(), DEFAULT_REFERENCE_YEAR).unwrap();
        let reach = table.series(Measure::Reach);
        assert_eq!(reach[0], ("Dezembro".to_string(), Some(1322.0)));
        let growth = table.derived_series(DerivedField::ReachGrowth);
        assert_eq!(growth[0].1, None);
        assert!(growth[2].1.is_some());
    }
}
