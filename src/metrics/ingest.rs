//! Raw table ingestion with observable fallback to the sample table.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::calendar::DEFAULT_REFERENCE_YEAR;
use super::row::{parse_measure, MetricsRow};
use super::sample::sample_table;
use super::schema::{ColumnMapping, Measure};
use super::table::MetricsTable;
use crate::error::{CoreError, Result};

/// An already-parsed, row-oriented table of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new<H, R>(header: H, rows: Vec<R>) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Parse UTF-8 CSV bytes. The first record is the header.
    pub fn from_csv(bytes: &[u8]) -> Result<Self> {
        let parse_err = |e: csv::Error| CoreError::ParseFailure(e.to_string());
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let header: Vec<String> = reader.headers().map_err(parse_err)?.iter().map(str::to_string).collect();
        if header.iter().all(|h| h.is_empty()) {
            return Err(CoreError::ParseFailure("input is empty".to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(parse_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { header, rows })
    }
}

/// What the caller handed to [`ingest`].
#[derive(Debug, Clone, Copy)]
pub enum RawInput<'a> {
    Csv(&'a [u8]),
    Table(&'a RawTable),
}

/// Why the built-in sample was used instead of the caller's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    NoInput,
    ParseFailure(String),
    /// Canonical names of the absent columns
    MissingColumns(Vec<String>),
}

impl FallbackReason {
    /// The error this fallback stands in for, if any.
    pub fn as_error(&self) -> Option<CoreError> {
        match self {
            FallbackReason::NoInput => None,
            FallbackReason::ParseFailure(detail) => Some(CoreError::ParseFailure(detail.clone())),
            FallbackReason::MissingColumns(names) => Some(CoreError::MissingColumns(names.clone())),
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_error() {
            None => write!(f, "no input table supplied"),
            Some(err) => write!(f, "{}", err),
        }
    }
}

/// Knobs supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOptions {
    pub columns: ColumnMapping,
    pub reference_year: i32,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

/// Result of one ingestion call.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingestion {
    pub table: MetricsTable,
    /// Set when `table` is the built-in sample
    pub fallback: Option<FallbackReason>,
}

impl Ingestion {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

fn fall_back(reason: FallbackReason, options: &IngestOptions) -> Result<Ingestion> {
    warn!("Using sample table: {}", reason);
    Ok(Ingestion {
        table: sample_table(options.reference_year)?,
        fallback: Some(reason),
    })
}

/// Turn raw input into a validated, ordered, enriched table.
///
/// Missing input, unreadable input and missing columns fall back to the
/// sample table and report why. An unresolvable month label or a column
/// mapping with a shared header is an error: no table is returned.
pub fn ingest(input: Option<RawInput<'_>>, options: &IngestOptions) -> Result<Ingestion> {
    options.columns.validate()?;

    let parsed;
    let raw: &RawTable = match input {
        None => return fall_back(FallbackReason::NoInput, options),
        Some(RawInput::Table(table)) => table,
        Some(RawInput::Csv(bytes)) => match RawTable::from_csv(bytes) {
            Ok(table) => {
                parsed = table;
                &parsed
            }
            Err(err) => return fall_back(FallbackReason::ParseFailure(err.to_string()), options),
        },
    };

    let positions = match options.columns.locate(raw.header.as_slice()) {
        Ok(positions) => positions,
        Err(missing) => return fall_back(FallbackReason::MissingColumns(missing), options),
    };

    if raw.rows.is_empty() {
        return fall_back(FallbackReason::ParseFailure("table has no data rows".to_string()), options);
    }

    let mut coerced = 0usize;
    let rows: Vec<MetricsRow> = raw
        .rows
        .iter()
        .map(|cells| {
            let cell = |idx: usize| cells.get(idx).map(String::as_str).unwrap_or("");
            let mut row = MetricsRow {
                month: cell(positions[0]).trim().to_string(),
                engaged_accounts: None,
                followers: None,
                reach: None,
                interactions: None,
                likes: None,
                comments: None,
            };
            for (slot, measure) in Measure::ALL.iter().enumerate() {
                let value = parse_measure(cell(positions[slot + 1]));
                if value.is_none() {
                    coerced += 1;
                    debug!(month = %row.month, column = measure.column().canonical_name(), "cell treated as missing");
                }
                row.set(*measure, value);
            }
            row
        })
        .collect();

    if coerced > 0 {
        warn!("{} measure cell(s) were not valid non-negative numbers and are treated as missing", coerced);
    }

    let table = MetricsTable::build(rows, options.reference_year)?;
    info!("Ingested metrics table with {} month(s)", table.len());
    Ok(Ingestion { table, fallback: None })
}

/// Convenience wrapper for CSV bytes.
pub fn ingest_csv(bytes: &[u8], options: &IngestOptions) -> Result<Ingestion> {
    ingest(Some(RawInput::Csv(bytes)), options)
}
