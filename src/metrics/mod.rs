//! Metrics Table Pipeline
//!
//! ingest -> validate -> order chronologically -> derive -> query.
//!
//! Every call builds a new immutable [`MetricsTable`]; nothing is cached
//! between calls.

pub mod calendar;
mod export;
mod ingest;
mod row;
mod sample;
mod schema;
mod table;

pub use calendar::{normalize_label, resolve_month, resolve_month_in, DEFAULT_REFERENCE_YEAR};
pub use export::{sample_csv, sample_csv_with, table_csv};
pub use ingest::{ingest, ingest_csv, FallbackReason, IngestOptions, Ingestion, RawInput, RawTable};
pub use row::{growth_pct, parse_measure, DerivedField, DerivedMetrics, MetricsRow};
pub use sample::{sample_rows, sample_table, SAMPLE_ROWS};
pub use schema::{Column, ColumnMapping, Measure};
pub use table::{MetricsRecord, MetricsTable, TableSummary};
