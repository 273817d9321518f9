//! Dashboard Core
//!
//! Computation behind the engine calculator and the monthly metrics
//! dashboards:
//! - Engine parameters (displacement, bore/stroke ratio, classification)
//! - Metrics table pipeline (ingest, validate, order, derive, query)
//! - Credential gate over an external store
//!
//! Rendering, widgets and storage live with the caller.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod utils;

// Re-exports for convenience
pub use engine::{EngineClass, EngineResult, EngineSpec};
pub use error::{CoreError, Result};
pub use metrics::{ingest, Ingestion, MetricsTable};
