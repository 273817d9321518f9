//! Dashboard Core CLI
//!
//! Runs the engine calculator and the metrics pipeline from the terminal:
//! - `engine`: displacement, R/L ratio and geometry class
//! - `ingest`: enrich a monthly metrics CSV (or fall back to the sample)
//! - `template`: print the sample CSV
//! - `digest`: print the stored form of a password

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use dashboard_core::auth::PasswordDigest;
use dashboard_core::config::{ConfigManager, DashboardConfig};
use dashboard_core::engine::EngineSpec;
use dashboard_core::metrics::{self, ColumnMapping, MetricsTable, RawInput};
use dashboard_core::utils::init_logging;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Engine calculator and monthly metrics pipeline")]
struct Args {
    /// JSON config file (created with defaults if missing)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute displacement and geometry class
    Engine {
        /// Piston bore in mm
        #[arg(long, default_value = "80.0")]
        bore: f64,
        /// Crankshaft stroke in mm
        #[arg(long, default_value = "70.0")]
        stroke: f64,
        /// Number of cylinders
        #[arg(long, default_value = "4")]
        cylinders: u32,
    },
    /// Ingest a metrics CSV and print the enriched table
    Ingest {
        /// Input CSV; the sample table is used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Write the enriched table as CSV instead of the text report
        #[arg(long)]
        csv: bool,
    },
    /// Print the sample table as CSV
    Template {
        /// Use the Portuguese column headers
        #[arg(long)]
        portuguese: bool,
    },
    /// Print the SHA-256 digest a password is stored as
    Digest { password: String },
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    let config = match path {
        Some(path) => ConfigManager::new(path).load()?,
        None => DashboardConfig::default(),
    };
    Ok(config.apply_env_overrides())
}

fn fmt_opt(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, suffix),
        None => "-".to_string(),
    }
}

fn print_table(table: &MetricsTable) {
    println!(
        "{:<12} {:>8} {:>9} {:>8} {:>8} {:>9} {:>9} {:>9} {:>9}",
        "Month", "Engaged", "Followers", "Reach", "Inter.", "Foll. Δ", "Reach Δ", "Eng. Δ", "Eng. rate"
    );
    for record in table {
        let row = &record.row;
        let d = &record.derived;
        println!(
            "{:<12} {:>8} {:>9} {:>8} {:>8} {:>9} {:>9} {:>9} {:>9}",
            row.month,
            fmt_opt(row.engaged_accounts, ""),
            fmt_opt(row.followers, ""),
            fmt_opt(row.reach, ""),
            fmt_opt(row.interactions, ""),
            fmt_opt(d.follower_growth_pct, "%"),
            fmt_opt(d.reach_growth_pct, "%"),
            fmt_opt(d.engaged_growth_pct, "%"),
            fmt_opt(d.engagement_rate_pct, "%"),
        );
    }

    let summary = table.summary();
    println!("{}", "─".repeat(60));
    println!(
        "{} → {} ({} months) | followers {} | reach {} | mean engagement {}",
        summary.first_month,
        summary.last_month,
        summary.months,
        fmt_opt(summary.follower_growth_pct, "%"),
        fmt_opt(summary.reach_growth_pct, "%"),
        fmt_opt(summary.mean_engagement_rate_pct, "%"),
    );
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    init_logging(&config.log_filter);

    match args.command {
        Command::Engine { bore, stroke, cylinders } => {
            let result = EngineSpec::new(bore, stroke, cylinders)?.evaluate()?;
            println!("Displacement : {} cc", result.displacement_cc);
            println!("R/L ratio    : {}", result.ratio);
            println!("Engine type  : {} ({})", result.class, result.class.label_pt());
        }
        Command::Ingest { file, csv } => {
            let bytes = match &file {
                Some(path) => Some(
                    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => None,
            };
            let input = bytes.as_deref().map(RawInput::Csv);
            let ingestion = metrics::ingest(input, &config.ingest_options())?;

            if let Some(reason) = &ingestion.fallback {
                eprintln!("⚠️  Showing sample data: {}", reason);
            }
            info!("Table ready with {} month(s)", ingestion.table.len());

            if csv {
                let out = metrics::table_csv(&ingestion.table, &config.columns)?;
                std::io::stdout().write_all(&out)?;
            } else {
                print_table(&ingestion.table);
            }
        }
        Command::Template { portuguese } => {
            let mapping = if portuguese { ColumnMapping::portuguese() } else { config.columns.clone() };
            let out = metrics::sample_csv_with(&mapping)?;
            std::io::stdout().write_all(&out)?;
        }
        Command::Digest { password } => {
            println!("{}", PasswordDigest::of(&password));
        }
    }

    Ok(())
}
