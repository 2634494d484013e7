// src/export/stats_export.rs
use crate::models::{Batch, BatchStats};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    country: &'a str,
    customer_type: &'a str,
    total_records: usize,
    empty_emails: usize,
    empty_ratio: f64,
    duplicate_addresses: usize,
    records_blanked: usize,
}

pub fn write_stats_json(
    batch: &Batch,
    stats: &BatchStats,
    dir: &Path,
    pretty: bool,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "{}_{}_stats.json",
        batch.customer_type, batch.country
    ));

    let report = StatsReport {
        country: &batch.country,
        customer_type: &batch.customer_type,
        total_records: stats.total_records,
        empty_emails: stats.empty_emails,
        empty_ratio: stats.empty_ratio(),
        duplicate_addresses: stats.duplicate_addresses,
        records_blanked: stats.records_blanked,
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    std::fs::write(&path, json)?;

    info!("Saved batch statistics to {}", path.display());
    Ok(path)
}
