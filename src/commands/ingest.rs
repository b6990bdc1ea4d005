//! Ingest command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::ingest::{ingest_file, IngestOptions, IngestReport, Mode};
use crate::store::{Address, Store};

/// Ingest a notes file into the store.
pub fn run(path: &Path, store: &mut Store, mode: Mode, config: &Config) -> Result<IngestReport> {
    if !path.exists() {
        anyhow::bail!("The file at {:?} does not exist", path);
    }

    let options = IngestOptions {
        mode,
        warn_invalid: config.warn_invalid_lines,
    };
    let report = ingest_file(path, store, options)
        .with_context(|| format!("Failed to ingest {:?}", path))?;

    info!(
        "Ingested {:?}: {} updated, {} unchanged, {} skipped",
        path,
        report.applied,
        report.unchanged,
        report.skipped_short + report.skipped_invalid
    );
    Ok(report)
}

/// Drop the history of one address.
pub fn forget_history(address: &str, store: &mut Store) -> Result<usize> {
    let address = Address::parse(address)?;
    let removed = store.forget_history(&address);
    info!("Removed {} history entries for {}", removed, address);
    Ok(removed)
}
