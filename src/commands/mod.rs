//! CLI command implementations.
//!
//! [`run`] executes the requested actions in a fixed order against one
//! store loaded at the start:
//! load, ingest, forget-history, substitute, list, erase, reports, save.

pub mod erase;
pub mod ingest;
pub mod report;
pub mod substitute;

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::Cli;
use crate::codec;
use crate::config::{home_dir, resolve_data_path, Config};
use crate::ingest::Mode;

/// Mode selected by `--tag`.
pub fn mode(cli: &Cli) -> Mode {
    if cli.tag {
        Mode::Tag
    } else {
        Mode::Annotate
    }
}

/// Data file for this run.
pub fn data_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    resolve_data_path(
        cli.data_file.as_deref(),
        config.data_file.as_deref(),
        &cwd,
        home_dir().as_deref(),
    )
}

/// Run every action requested on the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let home = home_dir();
    let config = Config::load_or_default(cli.config.as_deref(), home.as_deref())?;
    let path = data_path(cli, &config)?;
    debug!("Using data file {:?}", path);

    let snapshot = codec::load_snapshot(&path)
        .with_context(|| format!("Failed to load data file: {:?}", path))?;
    let saved_at = snapshot.saved_at;
    let mut store = snapshot.store;
    let mut dirty = false;

    if let Some(ip_file) = &cli.ip_file {
        ingest::run(ip_file, &mut store, mode(cli), &config)?;
        dirty = true;
    }

    if let Some(address) = &cli.forget_history {
        ingest::forget_history(address, &mut store)?;
        dirty = true;
    }

    if cli.interactive {
        substitute::run(&store)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        report::print(&mut out, report::overview(&store, saved_at))?;
    }

    if cli.erase {
        let stdin = io::stdin();
        erase::run(
            &mut store,
            &path,
            &mut crate::confirm::LineSource::new(stdin.lock()),
            &mut out,
        )?;
    }

    report::run(&mut out, cli, &store, &config)?;
    out.flush()?;

    if dirty {
        codec::save(&path, &store)
            .with_context(|| format!("Failed to save data file: {:?}", path))?;
        debug!("Saved data file {:?}", path);
    }

    Ok(())
}
