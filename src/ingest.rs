//! Ingestion of `<address> <token>...` text into the store.
//!
//! The same line format feeds two different collections: in
//! [`Mode::Annotate`] the tokens become the address's current annotation,
//! in [`Mode::Tag`] each token is merged into the address's tag set.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::NotesError;
use crate::store::{Address, Annotation, Store, Upsert};

/// How ingested tokens are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Annotate,
    Tag,
}

#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub mode: Mode,
    /// Emit a warning for each line whose first token is not an IPv4 address.
    pub warn_invalid: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Annotate,
            warn_invalid: true,
        }
    }
}

/// Line counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub lines: usize,
    /// Lines that changed the store.
    pub applied: usize,
    /// Well-formed lines that changed nothing.
    pub unchanged: usize,
    /// Blank or address-only lines.
    pub skipped_short: usize,
    /// Lines whose first token is not an IPv4 address.
    pub skipped_invalid: usize,
}

/// Ingest every line of `source` with default options for `mode`.
pub fn ingest<R: BufRead>(source: R, store: &mut Store, mode: Mode) -> io::Result<IngestReport> {
    ingest_with(
        source,
        store,
        IngestOptions {
            mode,
            ..IngestOptions::default()
        },
    )
}

pub fn ingest_with<R: BufRead>(
    source: R,
    store: &mut Store,
    options: IngestOptions,
) -> io::Result<IngestReport> {
    let mut report = IngestReport::default();

    for (index, line) in source.lines().enumerate() {
        let line = line?;
        report.lines += 1;

        let mut tokens = line.split_whitespace();
        let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
            report.skipped_short += 1;
            continue;
        };

        let address = match Address::parse(first) {
            Ok(address) => address,
            Err(_) => {
                if options.warn_invalid {
                    warn!("Line {}: no IPv4 address: {:?}", index + 1, first);
                }
                report.skipped_invalid += 1;
                continue;
            }
        };

        let rest = std::iter::once(second).chain(tokens);
        let changed = match options.mode {
            Mode::Tag => store.merge_tags(address, rest) > 0,
            Mode::Annotate => {
                // Non-empty: `second` is always present
                let Ok(annotation) = Annotation::new(rest) else {
                    report.skipped_short += 1;
                    continue;
                };
                store.upsert_current(address, annotation) != Upsert::Unchanged
            }
        };

        if changed {
            report.applied += 1;
        } else {
            report.unchanged += 1;
        }
    }

    debug!(
        "Ingested {} lines: {} applied, {} unchanged, {} short, {} invalid",
        report.lines,
        report.applied,
        report.unchanged,
        report.skipped_short,
        report.skipped_invalid
    );
    Ok(report)
}

/// Ingest a UTF-8 text file.
pub fn ingest_file(
    path: &Path,
    store: &mut Store,
    options: IngestOptions,
) -> Result<IngestReport, NotesError> {
    let file = File::open(path).map_err(|e| NotesError::io(path, e))?;
    ingest_with(BufReader::new(file), store, options).map_err(|e| NotesError::io(path, e))
}
