//! Text reports over the store.
//!
//! Every report returns its lines instead of printing them, so callers
//! decide where output goes and tests can compare it directly.

use chrono::{DateTime, Local, Utc};
use std::collections::BTreeMap;

use crate::ingest::Mode;
use crate::store::{Address, Store};
use crate::utils::{pad, truncate};

/// Widest dotted-quad: `255.255.255.255`.
pub const ADDRESS_WIDTH: usize = 15;

const COLUMN_GAP: &str = "    ";

fn row(address: &Address, text: &str) -> String {
    format!("{:<width$}{COLUMN_GAP}{}", address.as_str(), text, width = ADDRESS_WIDTH)
}

/// Current annotations in numeric address order.
pub fn dump_current(store: &Store) -> Vec<String> {
    store
        .current()
        .map(|(address, annotation)| row(address, &annotation.to_string()))
        .collect()
}

/// Superseded annotations in numeric address order.
pub fn dump_history(store: &Store) -> Vec<String> {
    store
        .history_sorted()
        .into_iter()
        .map(|entry| row(&entry.address, &entry.annotation.to_string()))
        .collect()
}

/// One line per (address, tag), in numeric address order.
pub fn dump_tags(store: &Store) -> Vec<String> {
    store
        .tags()
        .flat_map(|(address, tags)| tags.iter().map(move |tag| row(address, tag)))
        .collect()
}

/// Current annotations whose address contains `needle`.
pub fn search(store: &Store, needle: &str) -> Vec<String> {
    store
        .find_by_substring(needle)
        .into_iter()
        .map(|(address, annotation)| row(address, &annotation.to_string()))
        .collect()
}

/// Full listing of all three collections with section headers.
pub fn overview(store: &Store, saved_at: Option<DateTime<Utc>>) -> Vec<String> {
    let mut lines = Vec::new();

    match saved_at {
        Some(saved_at) => {
            let local: DateTime<Local> = saved_at.into();
            lines.push(format!("Last saved: {}", local.format("%Y-%m-%d %H:%M:%S")));
        }
        None => lines.push("Last saved: never".to_string()),
    }
    lines.push(String::new());

    section(
        &mut lines,
        "IP dict:",
        '-',
        store
            .current()
            .map(|(address, annotation)| format!("{address}: {annotation}")),
    );
    lines.push(String::new());
    section(
        &mut lines,
        "IP history set:",
        '=',
        store
            .history_sorted()
            .into_iter()
            .map(|entry| format!("{}: {}", entry.address, entry.annotation)),
    );
    lines.push(String::new());
    section(
        &mut lines,
        "Tags:",
        '-',
        store.tags().map(|(address, tags)| {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            format!("{address}: {}", tags.join(", "))
        }),
    );

    lines
}

fn section(lines: &mut Vec<String>, title: &str, rule: char, body: impl Iterator<Item = String>) {
    lines.push(title.to_string());
    lines.push(rule.to_string().repeat(30));
    let start = lines.len();
    lines.extend(body);
    if lines.len() == start {
        lines.push("(empty)".to_string());
    }
}

/// Tag -> addresses carrying it, derived on demand for the summary report.
#[derive(Debug, Default)]
pub struct TagFrequencyIndex {
    entries: BTreeMap<String, Vec<Address>>,
}

impl TagFrequencyIndex {
    /// Build from annotation tokens ([`Mode::Annotate`]) or tag sets ([`Mode::Tag`]).
    pub fn build(store: &Store, mode: Mode) -> Self {
        let mut index = Self::default();
        match mode {
            Mode::Annotate => {
                for (address, annotation) in store.current() {
                    for token in annotation.tokens() {
                        index.add(token, address);
                    }
                }
            }
            Mode::Tag => {
                for (address, tags) in store.tags() {
                    for tag in tags {
                        index.add(tag, address);
                    }
                }
            }
        }
        index
    }

    fn add(&mut self, tag: &str, address: &Address) {
        let addresses = self.entries.entry(tag.to_string()).or_default();
        // Addresses arrive grouped, so a repeated token repeats the last one
        if addresses.last() != Some(address) {
            addresses.push(address.clone());
        }
    }

    /// Tags by descending address count, ties in tag order.
    pub fn ranked(&self) -> Vec<(&str, &[Address])> {
        let mut ranked: Vec<_> = self
            .entries
            .iter()
            .map(|(tag, addresses)| (tag.as_str(), addresses.as_slice()))
            .collect();
        ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SummaryOptions {
    /// Maximum display width of the tag column.
    pub tag_width: usize,
    /// Only show this many tags.
    pub top: Option<usize>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            tag_width: 24,
            top: None,
        }
    }
}

/// Tag frequency table, aligned by display width.
pub fn summary(store: &Store, mode: Mode, options: SummaryOptions) -> Vec<String> {
    let index = TagFrequencyIndex::build(store, mode);
    let width = options.tag_width;

    let mut lines = vec![
        format!("{}  COUNT", pad("TAG", width)),
        format!("{}  {}", "─".repeat(width), "─".repeat(5)),
    ];

    let ranked = index.ranked();
    let limit = options.top.unwrap_or(ranked.len());
    for (tag, addresses) in ranked.into_iter().take(limit) {
        lines.push(format!(
            "{}  {:>5}",
            pad(&truncate(tag, width), width),
            addresses.len()
        ));
    }

    if index.is_empty() {
        lines.push("(empty)".to_string());
    }
    lines
}
