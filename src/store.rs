//! The annotation store: current annotations, superseded history and tags.
//!
//! One [`Store`] value owns all three collections and is passed explicitly
//! to every operation that reads or mutates it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::debug;

use crate::error::NotesError;
use crate::validation::validate_ipv4;

/// A validated dotted-quad IPv4 address, kept in its textual form.
///
/// Equality and hashing are on the text; ordering is numeric, so
/// `9.0.0.1 < 10.0.0.1`. Both agree because only canonical dotted-quads
/// pass validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Validate and wrap an address.
    pub fn parse(text: &str) -> Result<Self, NotesError> {
        validate_ipv4(text)?;
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form used for ordering.
    pub fn to_ipv4(&self) -> Ipv4Addr {
        // Validated on construction
        self.0.parse().unwrap_or(Ipv4Addr::UNSPECIFIED)
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_ipv4().cmp(&other.to_ipv4())
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = NotesError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        validate_ipv4(&text)?;
        Ok(Self(text))
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// A non-empty, ordered sequence of free-text tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Annotation(Vec<String>);

impl Annotation {
    pub fn new<I, S>(tokens: I) -> Result<Self, NotesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_from(tokens.into_iter().map(Into::into).collect::<Vec<_>>())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

impl TryFrom<Vec<String>> for Annotation {
    type Error = NotesError;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        if tokens.is_empty() {
            return Err(NotesError::EmptyAnnotation);
        }
        Ok(Self(tokens))
    }
}

impl From<Annotation> for Vec<String> {
    fn from(annotation: Annotation) -> Self {
        annotation.0
    }
}

/// A superseded annotation, identified by the full (address, annotation) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub address: Address,
    pub annotation: Annotation,
}

/// What [`Store::upsert_current`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The address had no annotation yet.
    Inserted,
    /// The previous annotation moved to history.
    Superseded,
    /// The stored annotation was already identical.
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    current: BTreeMap<Address, Annotation>,
    history: HashSet<HistoryEntry>,
    tags: BTreeMap<Address, BTreeSet<String>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        current: BTreeMap<Address, Annotation>,
        history: HashSet<HistoryEntry>,
        tags: BTreeMap<Address, BTreeSet<String>>,
    ) -> Self {
        Self {
            current,
            history,
            tags,
        }
    }

    /// Record the latest annotation for an address.
    ///
    /// A differing previous annotation is moved into history. Recording the
    /// same superseded pair twice leaves a single history entry.
    pub fn upsert_current(&mut self, address: Address, annotation: Annotation) -> Upsert {
        match self.current.get_mut(&address) {
            None => {
                self.current.insert(address, annotation);
                Upsert::Inserted
            }
            Some(existing) if *existing == annotation => Upsert::Unchanged,
            Some(existing) => {
                let old = std::mem::replace(existing, annotation);
                debug!("Superseding annotation of {}: {}", address, old);
                self.history.insert(HistoryEntry {
                    address,
                    annotation: old,
                });
                Upsert::Superseded
            }
        }
    }

    /// Add tags to an address's tag set. Returns how many were new.
    pub fn merge_tags<I, S>(&mut self, address: Address, tags: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = self.tags.entry(address).or_default();
        let mut added = 0;
        for tag in tags {
            if set.insert(tag.into()) {
                added += 1;
            }
        }
        added
    }

    /// Unconditionally clear current annotations, history and tags.
    pub fn erase_all(&mut self) {
        self.current.clear();
        self.history.clear();
        self.tags.clear();
    }

    /// Remove every history entry for one address. Returns the number removed.
    pub fn forget_history(&mut self, address: &Address) -> usize {
        let before = self.history.len();
        self.history.retain(|entry| entry.address != *address);
        before - self.history.len()
    }

    /// Current entries whose address contains `needle`, in address order.
    pub fn find_by_substring(&self, needle: &str) -> Vec<(&Address, &Annotation)> {
        self.current
            .iter()
            .filter(|(address, _)| address.as_str().contains(needle))
            .collect()
    }

    /// Current annotation of an address given as text, if it is annotated.
    pub fn annotation_of(&self, text: &str) -> Option<&Annotation> {
        let address = Address::parse(text).ok()?;
        self.current.get(&address)
    }

    /// Current annotations in numeric address order.
    pub fn current(&self) -> impl Iterator<Item = (&Address, &Annotation)> {
        self.current.iter()
    }

    /// History entries in no particular order.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// History sorted by numeric address, ties broken by annotation.
    pub fn history_sorted(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<_> = self.history.iter().collect();
        entries.sort_by(|a, b| {
            a.address
                .cmp(&b.address)
                .then_with(|| a.annotation.cmp(&b.annotation))
        });
        entries
    }

    /// Tag sets in numeric address order.
    pub fn tags(&self) -> impl Iterator<Item = (&Address, &BTreeSet<String>)> {
        self.tags.iter()
    }

    pub(crate) fn current_map(&self) -> &BTreeMap<Address, Annotation> {
        &self.current
    }

    pub(crate) fn history_set(&self) -> &HashSet<HistoryEntry> {
        &self.history
    }

    pub(crate) fn tag_map(&self) -> &BTreeMap<Address, BTreeSet<String>> {
        &self.tags
    }

    /// Number of annotated addresses.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of addresses carrying at least one tag.
    pub fn tag_len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.history.is_empty() && self.tags.is_empty()
    }
}
