//! # ipnotes - IP annotation store
//!
//! Keeps free-text notes about IPv4 addresses, remembers every note that was
//! replaced, tracks tags per address, and rewrites text streams so every
//! known address carries its note.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ipnotes                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Actions: ingest, substitute, list, erase, reports    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Data-file resolution: flag, config, ./, ~/.ipnotes/  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Ingest                                                     │
//! │    └── "<ip> <token>..." lines -> annotations or tags       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Store                                                      │
//! │    ├── current: address -> latest annotation                │
//! │    ├── history: set of superseded (address, annotation)     │
//! │    └── tags: address -> tag set                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Codec (serde_json + tempfile)                              │
//! │    └── Atomic save, tolerant load of older files            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Report / Substitute (regex, unicode-width)                 │
//! │    ├── Sorted dumps, search, tag frequency summary          │
//! │    └── In-place annotation of IPv4 literals in streams      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use ipnotes::ingest::{ingest, Mode};
//! use ipnotes::store::Store;
//! use ipnotes::substitute::annotate_line;
//!
//! let mut store = Store::new();
//! ingest("192.168.1.1 gateway\n".as_bytes(), &mut store, Mode::Annotate)?;
//!
//! let line = annotate_line(b"ping 192.168.1.1 now", &store);
//! assert_eq!(&line[..], b"ping 192.168.1.1 [gateway] now");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`codec`] - Data file load/save
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and data-file resolution
//! - [`confirm`] - Yes/no confirmation state machine
//! - [`error`] - Error types
//! - [`fs_abstraction`] - Mockable filesystem access
//! - [`ingest`] - Notes file ingestion
//! - [`report`] - Dumps, search and tag summary
//! - [`store`] - The annotation store
//! - [`substitute`] - Stream substitution
//! - [`utils`] - Display-width helpers
//! - [`validation`] - IPv4 validation and scanning

pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fs_abstraction;
pub mod ingest;
pub mod report;
pub mod store;
pub mod substitute;
pub mod utils;
pub mod validation;

pub use cli::Cli;
pub use config::Config;
pub use error::NotesError;
pub use store::{Address, Annotation, HistoryEntry, Store};
