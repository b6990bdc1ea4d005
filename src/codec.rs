//! Persistence of the whole [`Store`] as one JSON document.
//!
//! The document holds the current annotations, the history and the tag map.
//! Files written before the tag map existed still load; their tag map is
//! empty. A missing file loads as an empty store, a present but unreadable
//! or malformed one is an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::debug;

use crate::error::NotesError;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::store::{Address, Annotation, HistoryEntry, Store};

/// On-disk layout, as read back.
#[derive(Deserialize)]
struct StoreFile {
    current: BTreeMap<Address, Annotation>,
    history: HashSet<HistoryEntry>,
    #[serde(default)]
    tags: BTreeMap<Address, BTreeSet<String>>,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

/// On-disk layout, as written.
#[derive(Serialize)]
struct StoreFileRef<'a> {
    current: &'a BTreeMap<Address, Annotation>,
    history: Vec<&'a HistoryEntry>,
    tags: &'a BTreeMap<Address, BTreeSet<String>>,
    saved_at: DateTime<Utc>,
}

/// A loaded store plus the time it was last written, if recorded.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub store: Store,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Load a store from disk. A missing file yields an empty store.
pub fn load(path: &Path) -> Result<Store, NotesError> {
    load_with(real_fs(), path).map(|snapshot| snapshot.store)
}

/// Load a store together with its save timestamp.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, NotesError> {
    load_with(real_fs(), path)
}

pub fn load_with<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Snapshot, NotesError> {
    if !fs.exists(path) {
        debug!("No data file at {:?}, starting empty", path);
        return Ok(Snapshot::default());
    }

    let content = fs
        .read_to_string(path)
        .map_err(|e| NotesError::io(path, e))?;
    let file: StoreFile =
        serde_json::from_str(&content).map_err(|e| NotesError::CorruptStore {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(
        "Loaded {} annotations, {} history entries, {} tagged addresses from {:?}",
        file.current.len(),
        file.history.len(),
        file.tags.len(),
        path
    );

    Ok(Snapshot {
        store: Store::from_parts(file.current, file.history, file.tags),
        saved_at: file.saved_at,
    })
}

/// Write a store to disk, replacing any previous file atomically.
pub fn save(path: &Path, store: &Store) -> Result<(), NotesError> {
    save_with(real_fs(), path, store)
}

pub fn save_with<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    store: &Store,
) -> Result<(), NotesError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !fs.exists(parent) {
            fs.create_dir_all(parent)
                .map_err(|e| NotesError::io(parent, e))?;
        }
    }

    let file = StoreFileRef {
        current: store.current_map(),
        history: store.history_sorted(),
        tags: store.tag_map(),
        saved_at: Utc::now(),
    };
    let content = serde_json::to_string_pretty(&file).map_err(|e| NotesError::CorruptStore {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs.write_atomic(path, content.as_bytes())
        .map_err(|e| NotesError::io(path, e))?;

    debug!(
        "Saved {} annotations, {} history entries to {:?}",
        store.len(),
        store.history_set().len(),
        path
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_abstraction::MockFileSystem;
    use std::io;
    use tempfile::tempdir;

    fn sample_store() -> Store {
        let mut store = Store::new();
        let gw = Address::parse("192.168.1.1").unwrap();
        store.upsert_current(gw.clone(), Annotation::new(["old", "router"]).unwrap());
        store.upsert_current(gw.clone(), Annotation::new(["gateway"]).unwrap());
        store.upsert_current(
            Address::parse("10.0.0.1").unwrap(),
            Annotation::new(["nas", "备份"]).unwrap(),
        );
        store.merge_tags(gw, ["lan", "critical"]);
        store
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotes.json");
        let store = sample_store();

        save(&path, &store).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_roundtrip_records_saved_at() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotes.json");

        save(&path, &Store::new()).unwrap();
        let snapshot = load_snapshot(&path).unwrap();

        assert!(snapshot.saved_at.is_some());
        assert!(snapshot.store.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_old_schema_without_tags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.json");
        std::fs::write(
            &path,
            r#"{
                "current": {"10.0.0.1": ["nas"]},
                "history": [{"address": "10.0.0.1", "annotation": ["old", "nas"]}]
            }"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.store.len(), 1);
        assert_eq!(snapshot.store.history_len(), 1);
        assert_eq!(snapshot.store.tag_len(), 0);
        assert!(snapshot.saved_at.is_none());

        save(&path, &snapshot.store).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("current").is_some());
        assert!(raw.get("history").is_some());
        assert!(raw.get("tags").is_some());
    }

    #[test]
    fn test_load_corrupt_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, NotesError::CorruptStore { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_address_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"current": {"300.0.0.1": ["x"]}, "history": []}"#).unwrap();

        assert!(matches!(
            load(&path).unwrap_err(),
            NotesError::CorruptStore { .. }
        ));
    }

    #[test]
    fn test_load_rejects_empty_annotation_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"current": {"1.1.1.1": []}, "history": []}"#).unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/ipnotes.json");

        save(&path, &sample_store()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_unreadable_file_is_io_error() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let err = load_with(&fs, Path::new("/data/ipnotes.json")).unwrap_err();
        assert!(matches!(err, NotesError::Io { .. }));
    }

    #[test]
    fn test_save_write_failure_is_reported() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_atomic()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let err = save_with(&fs, Path::new("/data/ipnotes.json"), &sample_store()).unwrap_err();
        assert!(err.to_string().contains("/data/ipnotes.json"));
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotes.json");
        save(&path, &sample_store()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut fs = MockFileSystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_atomic()
            .returning(|_, _| Err(io::Error::new(io::ErrorKind::Other, "disk full")));
        assert!(save_with(&fs, &path, &Store::new()).is_err());

        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}
