//! Erase command implementation.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::codec;
use crate::confirm::{confirm, ConfirmSource};
use crate::store::Store;

/// Clear the store and its data file after an explicit "yes".
///
/// Returns whether the data was erased.
pub fn run<S, W>(store: &mut Store, path: &Path, source: &mut S, out: &mut W) -> Result<bool>
where
    S: ConfirmSource + ?Sized,
    W: Write + ?Sized,
{
    if !confirm(source, out, "Erase all IP notes, history and tags?")? {
        return Ok(false);
    }

    store.erase_all();
    codec::save(path, store).with_context(|| format!("Failed to save data file: {:?}", path))?;
    info!("Erased all data in {:?}", path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::LineSource;
    use crate::store::{Address, Annotation};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn populated() -> Store {
        let mut store = Store::new();
        store.upsert_current(
            Address::parse("10.0.0.1").unwrap(),
            Annotation::new(["nas"]).unwrap(),
        );
        store
    }

    #[test]
    fn test_erase_confirmed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotes.json");
        let mut store = populated();
        codec::save(&path, &store).unwrap();

        let mut source = LineSource::new(Cursor::new("yes\n"));
        let mut out = Vec::new();
        assert!(run(&mut store, &path, &mut source, &mut out).unwrap());

        assert!(store.is_empty());
        assert!(codec::load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_erase_cancelled_keeps_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ipnotes.json");
        let mut store = populated();
        codec::save(&path, &store).unwrap();

        let mut source = LineSource::new(Cursor::new("maybe\nno\n"));
        let mut out = Vec::new();
        assert!(!run(&mut store, &path, &mut source, &mut out).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(codec::load(&path).unwrap().len(), 1);
    }
}
