//! Durable snapshot storage

use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use super::{Snapshot, StoreError};

/// Durable copy of a data source's latest snapshot
pub trait Store<T>: Send + Sync {
    /// Read the persisted snapshot
    ///
    /// [`StoreError::Missing`] and [`StoreError::Corrupt`] are both cache
    /// misses to the caller.
    fn load(&self) -> Result<Snapshot<T>, StoreError>;

    /// Persist `items`, replacing whatever was stored
    fn save(&self, items: &[T]) -> Result<(), StoreError>;
}

/// Store that keeps the snapshot as one JSON array
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _item: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Store<T> for JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Snapshot<T>, StoreError> {
        let (data, modified) = read_file(&self.path)?;
        let items: Vec<T> = serde_json::from_slice(&data)?;
        Ok(Snapshot::taken_at(items, modified))
    }

    fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(items)?;
        write_file(&self.path, &data)
    }
}

/// Read a cache file with its modification time
pub fn read_file(path: &Path) -> Result<(Vec<u8>, SystemTime), StoreError> {
    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StoreError::Missing,
        _ => StoreError::Io(e),
    })?;
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or_else(|_| SystemTime::now());
    Ok((data, modified))
}

/// Write a cache file, creating parent directories
///
/// Each write goes to its own temp file next to the target and is renamed
/// over it, so readers and overlapping writers only ever see whole files.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::<String>::new(dir.path().join("files").join("index.json"));
        let items = vec![
            "/home/u/zeta".to_string(),
            "/home/u/alpha".to_string(),
            "/home/u/docs/report.txt".to_string(),
        ];

        store.save(&items).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.items(), items.as_slice());
    }

    #[test]
    fn test_missing_file_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::<String>::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(StoreError::Missing)));
    }

    #[test]
    fn test_corrupt_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, b"[\"/home/u/a\", ").unwrap();

        let store = JsonStore::<String>::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::<u32>::new(dir.path().join("n.json"));
        store.save(&[1, 2, 3]).unwrap();
        store.save(&[4]).unwrap();
        assert_eq!(store.load().unwrap().items(), &[4]);
        // Only the target is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_overlapping_saves_leave_a_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(JsonStore::<u32>::new(dir.path().join("n.json")));
        let small: Vec<u32> = vec![1; 10];
        let large: Vec<u32> = (0..20_000).collect();

        for _ in 0..50 {
            let handles: Vec<_> = [small.clone(), large.clone()]
                .into_iter()
                .map(|items| {
                    let store = std::sync::Arc::clone(&store);
                    std::thread::spawn(move || store.save(&items))
                })
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }
            let loaded = store.load().unwrap();
            assert!(loaded.items() == small.as_slice() || loaded.items() == large.as_slice());
        }
    }
}
