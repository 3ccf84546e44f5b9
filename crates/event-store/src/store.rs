//! The file-backed event store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use alert_core::EventRecord;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::purge::purge_directory;

/// File extension of stored records.
pub const RECORD_EXTENSION: &str = "json";

/// Subdirectory holding records that are still being written.
///
/// Purges only delete regular files, so a write in progress here survives a
/// concurrent [`EventStore::clear_all`].
pub const STAGING_DIR: &str = ".staging";

/// How a record's file name is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// `event_{event_type}_{city}.json`. A later submission with the same
    /// type and city overwrites the earlier one.
    #[default]
    TypeAndCity,
    /// `event_{event_type}_{city}_{id}.json`. Every submission gets its own
    /// file.
    Unique,
}

impl FromStr for KeyStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "type_and_city" | "type-and-city" => Ok(KeyStrategy::TypeAndCity),
            "unique" => Ok(KeyStrategy::Unique),
            other => Err(format!("unknown key strategy: {}", other)),
        }
    }
}

/// A record read back from the store, together with where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    pub path: PathBuf,
    pub record: EventRecord,
}

/// Durable queue of pending event records, one file per record.
#[derive(Debug, Clone)]
pub struct EventStore {
    dir: PathBuf,
    key_strategy: KeyStrategy,
}

impl EventStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let staging = dir.join(STAGING_DIR);
        fs::create_dir_all(&staging).map_err(|e| StoreError::io(&staging, e))?;
        debug!(dir = %dir.display(), "Opened event store");
        Ok(Self {
            dir,
            key_strategy: KeyStrategy::default(),
        })
    }

    /// Use a different file naming strategy.
    pub fn with_key_strategy(mut self, key_strategy: KeyStrategy) -> Self {
        self.key_strategy = key_strategy;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.key_strategy
    }

    /// The path `record` is (or would be) stored at.
    pub fn record_path(&self, record: &EventRecord) -> PathBuf {
        let stem = match self.key_strategy {
            KeyStrategy::TypeAndCity => format!(
                "event_{}_{}",
                key_component(&record.event_type),
                key_component(&record.city)
            ),
            KeyStrategy::Unique => format!(
                "event_{}_{}_{}",
                key_component(&record.event_type),
                key_component(&record.city),
                record.id.simple()
            ),
        };
        self.dir.join(format!("{}.{}", stem, RECORD_EXTENSION))
    }

    /// Persist `record`, replacing any record already at its path.
    ///
    /// The file is written under [`STAGING_DIR`] and renamed into place, so
    /// a concurrent scan sees either the old record or the new one, and a
    /// concurrent purge cannot pull the file out from under the write.
    pub fn put(&self, record: &EventRecord) -> Result<PathBuf> {
        let path = self.record_path(record);
        let body = serde_json::to_vec_pretty(record).map_err(StoreError::Encode)?;

        let staging = self.dir.join(STAGING_DIR);
        let mut tmp = NamedTempFile::new_in(&staging).map_err(|e| StoreError::io(&staging, e))?;
        tmp.write_all(&body).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| StoreError::io(&path, e.error))?;

        info!(
            id = %record.id,
            event_type = %record.event_type,
            city = %record.city,
            path = %path.display(),
            "Stored event"
        );
        Ok(path)
    }

    /// Scan the store for pending records.
    ///
    /// The returned iterator reads lazily; every call starts a fresh scan.
    /// A record that cannot be read or decoded is yielded as an `Err` and
    /// the scan carries on with the next file.
    pub fn list_pending(&self) -> Result<PendingEvents> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        Ok(PendingEvents { entries })
    }

    /// Delete a single record. Returns `false` if it was already gone.
    pub fn remove(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Delete every stored record, keeping reserved placeholder files.
    pub fn clear_all(&self) -> Result<usize> {
        purge_directory(&self.dir)
    }
}

/// Lazy scan over the records in an [`EventStore`].
#[derive(Debug)]
pub struct PendingEvents {
    entries: fs::ReadDir,
}

impl Iterator for PendingEvents {
    type Item = Result<StoredEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(StoreError::io(PathBuf::new(), e))),
            };

            let path = entry.path();
            let is_record =
                path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION);
            if !is_record || !path.is_file() {
                continue;
            }

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                // Removed between listing and reading.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Some(Err(StoreError::io(path, e))),
            };

            return Some(match serde_json::from_slice::<EventRecord>(&bytes) {
                Ok(record) => Ok(StoredEvent { path, record }),
                Err(source) => Err(StoreError::Malformed { path, source }),
            });
        }
    }
}

/// Make a submitted string safe to embed in a file name.
fn key_component(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alert_core::Coordinates;
    use tempfile::TempDir;

    fn tokyo() -> EventRecord {
        EventRecord::new("EQ", "Tokyo", "", "Japan", Coordinates::new(35.68, 139.69))
    }

    fn pending(store: &EventStore) -> Vec<Result<StoredEvent>> {
        store.list_pending().unwrap().collect()
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");
        let store = EventStore::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[test]
    fn test_put_and_list_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        let record = tokyo();

        let path = store.put(&record).unwrap();
        assert_eq!(path, temp.path().join("event_EQ_Tokyo.json"));

        let listed = pending(&store);
        assert_eq!(listed.len(), 1);
        let stored = listed.into_iter().next().unwrap().unwrap();
        assert_eq!(stored.path, path);
        assert_eq!(stored.record, record);
    }

    #[test]
    fn test_same_type_and_city_overwrites() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();

        store.put(&tokyo()).unwrap();
        let mut second = tokyo();
        second.country = "JP".to_string();
        store.put(&second).unwrap();

        let listed: Vec<_> = pending(&store).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].record.country, "JP");
    }

    #[test]
    fn test_unique_strategy_keeps_both() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path())
            .unwrap()
            .with_key_strategy(KeyStrategy::Unique);

        store.put(&tokyo()).unwrap();
        store.put(&tokyo()).unwrap();

        assert_eq!(pending(&store).len(), 2);
    }

    #[test]
    fn test_list_is_restartable() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        store.put(&tokyo()).unwrap();

        assert_eq!(pending(&store).len(), 1);
        assert_eq!(pending(&store).len(), 1);
    }

    #[test]
    fn test_malformed_record_does_not_abort_scan() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        store.put(&tokyo()).unwrap();
        fs::write(temp.path().join("event_XX_Broken.json"), b"not json").unwrap();

        let listed = pending(&store);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(listed
            .iter()
            .any(|r| matches!(r, Err(StoreError::Malformed { .. }))));
    }

    #[test]
    fn test_non_record_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        fs::write(temp.path().join(".gitkeep"), b"").unwrap();
        fs::write(temp.path().join("notes.txt"), b"hello").unwrap();

        assert!(pending(&store).is_empty());
    }

    #[test]
    fn test_clear_all_keeps_placeholder() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        fs::write(temp.path().join(".gitkeep"), b"").unwrap();
        store.put(&tokyo()).unwrap();
        store
            .put(&EventRecord::new(
                "FL",
                "Dhaka",
                "",
                "Bangladesh",
                Coordinates::new(23.81, 90.41),
            ))
            .unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(pending(&store).is_empty());
        assert!(temp.path().join(".gitkeep").exists());
    }

    #[test]
    fn test_remove_single_record() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        let path = store.put(&tokyo()).unwrap();

        assert!(store.remove(&path).unwrap());
        assert!(!store.remove(&path).unwrap());
        assert!(pending(&store).is_empty());
    }

    #[test]
    fn test_city_cannot_escape_directory() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        let record =
            EventRecord::new("EQ", "../../etc/passwd", "", "", Coordinates::new(0.0, 0.0));

        let path = store.put(&record).unwrap();
        assert_eq!(path.parent(), Some(temp.path()));
        assert_eq!(path.file_name().unwrap(), "event_EQ_.._.._etc_passwd.json");
    }

    #[test]
    fn test_key_strategy_from_str() {
        assert_eq!("unique".parse::<KeyStrategy>(), Ok(KeyStrategy::Unique));
        assert_eq!("Type_And_City".parse::<KeyStrategy>(), Ok(KeyStrategy::TypeAndCity));
        assert!("random".parse::<KeyStrategy>().is_err());
    }

    #[test]
    fn test_put_survives_concurrent_clear() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        let stop = Arc::new(AtomicBool::new(false));

        let cleaner = {
            let store = store.clone();
            let stop = Arc::clone(&stop);
            std::thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    store.clear_all().unwrap();
                }
            })
        };

        let failures: Vec<StoreError> = (0..2000)
            .filter_map(|i| {
                let city = format!("City{}", i);
                let record = EventRecord::new("EQ", city, "", "", Coordinates::new(1.0, 2.0));
                store.put(&record).err()
            })
            .collect();

        stop.store(true, Ordering::Relaxed);
        cleaner.join().unwrap();

        assert!(failures.is_empty(), "put failed: {:?}", failures.first());
        assert!(temp.path().join(STAGING_DIR).is_dir());
    }

    #[test]
    fn test_staging_dir_is_not_listed_or_purged() {
        let temp = TempDir::new().unwrap();
        let store = EventStore::open(temp.path()).unwrap();
        store.put(&tokyo()).unwrap();

        assert_eq!(store.clear_all().unwrap(), 1);
        assert!(pending(&store).is_empty());
        assert!(temp.path().join(STAGING_DIR).is_dir());
        assert_eq!(fs::read_dir(temp.path().join(STAGING_DIR)).unwrap().count(), 0);
    }
}
