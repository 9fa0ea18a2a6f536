//! Record persistence.
//!
//! A [`RecordStore`] holds one record per key. For [`YamlDirStore`] the
//! key is the file stem, so `zones/3.yml` has key `"3"`. Registries
//! remember each entity's key: a hand-written `zones/arena.yml` keeps
//! being saved to `arena.yml` after it has been given an id.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use zonegate_types::{Codec, YamlCodec};

use crate::{Record, RegistryError};

/// A record together with the key it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord<R> {
    pub key: String,
    pub record: R,
}

/// Where a registry's records live.
pub trait RecordStore<R>: Send + Sync {
    /// Reads every record.
    ///
    /// # Errors
    /// Only when the store as a whole cannot be read. Individual bad
    /// records are skipped with a warning.
    fn load_all(&self) -> Result<Vec<StoredRecord<R>>, RegistryError>;

    /// Writes `record` under `key`, replacing what was there.
    fn save(&self, key: &str, record: &R) -> Result<(), RegistryError>;

    /// Deletes `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), RegistryError>;
}

// ---------------------------------------------------------------------------
// YamlDirStore
// ---------------------------------------------------------------------------

/// One `<key>.yml` file per record in a directory.
pub struct YamlDirStore {
    dir: PathBuf,
    codec: YamlCodec,
}

impl YamlDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            codec: YamlCodec,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.yml"))
    }

    fn io_error(path: &Path, source: std::io::Error) -> RegistryError {
        RegistryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl<R: Record> RecordStore<R> for YamlDirStore {
    fn load_all(&self) -> Result<Vec<StoredRecord<R>>, RegistryError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;
        let entries = fs::read_dir(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yml") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable record");
                    continue;
                }
            };
            match self.codec.decode::<R>(&bytes) {
                Ok(record) => out.push(StoredRecord { key, record }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed record");
                }
            }
        }
        Ok(out)
    }

    fn save(&self, key: &str, record: &R) -> Result<(), RegistryError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;
        let bytes = self.codec.encode(record)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.yml.tmp"));
        fs::write(&tmp, bytes).map_err(|e| Self::io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| Self::io_error(&path, e))
    }

    fn remove(&self, key: &str) -> Result<(), RegistryError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryRecordStore
// ---------------------------------------------------------------------------

/// Records in a shared map. Clones share the map.
pub struct MemoryRecordStore<R> {
    inner: Arc<Mutex<MemoryRecords<R>>>,
}

struct MemoryRecords<R> {
    records: BTreeMap<String, R>,
    unavailable: bool,
}

impl<R> Clone for MemoryRecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryRecords {
                records: BTreeMap::new(),
                unavailable: false,
            })),
        }
    }
}

impl<R: Clone> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a record in place directly, bypassing any registry.
    pub fn insert(&self, key: impl Into<String>, record: R) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.records.insert(key.into(), record);
        }
    }

    pub fn get(&self, key: &str) -> Option<R> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.records.get(key).cloned())
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.records.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// While set, every operation fails with [`RegistryError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unavailable = unavailable;
        }
    }

    fn with<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, R>) -> T,
    ) -> Result<T, RegistryError> {
        let mut inner = self.inner.lock().map_err(|_| RegistryError::Unavailable)?;
        if inner.unavailable {
            return Err(RegistryError::Unavailable);
        }
        Ok(f(&mut inner.records))
    }
}

impl<R: Record> RecordStore<R> for MemoryRecordStore<R> {
    fn load_all(&self) -> Result<Vec<StoredRecord<R>>, RegistryError> {
        self.with(|records| {
            records
                .iter()
                .map(|(key, record)| StoredRecord {
                    key: key.clone(),
                    record: record.clone(),
                })
                .collect()
        })
    }

    fn save(&self, key: &str, record: &R) -> Result<(), RegistryError> {
        self.with(|records| {
            records.insert(key.to_string(), record.clone());
        })
    }

    fn remove(&self, key: &str) -> Result<(), RegistryError> {
        self.with(|records| {
            records.remove(key);
        })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Records ready to become entities, in load order.
pub(crate) struct LoadedRecords<R> {
    /// `(key, id, record)`; every record has an id.
    pub records: Vec<(String, String, R)>,
    /// One past the largest numeric id seen.
    pub next_id: u64,
}

/// Reads every record, orders them and hands out ids to those without.
///
/// Order is: numeric ids ascending, then other ids alphabetically, then
/// id-less records by key. Id-less records get `max + 1` onwards, and the
/// id is written back under the record's own key. A second record with
/// an id already seen is skipped.
pub(crate) fn load_records<R: Record>(
    store: &dyn RecordStore<R>,
    kind: &'static str,
) -> Result<LoadedRecords<R>, RegistryError> {
    let mut stored = store.load_all()?;

    let max = stored
        .iter()
        .filter_map(|s| s.record.id())
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let mut next_id = max + 1;

    stored.sort_by_cached_key(|s| match s.record.id() {
        Some(id) => match id.parse::<u64>() {
            Ok(n) => (0u8, n, id),
            Err(_) => (1, 0, id),
        },
        None => (2, 0, s.key.clone()),
    });

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(stored.len());
    for StoredRecord { key, mut record } in stored {
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = next_id.to_string();
                next_id += 1;
                record.set_id(id.clone());
                if let Err(e) = store.save(&key, &record) {
                    tracing::warn!(kind, key = %key, error = %e, "failed to write back assigned id");
                }
                tracing::info!(kind, key = %key, id = %id, "assigned id to record");
                id
            }
        };
        if !seen.insert(id.clone()) {
            tracing::warn!(kind, key = %key, id = %id, "skipping record with duplicate id");
            continue;
        }
        records.push((key, id, record));
    }

    Ok(LoadedRecords { records, next_id })
}
