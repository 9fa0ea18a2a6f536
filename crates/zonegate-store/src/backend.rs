//! Persistence backends.
//!
//! The store keeps everything in memory and hands the backend a complete
//! [`StoreSnapshot`] after each change. Backends only need two
//! operations, so a file, a database row or a test buffer all fit.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use zonegate_types::{BlockPos, Codec, JsonCodec, PlayerId, TokenId, ZoneId};

use crate::StoreError;

/// One persisted entitlement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRecord {
    pub player: PlayerId,
    pub zone: ZoneId,
    pub token: TokenId,
    pub remaining: u64,
}

/// One persisted selection row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRecord {
    pub player: PlayerId,
    pub world: String,
    pub first: BlockPos,
    #[serde(default)]
    pub second: Option<BlockPos>,
}

/// Everything the store persists, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub entitlements: Vec<EntitlementRecord>,
    #[serde(default)]
    pub selections: Vec<SelectionRecord>,
}

/// Where snapshots go.
pub trait StoreBackend: Send + Sync {
    /// Reads the last persisted snapshot. A backend that has never been
    /// written returns an empty snapshot, not an error.
    fn load(&self) -> Result<StoreSnapshot, StoreError>;

    /// Replaces the persisted snapshot.
    fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError>;
}

// ---- JSON file ----

/// A single JSON file, rewritten whole on every persist.
///
/// Writes go to `<file>.tmp` first and are renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct JsonFileBackend {
    path: PathBuf,
    codec: JsonCodec,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: JsonCodec,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<StoreSnapshot, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StoreSnapshot::default()),
            Ok(bytes) => Ok(self.codec.decode(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreSnapshot::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        let bytes = self.codec.encode(snapshot)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

// ---- In-memory (for testing) ----

/// Keeps the last snapshot in a shared buffer.
///
/// Clones share the buffer, so a test can hand one clone to the store and
/// inspect what was persisted through the other. `set_unavailable(true)`
/// makes every persist fail.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    snapshot: StoreSnapshot,
    writes: u64,
    unavailable: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that loads `snapshot`.
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        let backend = Self::default();
        if let Ok(mut inner) = backend.inner.lock() {
            inner.snapshot = snapshot;
        }
        backend
    }

    /// The last persisted snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner
            .lock()
            .map(|inner| inner.snapshot.clone())
            .unwrap_or_default()
    }

    /// Number of successful persists.
    pub fn writes(&self) -> u64 {
        self.inner.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.unavailable = unavailable;
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<StoreSnapshot, StoreError> {
        let inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.snapshot.clone())
    }

    fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().map_err(|_| StoreError::Poisoned)?;
        if inner.unavailable {
            return Err(StoreError::Unavailable);
        }
        inner.snapshot = snapshot.clone();
        inner.writes += 1;
        Ok(())
    }
}
