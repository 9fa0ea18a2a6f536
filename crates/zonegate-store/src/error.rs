//! Error types for the store layer.

use std::path::PathBuf;

/// Errors raised by a [`StoreBackend`](crate::StoreBackend).
///
/// The store itself never returns these from `set`/`remove_*`: a failed
/// write is logged and counted, and the in-memory change stands.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot bytes could not be encoded or decoded.
    #[error(transparent)]
    Codec(#[from] zonegate_types::ParseError),

    /// A test backend was told to reject writes.
    #[error("backend unavailable")]
    Unavailable,

    /// The shared buffer of a [`MemoryBackend`](crate::MemoryBackend) was
    /// poisoned by a panicking holder.
    #[error("backend lock poisoned")]
    Poisoned,
}
