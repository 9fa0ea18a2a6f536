//! Error types for the registry layer.

use std::path::PathBuf;

use zonegate_types::{TokenId, ZoneId};

/// Errors that can occur in zone and token operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    #[error("token {0} not found")]
    TokenNotFound(TokenId),

    /// Lore indices here are 0-based.
    #[error("lore line {index} out of range (token has {len} lines)")]
    LoreLineOutOfRange { index: usize, len: usize },

    /// A zone's kick destination must be outside the zone itself.
    #[error("kick location is inside zone {0}")]
    KickInsideZone(ZoneId),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Codec(#[from] zonegate_types::ParseError),

    /// The shared map of a [`MemoryRecordStore`](crate::MemoryRecordStore)
    /// was poisoned, or the store was told to reject operations.
    #[error("record store unavailable")]
    Unavailable,
}
