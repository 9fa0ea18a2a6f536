//! Unified error type for ZoneGate.

use std::path::PathBuf;

use zonegate_access::HostError;
use zonegate_registry::RegistryError;
use zonegate_store::StoreError;
use zonegate_types::{ParseError, TokenId, ZoneId};

/// Top-level error that wraps every crate-specific error.
///
/// Sub-crate errors convert through `#[from]`, so `?` works across the
/// layers. The remaining variants are failures only the engine's admin
/// layer can detect.
#[derive(Debug, thiserror::Error)]
pub enum ZoneGateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Host(#[from] HostError),

    /// The actor lacks the named capability.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The operation needs a player (position, held item, inventory).
    #[error("only players can do that")]
    PlayersOnly,

    #[error("player {0} not found")]
    PlayerNotFound(String),

    #[error("world {0} does not exist")]
    UnknownWorld(String),

    #[error("no zone selection")]
    SelectionMissing,

    #[error("zone selection has only one corner")]
    SelectionIncomplete,

    #[error("selection corners are in different worlds")]
    SelectionWorldMismatch,

    #[error("token {0} is not assigned to any zone")]
    NoZoneAssigned(TokenId),

    #[error("token {token} is not assigned to zone {zone}")]
    NotAssigned { token: TokenId, zone: ZoneId },

    #[error("no item in hand")]
    NoItemInHand,

    #[error("inventory of {0} is full")]
    InventoryFull(String),

    /// Lore line numbers here are 1-based, as admins type them.
    #[error("lore line {0} does not exist")]
    InvalidLoreLine(usize),

    #[error("config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
