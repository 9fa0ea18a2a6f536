//! Entitlement store for ZoneGate.
//!
//! Owns the only mutable per-player state that survives restarts:
//!
//! - **Entitlements**: seconds remaining per (player, zone, token).
//! - **Zone selections**: a half-finished two-corner box per admin.
//!
//! ```text
//! Access / Engine (above)  ← read and write entitlements
//!     ↕
//! Store (this crate)       ← in-memory maps, write-through to a backend
//!     ↕
//! StoreBackend             ← JSON file on disk, or memory in tests
//! ```

mod backend;
mod error;
mod selection;
mod store;

pub use backend::{
    EntitlementRecord, JsonFileBackend, MemoryBackend, SelectionRecord, StoreBackend,
    StoreSnapshot,
};
pub use error::StoreError;
pub use selection::ZoneSelection;
pub use store::EntitlementStore;
