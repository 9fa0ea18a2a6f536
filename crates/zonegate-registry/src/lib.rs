//! Zone and token definitions for ZoneGate.
//!
//! Two registries with the same shape:
//!
//! - [`ZoneRegistry`]: cuboid zones, their kick destinations and the
//!   tokens that open them.
//! - [`TokenCatalog`]: token templates, their duration, item look, lore
//!   and the zones they open.
//!
//! Both sides record the assignment (a zone lists its tokens, a token
//! lists its zones). The registries do not keep each other in sync; the
//! engine's admin layer updates both.
//!
//! Each registry persists through a [`RecordStore`]: one YAML file per
//! entity on disk ([`YamlDirStore`]) or a map in memory for tests
//! ([`MemoryRecordStore`]).

mod error;
mod records;
mod store;
mod token;
mod tokens;
mod zone;
mod zones;

pub use error::RegistryError;
pub use records::{IdRepr, Record, TokenRecord, ZoneRecord};
pub use store::{MemoryRecordStore, RecordStore, StoredRecord, YamlDirStore};
pub use token::TokenTemplate;
pub use tokens::TokenCatalog;
pub use zone::Zone;
pub use zones::ZoneRegistry;
