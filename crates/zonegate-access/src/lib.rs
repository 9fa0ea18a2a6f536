//! Access control and entitlement decay for ZoneGate.
//!
//! This crate is the core of the system. It decides whether a player may
//! step into a zone, seeds and burns down per-token time, and evicts
//! players whose time or token is gone.
//!
//! ## Key types
//!
//! - [`Host`] / [`TextProvider`]: what the embedding game server provides.
//! - [`AccessEvaluator`]: handles move, teleport and item-drop events.
//! - [`DecayPass`]: one tick of entitlement decay across online players.
//! - [`evict`]: the eviction primitive both of the above share.
//! - [`Presence`]: which (player, zone) pairs are currently inside.
//! - `SimHost` (feature `sim`): an in-memory [`Host`] for tests and tooling.
//!
//! Neither the evaluator nor the decay pass owns anything. Both borrow
//! the registries, the store and the presence set for the duration of
//! one event or one tick:
//!
//! ```text
//! ZoneRegistry ─┐
//! TokenCatalog ─┼──→ AccessEvaluator / DecayPass ──→ Host
//! EntitlementStore ─┘          │
//!                          Presence
//! ```

mod config;
mod decay;
mod error;
mod evaluator;
mod evict;
mod host;
mod matcher;
mod notify;
mod presence;
#[cfg(any(test, feature = "sim"))]
mod sim;

pub use config::AccessConfig;
pub use decay::{DecayPass, DecayReport};
pub use error::HostError;
pub use evaluator::{AccessEvaluator, DenyReason, Motion, MoveOutcome, Verdict, is_bypassed};
pub use evict::{Eviction, EvictionReason, evict};
pub use host::{Host, TextProvider};
pub use matcher::{find_item, item_matches, matching_tokens};
pub use notify::Notifier;
pub use presence::Presence;
#[cfg(any(test, feature = "sim"))]
pub use sim::{DEFAULT_INVENTORY_SIZE, SimHost, SimPlayer};
