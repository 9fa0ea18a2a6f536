//! # ZoneGate
//!
//! Time-limited, token-gated access to cuboid zones in a block world.
//!
//! Admins define zones (boxes in a world) and tokens (templates for
//! carried items). A player who walks into a zone while carrying a
//! token assigned to it gets an entitlement: seconds of stay, burnt down
//! once per tick while inside. When the time runs out, or the token
//! leaves the inventory, the player is moved to the zone's kick
//! location.
//!
//! The embedding game server implements [`Host`] and feeds events into
//! one [`ZoneGate`] value.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use zonegate::prelude::*;
//!
//! fn start<H: Host>(host: H) -> Result<ZoneGate<H>, ZoneGateError> {
//!     zonegate::init_tracing("zonegate=info");
//!     let mut gate = ZoneGate::open_dir(host, Path::new("data"))?;
//!
//!     let arena = gate.create_zone(
//!         &Actor::Console,
//!         "Arena",
//!         BlockPos::new(0, 60, 0),
//!         BlockPos::new(20, 80, 20),
//!         "world",
//!     )?;
//!     let pass = gate.create_token(&Actor::Console, "Arena Pass", Some("5m"))?;
//!     gate.assign_token(&Actor::Console, &pass, &arena)?;
//!     Ok(gate)
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! zonegate (this crate)   ← engine, admin operations, tool, settings, driver
//!     ↕
//! zonegate-access         ← evaluator, decay pass, Host trait
//!     ↕
//! zonegate-registry       ← zones and tokens
//! zonegate-store          ← entitlements and selections
//! zonegate-tick           ← fixed-period scheduler
//!     ↕
//! zonegate-types          ← ids, geometry, items, messages
//! ```

pub mod admin;
pub mod driver;
mod engine;
mod error;
mod logging;
pub mod placeholders;
mod settings;
pub mod tool;

pub use admin::{Actor, KickTarget, Page, paginate};
pub use driver::run_decay;
pub use engine::{CONFIG_FILE, ENTITLEMENTS_FILE, TOKENS_DIR, ZONES_DIR, ZoneGate};
pub use error::ZoneGateError;
pub use logging::init_tracing;
pub use settings::{GeneralSettings, Pagination, Settings};
pub use tool::{ToolClick, is_zone_tool, zone_tool_item};

/// Re-exports of the types hosts need most.
pub mod prelude {
    pub use crate::{Actor, KickTarget, Page, Settings, ToolClick, ZoneGate, ZoneGateError};
    pub use zonegate_access::{
        AccessConfig, DecayReport, Eviction, EvictionReason, Host, HostError, MoveOutcome,
        TextProvider, Verdict,
    };
    pub use zonegate_registry::{TokenTemplate, Zone};
    pub use zonegate_tick::{TickConfig, TickMetrics};
    pub use zonegate_types::{
        BlockPos, ItemSnapshot, KickDestination, PlayerId, Position, TokenId, ZoneId,
    };
}
