//! Capability keys checked through `Host::has_permission`.
//!
//! Per-zone and per-token keys are built from the stable id, never the
//! display name.

use crate::{TokenId, ZoneId};

/// Base capability to enter any zone at all.
pub const ENTER: &str = "zonegate.zones.enter";

/// Skips every check in every zone.
pub const BYPASS_ALL: &str = "zonegate.zones.bypass.*";

/// Allows using any token.
pub const USE_ALL: &str = "zonegate.token.use.*";

/// Skips every check in one zone.
pub fn bypass(zone: &ZoneId) -> String {
    format!("zonegate.zones.bypass.{}", zone.as_str())
}

/// Allows using one token.
pub fn use_token(token: &TokenId) -> String {
    format!("zonegate.token.use.{}", token.as_str())
}

pub const ADMIN_TOOL: &str = "zonegate.admin.tool";
pub const ADMIN_RELOAD: &str = "zonegate.admin.reload";

pub const ADMIN_ZONES_CREATE: &str = "zonegate.admin.zones.create";
pub const ADMIN_ZONES_LIST: &str = "zonegate.admin.zones.list";
pub const ADMIN_ZONES_RENAME: &str = "zonegate.admin.zones.rename";
pub const ADMIN_ZONES_KICKTO: &str = "zonegate.admin.zones.kickto";
pub const ADMIN_ZONES_DELETE: &str = "zonegate.admin.zones.delete";

pub const ADMIN_TOKEN_CREATE: &str = "zonegate.admin.token.create";
pub const ADMIN_TOKEN_LIST: &str = "zonegate.admin.token.list";
pub const ADMIN_TOKEN_ASSIGN: &str = "zonegate.admin.token.assign";
pub const ADMIN_TOKEN_DURATION: &str = "zonegate.admin.token.duration";
pub const ADMIN_TOKEN_ITEM: &str = "zonegate.admin.token.item";
pub const ADMIN_TOKEN_RENAME: &str = "zonegate.admin.token.rename";
pub const ADMIN_TOKEN_LORE: &str = "zonegate.admin.token.lore";
pub const ADMIN_TOKEN_GIVE: &str = "zonegate.admin.token.give";
pub const ADMIN_TOKEN_DELETE: &str = "zonegate.admin.token.delete";
