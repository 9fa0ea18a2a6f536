//! User-facing message templates.
//!
//! Every line a player or admin sees comes from a [`MessageCatalog`]
//! entry addressed by a dotted key (see [`keys`]). Templates use `&`
//! colour codes, `{prefix}` for the configured prefix, and `{name}`
//! placeholders filled per call:
//!
//! ```rust
//! use zonegate_types::{MessageCatalog, keys, strip_color};
//!
//! let catalog = MessageCatalog::default();
//! let text = catalog.render(keys::ACCESS_KICKED, &[("zoneName", &"Arena")]);
//! assert!(strip_color(&text).contains("Arena"));
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::colorize;

/// Message keys.
pub mod keys {
    pub const PREFIX: &str = "prefix";

    pub const ACCESS_DENIED: &str = "access.denied";
    pub const ACCESS_NO_TOKEN: &str = "access.no-token";
    pub const ACCESS_ENTRY_SUCCESS: &str = "access.entry-success";
    pub const ACCESS_KICKED: &str = "access.kicked";
    pub const ACCESS_TIME_WARNING: &str = "access.time-warning";
    pub const ACCESS_TOKEN_EXPIRED: &str = "access.token-expired";

    pub const ERROR_NO_PERMISSION: &str = "error.no-permission";
    pub const ERROR_INVALID_USAGE: &str = "error.invalid-usage";
    pub const ERROR_PLAYER_NOT_FOUND: &str = "error.player-not-found";

    pub const PLUGIN_RELOADED: &str = "plugin.reloaded";
    pub const PLUGIN_RELOAD_ERROR: &str = "plugin.reload-error";

    pub const ZONE_CREATED: &str = "zone.created";
    pub const ZONE_RENAMED: &str = "zone.renamed";
    pub const ZONE_DELETED: &str = "zone.deleted";
    pub const ZONE_KICK_LOCATION_SET: &str = "zone.kick-location-set";
    pub const ZONE_LIST_EMPTY: &str = "zone.list-empty";
    pub const ZONE_LIST_HEADER: &str = "zone.list-header";
    pub const ZONE_LIST_ITEM: &str = "zone.list-item";
    pub const ZONE_ERROR_NOT_FOUND: &str = "zone.error.not-found";
    pub const ZONE_ERROR_NOT_SELECTED: &str = "zone.error.not-selected";
    pub const ZONE_ERROR_KICK_INSIDE_ZONE: &str = "zone.error.kick-inside-zone";

    pub const TOKEN_CREATED: &str = "token.created";
    pub const TOKEN_ASSIGNED: &str = "token.assigned";
    pub const TOKEN_UNASSIGNED: &str = "token.unassigned";
    pub const TOKEN_DURATION_CHANGED: &str = "token.duration-changed";
    pub const TOKEN_ITEM_CONFIGURED: &str = "token.item-configured";
    pub const TOKEN_RENAMED: &str = "token.renamed";
    pub const TOKEN_DELETED: &str = "token.deleted";
    pub const TOKEN_GIVEN: &str = "token.given";
    pub const TOKEN_RECEIVED: &str = "token.received";
    pub const TOKEN_INVENTORY_FULL: &str = "token.inventory-full";
    pub const TOKEN_INVENTORY_FULL_SELF: &str = "token.inventory-full-self";
    pub const TOKEN_LIST_EMPTY: &str = "token.list-empty";
    pub const TOKEN_LIST_HEADER: &str = "token.list-header";
    pub const TOKEN_LIST_ITEM: &str = "token.list-item";
    pub const TOKEN_LORE_ADDED: &str = "token.lore.added";
    pub const TOKEN_LORE_SET: &str = "token.lore.set";
    pub const TOKEN_LORE_REMOVED: &str = "token.lore.removed";
    pub const TOKEN_ERROR_NOT_FOUND: &str = "token.error.not-found";
    pub const TOKEN_ERROR_INVALID_DURATION: &str = "token.error.invalid-duration";
    pub const TOKEN_ERROR_INVALID_LORE_LINE: &str = "token.error.invalid-lore-line";
    pub const TOKEN_ERROR_NO_ZONE_ASSIGNED: &str = "token.error.no-zone-assigned";
    pub const TOKEN_ERROR_NOT_ASSIGNED: &str = "token.error.not-assigned";
    pub const TOKEN_ERROR_NO_ITEM_IN_HAND: &str = "token.error.no-item-in-hand";

    pub const TOOL_GIVEN: &str = "tool.given";
    pub const TOOL_POSITION1: &str = "tool.position1";
    pub const TOOL_POSITION2: &str = "tool.position2";
    pub const TOOL_ZONE_SELECTED: &str = "tool.zone-selected";
    pub const TOOL_ERROR_NOT_SELECTED: &str = "tool.error.not-selected";
    pub const TOOL_ERROR_DIFFERENT_WORLD: &str = "tool.error.different-world";
    pub const TOOL_ERROR_NOT_ENOUGH_PERMS: &str = "tool.error.not-enough-perms";
}

const DEFAULTS: &[(&str, &str)] = &[
    (keys::PREFIX, "&8[&6ZoneGate&8] "),
    (keys::ACCESS_DENIED, "{prefix}&cYou are not allowed to enter this zone."),
    (keys::ACCESS_NO_TOKEN, "{prefix}&cYou need a token to stay in &e{zoneName}&c."),
    (keys::ACCESS_ENTRY_SUCCESS, "{prefix}&aEntered &e{zoneName}&a. Time left: &f{time}"),
    (keys::ACCESS_KICKED, "{prefix}&cYou were removed from &e{zoneName}&c."),
    (keys::ACCESS_TIME_WARNING, "&cZone time remaining: &f{time}s"),
    (keys::ACCESS_TOKEN_EXPIRED, "{prefix}&7Your &e{tokenName}&7 token has expired."),
    (keys::ERROR_NO_PERMISSION, "{prefix}&cYou do not have permission to do that."),
    (keys::ERROR_INVALID_USAGE, "{prefix}&cInvalid usage. {usage}"),
    (keys::ERROR_PLAYER_NOT_FOUND, "{prefix}&cPlayer &e{playerName}&c is not online."),
    (keys::PLUGIN_RELOADED, "{prefix}&aZones and tokens reloaded."),
    (keys::PLUGIN_RELOAD_ERROR, "{prefix}&cReload failed: {error}"),
    (keys::ZONE_CREATED, "{prefix}&aZone &e{zoneName}&a created with id &f{id}&a."),
    (keys::ZONE_RENAMED, "{prefix}&aZone renamed to &e{zoneName}&a."),
    (keys::ZONE_DELETED, "{prefix}&aZone &e{zoneName}&a deleted."),
    (keys::ZONE_KICK_LOCATION_SET, "{prefix}&aKick location set to &f{x}, {y}, {z}&a."),
    (keys::ZONE_LIST_EMPTY, "{prefix}&7No zones defined."),
    (keys::ZONE_LIST_HEADER, "&6Zones &7(page {page}/{total})"),
    (keys::ZONE_LIST_ITEM, "&7- &f{id}&7: &e{zoneName}"),
    (keys::ZONE_ERROR_NOT_FOUND, "{prefix}&cZone &e{zoneId}&c not found."),
    (keys::ZONE_ERROR_NOT_SELECTED, "{prefix}&cSelect two corners with the zone tool first."),
    (keys::ZONE_ERROR_KICK_INSIDE_ZONE, "{prefix}&cThe kick location cannot be inside the zone."),
    (keys::TOKEN_CREATED, "{prefix}&aToken &e{tokenName}&a created with id &f{id}&a ({duration})."),
    (keys::TOKEN_ASSIGNED, "{prefix}&aToken &e{tokenName}&a assigned to &e{zoneName}&a."),
    (keys::TOKEN_UNASSIGNED, "{prefix}&aToken &e{tokenName}&a removed from &e{zoneName}&a."),
    (keys::TOKEN_DURATION_CHANGED, "{prefix}&aToken &e{tokenName}&a now lasts &f{duration}&a."),
    (keys::TOKEN_ITEM_CONFIGURED, "{prefix}&aToken &e{tokenName}&a uses &f{itemMaterial}&a (glowing: {glowing})."),
    (keys::TOKEN_RENAMED, "{prefix}&aToken renamed to &e{tokenName}&a."),
    (keys::TOKEN_DELETED, "{prefix}&aToken &e{tokenName}&a deleted."),
    (keys::TOKEN_GIVEN, "{prefix}&aGave &e{tokenName}&a to &f{playerName}&a ({duration})."),
    (keys::TOKEN_RECEIVED, "{prefix}&aYou received &e{tokenName}&a ({duration})."),
    (keys::TOKEN_INVENTORY_FULL, "{prefix}&c{playerName}'s inventory is full."),
    (keys::TOKEN_INVENTORY_FULL_SELF, "{prefix}&cYour inventory is full."),
    (keys::TOKEN_LIST_EMPTY, "{prefix}&7No tokens defined."),
    (keys::TOKEN_LIST_HEADER, "&6Tokens &7(page {page}/{total})"),
    (keys::TOKEN_LIST_ITEM, "&7- &f{id}&7: &e{tokenName} &7-> &f{zoneName}"),
    (keys::TOKEN_LORE_ADDED, "{prefix}&aLore line added to &e{tokenName}&a."),
    (keys::TOKEN_LORE_SET, "{prefix}&aLore line {lineNumber} of &e{tokenName}&a updated."),
    (keys::TOKEN_LORE_REMOVED, "{prefix}&aLore line {lineNumber} of &e{tokenName}&a removed."),
    (keys::TOKEN_ERROR_NOT_FOUND, "{prefix}&cToken &e{tokenId}&c not found."),
    (keys::TOKEN_ERROR_INVALID_DURATION, "{prefix}&cInvalid duration. Use 90, 30s, 5m, 2h or 1d."),
    (keys::TOKEN_ERROR_INVALID_LORE_LINE, "{prefix}&cLore line {lineNumber} does not exist."),
    (keys::TOKEN_ERROR_NO_ZONE_ASSIGNED, "{prefix}&cThat token is not assigned to any zone."),
    (keys::TOKEN_ERROR_NOT_ASSIGNED, "{prefix}&cThat token is not assigned to this zone."),
    (keys::TOKEN_ERROR_NO_ITEM_IN_HAND, "{prefix}&cHold the item to use for this token."),
    (keys::TOOL_GIVEN, "{prefix}&aYou received the zone tool."),
    (keys::TOOL_POSITION1, "{prefix}&aFirst corner set to &f{x}, {y}, {z}&a."),
    (keys::TOOL_POSITION2, "{prefix}&aSecond corner set to &f{x}, {y}, {z}&a."),
    (keys::TOOL_ZONE_SELECTED, "{prefix}&aSelection complete. Create the zone to save it."),
    (keys::TOOL_ERROR_NOT_SELECTED, "{prefix}&cSet the first corner first."),
    (keys::TOOL_ERROR_DIFFERENT_WORLD, "{prefix}&cBoth corners must be in the same world."),
    (keys::TOOL_ERROR_NOT_ENOUGH_PERMS, "{prefix}&cYou cannot use the zone tool."),
];

/// Message templates: built-in defaults overlaid with configured text.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULTS
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// Defaults with `overrides` applied on top. Keys are dotted paths
    /// relative to the `messages` table (`access.kicked`, `prefix`).
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::default();
        for (k, v) in overrides {
            catalog.templates.insert(k.into(), v.into());
        }
        catalog
    }

    /// The raw template for `key`.
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Renders `key` with colour codes translated.
    ///
    /// An unknown key renders as the key itself so a missing entry is
    /// visible rather than silent. `{prefix}` is always substituted;
    /// other placeholders come from `args`. Argument values are inserted
    /// after colour translation, so a player-chosen name cannot inject
    /// colour codes into the surrounding text.
    pub fn render(&self, key: &str, args: &[(&str, &dyn Display)]) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };

        let mut text = colorize(template);
        if text.contains("{prefix}") {
            let prefix = self
                .templates
                .get(keys::PREFIX)
                .map(|p| colorize(p))
                .unwrap_or_default();
            text = text.replace("{prefix}", &prefix);
        }
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), &value.to_string());
        }
        text
    }
}
