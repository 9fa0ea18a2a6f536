//! Placeholder resolution for hosts with a text-template system.
//!
//! | identifier | value |
//! |---|---|
//! | `current_zone`, `zone_name` | name of the first zone the player is in, or `None` |
//! | `in_zone` | `yes` / `no` |
//! | `token_name` | token of the held item, or `None` |
//! | `token_time_left` | countdown on the held item (`H:MM:SS`), or `0` |
//! | `token_duration` | configured seconds of the held token, or `0` |
//! | `zone_time_left` | largest remaining entitlement in the current zone, or `0` |
//!
//! Identifiers may carry the `zonegate_` prefix and are case-insensitive.

use zonegate_access::{Host, item_matches};
use zonegate_registry::{TokenTemplate, Zone};
use zonegate_types::{PlayerId, format_hms};

use crate::ZoneGate;

pub const PLACEHOLDER_PREFIX: &str = "zonegate_";

impl<H: Host> ZoneGate<H> {
    /// Resolves one identifier for `player`. Unknown identifiers yield
    /// `None` so the host can leave them untouched.
    pub fn placeholder(&self, player: &PlayerId, identifier: &str) -> Option<String> {
        let identifier = identifier.to_ascii_lowercase();
        let name = identifier
            .strip_prefix(PLACEHOLDER_PREFIX)
            .unwrap_or(&identifier);

        let value = match name {
            "current_zone" | "zone_name" => self
                .current_zone(player)
                .map_or_else(|| "None".to_string(), |z| z.name.clone()),
            "in_zone" => {
                if self.current_zone(player).is_some() {
                    "yes".to_string()
                } else {
                    "no".to_string()
                }
            }
            "token_name" => self
                .held_token(player)
                .map_or_else(|| "None".to_string(), |t| t.name.clone()),
            "token_time_left" => self
                .host
                .held_item(player)
                .and_then(|item| item.time_left())
                .map_or_else(|| "0".to_string(), format_hms),
            "token_duration" => self
                .held_token(player)
                .map_or(0, |t| t.duration_secs)
                .to_string(),
            "zone_time_left" => self
                .current_zone(player)
                .and_then(|zone| {
                    self.store
                        .for_zone(player, &zone.id)
                        .into_iter()
                        .map(|(_, remaining)| remaining)
                        .max()
                })
                .unwrap_or(0)
                .to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Replaces every `%zonegate_<identifier>%` in `text`. Unknown
    /// identifiers are left as written.
    pub fn expand_placeholders(&self, player: &PlayerId, text: &str) -> String {
        let marker = format!("%{PLACEHOLDER_PREFIX}");
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(&marker) {
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                break;
            };
            out.push_str(&rest[..start]);
            match self.placeholder(player, &after[..end]) {
                Some(value) => out.push_str(&value),
                None => out.push_str(&rest[start..start + end + 2]),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        out
    }

    fn current_zone(&self, player: &PlayerId) -> Option<&Zone> {
        let pos = self.host.position(player)?;
        self.zones.zones_at(&pos).into_iter().next()
    }

    /// The token the held item was minted for, or a legacy item's
    /// token by name.
    fn held_token(&self, player: &PlayerId) -> Option<&TokenTemplate> {
        let item = self.host.held_item(player)?;
        match &item.token_tag {
            Some(id) => self.tokens.get(id),
            None => self.tokens.iter().find(|t| item_matches(&item, t)),
        }
    }
}
