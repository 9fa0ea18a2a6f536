//! Item snapshots.
//!
//! The host owns real inventories; ZoneGate only ever sees an
//! [`ItemSnapshot`] per occupied slot. Items minted for a token carry a
//! hidden `token_tag` with the token's id. Older items have no tag and
//! are recognized by display name instead (see the access crate).

use serde::{Deserialize, Serialize};

use crate::{TokenId, colorize, format_hms, strip_color};

/// Material a token item uses when none was configured.
pub const DEFAULT_TOKEN_MATERIAL: &str = "PAPER";

/// Marker text identifying the countdown line in an item's lore.
pub const TIME_LEFT_LABEL: &str = "Time Left";

/// One occupied inventory slot as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    /// Host-defined slot index. Ignored by `Host::give_item`, which
    /// picks a free slot itself.
    pub slot: usize,
    pub material: String,
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    pub glowing: bool,
    /// Id of the token this item was minted for.
    pub token_tag: Option<TokenId>,
}

impl ItemSnapshot {
    pub fn new(slot: usize, material: impl Into<String>) -> Self {
        Self {
            slot,
            material: material.into(),
            display_name: None,
            lore: Vec::new(),
            glowing: false,
            token_tag: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    pub fn with_tag(mut self, token: TokenId) -> Self {
        self.token_tag = Some(token);
        self
    }

    pub fn with_glow(mut self, glowing: bool) -> Self {
        self.glowing = glowing;
        self
    }

    /// Display name without colour codes, if any.
    pub fn plain_name(&self) -> Option<String> {
        self.display_name.as_deref().map(strip_color)
    }

    /// Lore with the countdown line set to `remaining`.
    ///
    /// The first line mentioning [`TIME_LEFT_LABEL`] is replaced; if
    /// there is none the line is appended.
    pub fn lore_with_time_left(&self, remaining: u64) -> Vec<String> {
        let line = time_left_line(remaining);
        let mut lore = self.lore.clone();
        match lore
            .iter()
            .position(|l| strip_color(l).contains(TIME_LEFT_LABEL))
        {
            Some(idx) => lore[idx] = line,
            None => lore.push(line),
        }
        lore
    }

    /// Seconds shown on the countdown line, if present and well formed.
    pub fn time_left(&self) -> Option<u64> {
        let line = self
            .lore
            .iter()
            .map(|l| strip_color(l))
            .find(|l| l.contains(TIME_LEFT_LABEL))?;
        let start = line.find('[')? + 1;
        let end = line[start..].find(']')? + start;
        parse_hms(&line[start..end])
    }
}

/// The rendered countdown line for `remaining` seconds.
pub fn time_left_line(remaining: u64) -> String {
    colorize(&format!("&7{TIME_LEFT_LABEL}: &f[{}]", format_hms(remaining)))
}

fn parse_hms(text: &str) -> Option<u64> {
    let mut parts = text.split(':');
    let h: u64 = parts.next()?.parse().ok()?;
    let m: u64 = parts.next()?.parse().ok()?;
    let s: u64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || m >= 60 || s >= 60 {
        return None;
    }
    Some(h * 3_600 + m * 60 + s)
}
