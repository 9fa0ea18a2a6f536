//! Presence markers.

use std::collections::{HashMap, HashSet};

use zonegate_types::{PlayerId, ZoneId};

/// Which players the evaluator has seen enter which zones.
///
/// Markers are advisory: they record an OUTSIDE → INSIDE transition that
/// was allowed, and are cleared on exit, eviction, quit and reload.
/// Entitlements live in the store and outlast every marker.
#[derive(Debug, Default, Clone)]
pub struct Presence {
    inside: HashMap<PlayerId, HashSet<ZoneId>>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the marker is new.
    pub fn mark(&mut self, player: &PlayerId, zone: &ZoneId) -> bool {
        self.inside
            .entry(player.clone())
            .or_default()
            .insert(zone.clone())
    }

    /// Returns `true` if a marker was removed.
    pub fn clear(&mut self, player: &PlayerId, zone: &ZoneId) -> bool {
        let Some(zones) = self.inside.get_mut(player) else {
            return false;
        };
        let removed = zones.remove(zone);
        if zones.is_empty() {
            self.inside.remove(player);
        }
        removed
    }

    pub fn is_inside(&self, player: &PlayerId, zone: &ZoneId) -> bool {
        self.inside
            .get(player)
            .is_some_and(|zones| zones.contains(zone))
    }

    /// Zones `player` is marked inside, sorted by id.
    pub fn zones_of(&self, player: &PlayerId) -> Vec<ZoneId> {
        let mut zones: Vec<ZoneId> = self
            .inside
            .get(player)
            .map(|z| z.iter().cloned().collect())
            .unwrap_or_default();
        zones.sort();
        zones
    }

    /// Drops every marker of one player. Returns how many were removed.
    pub fn clear_player(&mut self, player: &PlayerId) -> usize {
        self.inside.remove(player).map_or(0, |z| z.len())
    }

    /// Drops every marker for one zone.
    pub fn clear_zone(&mut self, zone: &ZoneId) -> usize {
        let mut removed = 0;
        self.inside.retain(|_, zones| {
            if zones.remove(zone) {
                removed += 1;
            }
            !zones.is_empty()
        });
        removed
    }

    pub fn clear_all(&mut self) {
        self.inside.clear();
    }

    /// Number of (player, zone) markers.
    pub fn len(&self) -> usize {
        self.inside.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }
}
