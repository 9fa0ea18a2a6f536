use serde::{Deserialize, Serialize};
use zonegate_types::{DEFAULT_TOKEN_MATERIAL, TokenId, ZoneId};

/// A kind of token: what it is called, how long it lasts, what its item
/// looks like, and which zones it opens.
///
/// Mutate through [`TokenCatalog`](crate::TokenCatalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTemplate {
    pub id: TokenId,
    pub name: String,
    /// Seconds a freshly seeded entitlement receives.
    pub duration_secs: u64,
    pub material: String,
    pub glowing: bool,
    lore: Vec<String>,
    zones: Vec<ZoneId>,
    /// Last zone the token was assigned to. Kept for display and for
    /// files written before tokens could open several zones; `zones` is
    /// authoritative.
    primary_zone: Option<ZoneId>,
}

impl TokenTemplate {
    pub fn new(id: TokenId, name: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            id,
            name: name.into(),
            duration_secs,
            material: DEFAULT_TOKEN_MATERIAL.to_string(),
            glowing: false,
            lore: Vec::new(),
            zones: Vec::new(),
            primary_zone: None,
        }
    }

    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    /// Zones this token opens, in assignment order.
    pub fn assigned_zones(&self) -> &[ZoneId] {
        &self.zones
    }

    pub fn is_assigned_to(&self, zone: &ZoneId) -> bool {
        self.zones.contains(zone)
    }

    pub fn primary_zone(&self) -> Option<&ZoneId> {
        self.primary_zone.as_ref()
    }

    pub(crate) fn push_lore(&mut self, line: String) {
        self.lore.push(line);
    }

    pub(crate) fn lore_mut(&mut self) -> &mut Vec<String> {
        &mut self.lore
    }

    /// Adds `zone` if absent and makes it the primary zone.
    pub(crate) fn assign(&mut self, zone: ZoneId) -> bool {
        if self.zones.contains(&zone) {
            return false;
        }
        self.primary_zone = Some(zone.clone());
        self.zones.push(zone);
        true
    }

    /// Removes `zone`. If it was the primary zone, the first remaining
    /// zone takes over.
    pub(crate) fn unassign(&mut self, zone: &ZoneId) -> bool {
        let before = self.zones.len();
        self.zones.retain(|z| z != zone);
        let changed = before != self.zones.len();
        if self.primary_zone.as_ref() == Some(zone) {
            self.primary_zone = self.zones.first().cloned();
        }
        changed
    }

    pub(crate) fn set_primary(&mut self, zone: Option<ZoneId>) {
        self.primary_zone = zone;
    }
}
