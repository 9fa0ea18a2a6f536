//! The zone registry.

use std::collections::HashMap;

use zonegate_types::{BlockPos, Cuboid, KickDestination, Position, TokenId, ZoneId};

use crate::store::load_records;
use crate::{MemoryRecordStore, RecordStore, RegistryError, Zone, ZoneRecord};

/// All zones, in load/creation order.
///
/// Lookups by id are O(1). Name and position lookups scan, which is fine
/// for the tens-to-hundreds of zones a server defines.
pub struct ZoneRegistry {
    order: Vec<ZoneId>,
    zones: HashMap<ZoneId, Zone>,
    /// Storage key per zone. Equal to the id except for hand-written
    /// files that were given an id on load.
    keys: HashMap<ZoneId, String>,
    next_id: u64,
    store: Box<dyn RecordStore<ZoneRecord>>,
    persist_failures: u64,
}

impl ZoneRegistry {
    /// Loads every zone from `store`.
    ///
    /// # Errors
    /// If the store as a whole cannot be read.
    pub fn load(store: impl RecordStore<ZoneRecord> + 'static) -> Result<Self, RegistryError> {
        let mut registry = Self {
            order: Vec::new(),
            zones: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            store: Box::new(store),
            persist_failures: 0,
        };
        registry.reload()?;
        Ok(registry)
    }

    /// An empty registry over a throwaway memory store.
    pub fn in_memory() -> Self {
        Self {
            order: Vec::new(),
            zones: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            store: Box::new(MemoryRecordStore::<ZoneRecord>::new()),
            persist_failures: 0,
        }
    }

    /// Re-reads every zone from the store and swaps the whole registry.
    ///
    /// On error nothing changes.
    pub fn reload(&mut self) -> Result<usize, RegistryError> {
        let loaded = load_records(self.store.as_ref(), "zone")?;

        let mut order = Vec::with_capacity(loaded.records.len());
        let mut zones = HashMap::with_capacity(loaded.records.len());
        let mut keys = HashMap::with_capacity(loaded.records.len());
        for (key, id, record) in loaded.records {
            let id = ZoneId::new(id);
            let zone = record.into_zone(id.clone(), &key);
            order.push(id.clone());
            keys.insert(id.clone(), key);
            zones.insert(id, zone);
        }

        self.order = order;
        self.zones = zones;
        self.keys = keys;
        self.next_id = loaded.next_id;

        tracing::info!(zones = self.order.len(), "zones loaded");
        Ok(self.order.len())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: &ZoneId) -> Option<&Zone> {
        self.zones.get(id)
    }

    /// First zone, in load order, whose name matches case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Option<&Zone> {
        self.iter().find(|z| z.name.eq_ignore_ascii_case(name))
    }

    /// Zones in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.order.iter().filter_map(|id| self.zones.get(id))
    }

    /// Snapshot copy of every zone, in load order.
    pub fn list(&self) -> Vec<Zone> {
        self.iter().cloned().collect()
    }

    /// Every zone containing `pos`, in load order.
    pub fn zones_at(&self, pos: &Position) -> Vec<&Zone> {
        self.iter().filter(|z| z.contains(pos)).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Creates a zone from two corners in any order.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        corner1: BlockPos,
        corner2: BlockPos,
        world: impl Into<String>,
    ) -> &Zone {
        let id = ZoneId::from_number(self.next_id);
        self.next_id += 1;

        let zone = Zone::new(id.clone(), name, world, Cuboid::new(corner1, corner2));
        tracing::info!(zone_id = %id, name = %zone.name, world = %zone.world, "zone created");

        self.order.push(id.clone());
        self.keys.insert(id.clone(), id.as_str().to_string());
        self.zones.insert(id.clone(), zone);
        self.save(&id);
        &self.zones[&id]
    }

    pub fn rename(&mut self, id: &ZoneId, name: impl Into<String>) -> Result<&Zone, RegistryError> {
        self.get_mut(id)?.name = name.into();
        self.save(id);
        Ok(&self.zones[id])
    }

    /// Sets where evicted players are sent.
    ///
    /// # Errors
    /// [`RegistryError::KickInsideZone`] if the destination block is in
    /// the zone itself, which would evict players back into it.
    pub fn set_kick_location(
        &mut self,
        id: &ZoneId,
        kick: KickDestination,
    ) -> Result<&Zone, RegistryError> {
        let zone = self.get_mut(id)?;
        if kick.world == zone.world
            && zone
                .cuboid
                .contains_block(BlockPos::new(kick.x, kick.y, kick.z))
        {
            return Err(RegistryError::KickInsideZone(id.clone()));
        }
        zone.kick = kick;
        self.save(id);
        Ok(&self.zones[id])
    }

    /// Adds `token` to the zone's set. Idempotent.
    pub fn assign_token(&mut self, id: &ZoneId, token: &TokenId) -> Result<bool, RegistryError> {
        let changed = self.get_mut(id)?.assign(token.clone());
        if changed {
            self.save(id);
        }
        Ok(changed)
    }

    /// Removes `token` from the zone's set. Idempotent.
    pub fn unassign_token(&mut self, id: &ZoneId, token: &TokenId) -> Result<bool, RegistryError> {
        let changed = self.get_mut(id)?.unassign(token);
        if changed {
            self.save(id);
        }
        Ok(changed)
    }

    /// Removes `token` from every zone. Returns the zones that changed.
    pub fn unassign_token_everywhere(&mut self, token: &TokenId) -> Vec<ZoneId> {
        let changed: Vec<ZoneId> = self
            .order
            .iter()
            .filter(|id| {
                self.zones
                    .get(*id)
                    .is_some_and(|z| z.is_token_assigned(token))
            })
            .cloned()
            .collect();
        for id in &changed {
            if let Some(zone) = self.zones.get_mut(id) {
                zone.unassign(token);
            }
            self.save(id);
        }
        changed
    }

    /// Deletes a zone and its record.
    pub fn delete(&mut self, id: &ZoneId) -> Result<Zone, RegistryError> {
        let zone = self
            .zones
            .remove(id)
            .ok_or_else(|| RegistryError::ZoneNotFound(id.clone()))?;
        self.order.retain(|z| z != id);
        let key = self.keys.remove(id).unwrap_or_else(|| id.as_str().to_string());
        if let Err(e) = self.store.remove(&key) {
            self.persist_failures += 1;
            tracing::warn!(zone_id = %id, error = %e, "failed to remove zone record");
        }
        tracing::info!(zone_id = %id, name = %zone.name, "zone deleted");
        Ok(zone)
    }

    fn get_mut(&mut self, id: &ZoneId) -> Result<&mut Zone, RegistryError> {
        self.zones
            .get_mut(id)
            .ok_or_else(|| RegistryError::ZoneNotFound(id.clone()))
    }

    fn save(&mut self, id: &ZoneId) {
        let Some(zone) = self.zones.get(id) else {
            return;
        };
        let record = ZoneRecord::from_zone(zone);
        let key = self
            .keys
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.as_str().to_string());
        if let Err(e) = self.store.save(&key, &record) {
            self.persist_failures += 1;
            tracing::warn!(zone_id = %id, error = %e, "failed to persist zone");
        }
    }
}
