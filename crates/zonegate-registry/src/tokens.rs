//! The token catalog.

use std::collections::HashMap;

use zonegate_types::{TokenId, ZoneId};

use crate::store::load_records;
use crate::{MemoryRecordStore, RecordStore, RegistryError, TokenRecord, TokenTemplate};

/// All token templates, in load/creation order.
pub struct TokenCatalog {
    order: Vec<TokenId>,
    tokens: HashMap<TokenId, TokenTemplate>,
    keys: HashMap<TokenId, String>,
    next_id: u64,
    store: Box<dyn RecordStore<TokenRecord>>,
    persist_failures: u64,
}

impl TokenCatalog {
    /// Loads every token from `store`.
    ///
    /// # Errors
    /// If the store as a whole cannot be read.
    pub fn load(store: impl RecordStore<TokenRecord> + 'static) -> Result<Self, RegistryError> {
        let mut catalog = Self {
            order: Vec::new(),
            tokens: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            store: Box::new(store),
            persist_failures: 0,
        };
        catalog.reload()?;
        Ok(catalog)
    }

    pub fn in_memory() -> Self {
        Self {
            order: Vec::new(),
            tokens: HashMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            store: Box::new(MemoryRecordStore::<TokenRecord>::new()),
            persist_failures: 0,
        }
    }

    /// Re-reads every token and swaps the whole catalog. On error nothing
    /// changes.
    pub fn reload(&mut self) -> Result<usize, RegistryError> {
        let loaded = load_records(self.store.as_ref(), "token")?;

        let mut order = Vec::with_capacity(loaded.records.len());
        let mut tokens = HashMap::with_capacity(loaded.records.len());
        let mut keys = HashMap::with_capacity(loaded.records.len());
        for (key, id, record) in loaded.records {
            let id = TokenId::new(id);
            let token = record.into_token(id.clone(), &key);
            order.push(id.clone());
            keys.insert(id.clone(), key);
            tokens.insert(id, token);
        }

        self.order = order;
        self.tokens = tokens;
        self.keys = keys;
        self.next_id = loaded.next_id;

        tracing::info!(tokens = self.order.len(), "tokens loaded");
        Ok(self.order.len())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: &TokenId) -> Option<&TokenTemplate> {
        self.tokens.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TokenTemplate> {
        self.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenTemplate> {
        self.order.iter().filter_map(|id| self.tokens.get(id))
    }

    pub fn list(&self) -> Vec<TokenTemplate> {
        self.iter().cloned().collect()
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

    pub fn create(&mut self, name: impl Into<String>, duration_secs: u64) -> &TokenTemplate {
        let id = TokenId::from_number(self.next_id);
        self.next_id += 1;

        let token = TokenTemplate::new(id.clone(), name, duration_secs);
        tracing::info!(token_id = %id, name = %token.name, duration_secs, "token created");

        self.order.push(id.clone());
        self.keys.insert(id.clone(), id.as_str().to_string());
        self.tokens.insert(id.clone(), token);
        self.save(&id);
        &self.tokens[&id]
    }

    pub fn rename(
        &mut self,
        id: &TokenId,
        name: impl Into<String>,
    ) -> Result<&TokenTemplate, RegistryError> {
        self.get_mut(id)?.name = name.into();
        self.save(id);
        Ok(&self.tokens[id])
    }

    /// Changes the duration new entitlements receive. Existing
    /// entitlements keep their remaining time.
    pub fn set_duration(
        &mut self,
        id: &TokenId,
        duration_secs: u64,
    ) -> Result<&TokenTemplate, RegistryError> {
        self.get_mut(id)?.duration_secs = duration_secs;
        self.save(id);
        Ok(&self.tokens[id])
    }

    pub fn set_item_appearance(
        &mut self,
        id: &TokenId,
        material: impl Into<String>,
        glowing: bool,
    ) -> Result<&TokenTemplate, RegistryError> {
        let token = self.get_mut(id)?;
        token.material = material.into();
        token.glowing = glowing;
        self.save(id);
        Ok(&self.tokens[id])
    }

    // ---- lore (0-based) ----

    pub fn add_lore_line(
        &mut self,
        id: &TokenId,
        line: impl Into<String>,
    ) -> Result<&TokenTemplate, RegistryError> {
        self.get_mut(id)?.push_lore(line.into());
        self.save(id);
        Ok(&self.tokens[id])
    }

    pub fn set_lore_line(
        &mut self,
        id: &TokenId,
        index: usize,
        line: impl Into<String>,
    ) -> Result<&TokenTemplate, RegistryError> {
        let lore = self.get_mut(id)?.lore_mut();
        let len = lore.len();
        let slot = lore
            .get_mut(index)
            .ok_or(RegistryError::LoreLineOutOfRange { index, len })?;
        *slot = line.into();
        self.save(id);
        Ok(&self.tokens[id])
    }

    /// Removes and returns the line at `index`.
    pub fn remove_lore_line(
        &mut self,
        id: &TokenId,
        index: usize,
    ) -> Result<String, RegistryError> {
        let lore = self.get_mut(id)?.lore_mut();
        if index >= lore.len() {
            return Err(RegistryError::LoreLineOutOfRange {
                index,
                len: lore.len(),
            });
        }
        let removed = lore.remove(index);
        self.save(id);
        Ok(removed)
    }

    // ---- zone assignment ----

    /// Adds `zone` to the token's set. Idempotent.
    pub fn assign_to_zone(&mut self, id: &TokenId, zone: &ZoneId) -> Result<bool, RegistryError> {
        let changed = self.get_mut(id)?.assign(zone.clone());
        if changed {
            self.save(id);
        }
        Ok(changed)
    }

    /// Removes `zone` from the token's set. Idempotent.
    pub fn unassign_from_zone(
        &mut self,
        id: &TokenId,
        zone: &ZoneId,
    ) -> Result<bool, RegistryError> {
        let changed = self.get_mut(id)?.unassign(zone);
        if changed {
            self.save(id);
        }
        Ok(changed)
    }

    /// Removes `zone` from every token. Returns the tokens that changed.
    pub fn unassign_zone_everywhere(&mut self, zone: &ZoneId) -> Vec<TokenId> {
        let changed: Vec<TokenId> = self
            .order
            .iter()
            .filter(|id| self.tokens.get(*id).is_some_and(|t| t.is_assigned_to(zone)))
            .cloned()
            .collect();
        for id in &changed {
            if let Some(token) = self.tokens.get_mut(id) {
                token.unassign(zone);
            }
            self.save(id);
        }
        changed
    }

    pub fn delete(&mut self, id: &TokenId) -> Result<TokenTemplate, RegistryError> {
        let token = self
            .tokens
            .remove(id)
            .ok_or_else(|| RegistryError::TokenNotFound(id.clone()))?;
        self.order.retain(|t| t != id);
        let key = self.keys.remove(id).unwrap_or_else(|| id.as_str().to_string());
        if let Err(e) = self.store.remove(&key) {
            self.persist_failures += 1;
            tracing::warn!(token_id = %id, error = %e, "failed to remove token record");
        }
        tracing::info!(token_id = %id, name = %token.name, "token deleted");
        Ok(token)
    }

    fn get_mut(&mut self, id: &TokenId) -> Result<&mut TokenTemplate, RegistryError> {
        self.tokens
            .get_mut(id)
            .ok_or_else(|| RegistryError::TokenNotFound(id.clone()))
    }

    fn save(&mut self, id: &TokenId) {
        let Some(token) = self.tokens.get(id) else {
            return;
        };
        let record = TokenRecord::from_token(token);
        let key = self
            .keys
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.as_str().to_string());
        if let Err(e) = self.store.save(&key, &record) {
            self.persist_failures += 1;
            tracing::warn!(token_id = %id, error = %e, "failed to persist token");
        }
    }
}
