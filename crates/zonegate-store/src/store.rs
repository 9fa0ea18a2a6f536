//! The entitlement store.
//!
//! # Concurrency note
//!
//! `EntitlementStore` is a plain owned value with `HashMap`s inside and no
//! locking. The engine owns exactly one and every event handler and decay
//! pass runs to completion before the next starts. Hosts that share the
//! engine across tasks put the whole engine behind one mutex.

use std::collections::HashMap;

use zonegate_types::{PlayerId, TokenId, ZoneId};

use crate::{
    EntitlementRecord, MemoryBackend, SelectionRecord, StoreBackend, StoreError, StoreSnapshot,
    ZoneSelection,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EntitlementKey {
    player: PlayerId,
    zone: ZoneId,
    token: TokenId,
}

impl EntitlementKey {
    fn new(player: &PlayerId, zone: &ZoneId, token: &TokenId) -> Self {
        Self {
            player: player.clone(),
            zone: zone.clone(),
            token: token.clone(),
        }
    }
}

/// Remaining seconds per (player, zone, token), plus zone selections.
///
/// ## Write-through
///
/// Every mutation persists a full snapshot to the backend before
/// returning. A backend failure is logged at `warn`, counted in
/// [`persist_failures`](Self::persist_failures), and otherwise ignored:
/// the in-memory state is the source of truth for the running process.
///
/// ## Deferred writes
///
/// A decay pass touches many records in one tick. Between
/// [`begin_deferred`](Self::begin_deferred) and [`flush`](Self::flush)
/// mutations only mark the store dirty, and `flush` persists once.
pub struct EntitlementStore {
    entitlements: HashMap<EntitlementKey, u64>,
    selections: HashMap<PlayerId, ZoneSelection>,
    backend: Box<dyn StoreBackend>,
    deferred: bool,
    dirty: bool,
    persist_failures: u64,
}

impl EntitlementStore {
    /// Opens a store over `backend`, loading whatever it holds.
    ///
    /// # Errors
    /// Whatever the backend's `load` returns. A store that cannot read its
    /// own data refuses to start rather than overwrite it with nothing.
    pub fn open(backend: impl StoreBackend + 'static) -> Result<Self, StoreError> {
        let snapshot = backend.load()?;

        let mut entitlements = HashMap::with_capacity(snapshot.entitlements.len());
        for rec in snapshot.entitlements {
            // A persisted zero is a record that should have been deleted.
            if rec.remaining > 0 {
                entitlements.insert(
                    EntitlementKey {
                        player: rec.player,
                        zone: rec.zone,
                        token: rec.token,
                    },
                    rec.remaining,
                );
            }
        }

        let selections = snapshot
            .selections
            .into_iter()
            .map(|rec| {
                (
                    rec.player,
                    ZoneSelection {
                        world: rec.world,
                        first: rec.first,
                        second: rec.second,
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        tracing::info!(
            entitlements = entitlements.len(),
            selections = selections.len(),
            "entitlement store loaded"
        );

        Ok(Self {
            entitlements,
            selections,
            backend: Box::new(backend),
            deferred: false,
            dirty: false,
            persist_failures: 0,
        })
    }

    /// An empty store backed by a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self {
            entitlements: HashMap::new(),
            selections: HashMap::new(),
            backend: Box::new(MemoryBackend::new()),
            deferred: false,
            dirty: false,
            persist_failures: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Entitlements
    // -----------------------------------------------------------------------

    /// Remaining seconds, or `None` if there is no record.
    pub fn get(&self, player: &PlayerId, zone: &ZoneId, token: &TokenId) -> Option<u64> {
        self.entitlements
            .get(&EntitlementKey::new(player, zone, token))
            .copied()
    }

    /// Inserts or overwrites one record.
    pub fn set(&mut self, player: &PlayerId, zone: &ZoneId, token: &TokenId, remaining: u64) {
        self.entitlements
            .insert(EntitlementKey::new(player, zone, token), remaining);
        self.persist();
    }

    /// Deletes one record, returning what it held.
    pub fn remove_one(
        &mut self,
        player: &PlayerId,
        zone: &ZoneId,
        token: &TokenId,
    ) -> Option<u64> {
        let removed = self
            .entitlements
            .remove(&EntitlementKey::new(player, zone, token));
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    /// Deletes every record a player holds for a zone. Returns how many.
    pub fn remove_all(&mut self, player: &PlayerId, zone: &ZoneId) -> usize {
        self.remove_where(|k| &k.player == player && &k.zone == zone)
    }

    /// Deletes every record for a zone, across all players.
    pub fn remove_zone(&mut self, zone: &ZoneId) -> usize {
        self.remove_where(|k| &k.zone == zone)
    }

    /// Deletes every record for a token, across all players and zones.
    pub fn remove_token(&mut self, token: &TokenId) -> usize {
        self.remove_where(|k| &k.token == token)
    }

    fn remove_where(&mut self, pred: impl Fn(&EntitlementKey) -> bool) -> usize {
        let before = self.entitlements.len();
        self.entitlements.retain(|k, _| !pred(k));
        let removed = before - self.entitlements.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// All of a player's records for one zone, sorted by token id.
    pub fn for_zone(&self, player: &PlayerId, zone: &ZoneId) -> Vec<(TokenId, u64)> {
        let mut out: Vec<(TokenId, u64)> = self
            .entitlements
            .iter()
            .filter(|(k, _)| &k.player == player && &k.zone == zone)
            .map(|(k, v)| (k.token.clone(), *v))
            .collect();
        out.sort();
        out
    }

    /// All of a player's records, sorted by (zone, token).
    pub fn for_player(&self, player: &PlayerId) -> Vec<(ZoneId, TokenId, u64)> {
        let mut out: Vec<(ZoneId, TokenId, u64)> = self
            .entitlements
            .iter()
            .filter(|(k, _)| &k.player == player)
            .map(|(k, v)| (k.zone.clone(), k.token.clone(), *v))
            .collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.entitlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entitlements.is_empty()
    }

    // -----------------------------------------------------------------------
    // Selections
    // -----------------------------------------------------------------------

    pub fn selection(&self, player: &PlayerId) -> Option<&ZoneSelection> {
        self.selections.get(player)
    }

    /// Replaces the player's selection.
    pub fn set_selection(&mut self, player: &PlayerId, selection: ZoneSelection) {
        self.selections.insert(player.clone(), selection);
        self.persist();
    }

    /// Returns `true` if there was a selection to clear.
    pub fn clear_selection(&mut self, player: &PlayerId) -> bool {
        let existed = self.selections.remove(player).is_some();
        if existed {
            self.persist();
        }
        existed
    }

    /// Drops every selection. Used on reload.
    pub fn clear_selections(&mut self) {
        if !self.selections.is_empty() {
            self.selections.clear();
            self.persist();
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Starts batching writes until [`flush`](Self::flush).
    pub fn begin_deferred(&mut self) {
        self.deferred = true;
    }

    /// Ends batching and persists once if anything changed.
    pub fn flush(&mut self) {
        self.deferred = false;
        if self.dirty {
            self.write_snapshot();
        }
    }

    /// How many persists have failed since the store was opened.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures
    }

    /// The current state in persisted form, sorted for stable output.
    pub fn snapshot(&self) -> StoreSnapshot {
        let mut entitlements: Vec<EntitlementRecord> = self
            .entitlements
            .iter()
            .map(|(k, v)| EntitlementRecord {
                player: k.player.clone(),
                zone: k.zone.clone(),
                token: k.token.clone(),
                remaining: *v,
            })
            .collect();
        entitlements.sort_by(|a, b| {
            (&a.player, &a.zone, &a.token).cmp(&(&b.player, &b.zone, &b.token))
        });

        let mut selections: Vec<SelectionRecord> = self
            .selections
            .iter()
            .map(|(player, s)| SelectionRecord {
                player: player.clone(),
                world: s.world.clone(),
                first: s.first,
                second: s.second,
            })
            .collect();
        selections.sort_by(|a, b| a.player.cmp(&b.player));

        StoreSnapshot {
            entitlements,
            selections,
        }
    }

    fn persist(&mut self) {
        if self.deferred {
            self.dirty = true;
        } else {
            self.write_snapshot();
        }
    }

    fn write_snapshot(&mut self) {
        let snapshot = self.snapshot();
        self.dirty = false;
        // No retry; the next mutation writes a full snapshot.
        if let Err(e) = self.backend.persist(&snapshot) {
            self.persist_failures += 1;
            tracing::warn!(
                error = %e,
                failures = self.persist_failures,
                "failed to persist entitlement store"
            );
        }
    }
}
