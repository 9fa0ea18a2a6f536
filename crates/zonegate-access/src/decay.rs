//! One tick of entitlement decay.

use zonegate_registry::{TokenCatalog, Zone, ZoneRegistry};
use zonegate_store::EntitlementStore;
use zonegate_types::{PlayerId, TokenId, ZoneId, keys};

use crate::{
    AccessConfig, Eviction, EvictionReason, Host, Notifier, Presence, evict, find_item,
    is_bypassed, matching_tokens,
};

/// What a decay pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecayReport {
    /// Online players examined.
    pub players: usize,
    /// Entitlements decremented by one second.
    pub decremented: usize,
    /// Countdown warnings shown.
    pub warnings: usize,
    /// Entitlements that reached zero this pass.
    pub expired: Vec<(PlayerId, ZoneId, TokenId)>,
    pub evictions: Vec<Eviction>,
}

/// Burns one second off every active entitlement.
///
/// For each online player and each zone containing them (bypassing
/// players skipped):
///
/// - no item matching any assigned token → evict;
/// - otherwise every assigned token with a positive entitlement loses a
///   second, and its item's countdown line is refreshed. A token that
///   hits zero loses its record and its item;
/// - if no assigned token had time left → evict.
///
/// Store writes are deferred for the pass and flushed once at the end.
pub struct DecayPass<'a> {
    zones: &'a ZoneRegistry,
    tokens: &'a TokenCatalog,
    store: &'a mut EntitlementStore,
    presence: &'a mut Presence,
    config: &'a AccessConfig,
    notifier: Notifier<'a>,
}

impl<'a> DecayPass<'a> {
    pub fn new(
        zones: &'a ZoneRegistry,
        tokens: &'a TokenCatalog,
        store: &'a mut EntitlementStore,
        presence: &'a mut Presence,
        config: &'a AccessConfig,
        notifier: Notifier<'a>,
    ) -> Self {
        Self {
            zones,
            tokens,
            store,
            presence,
            config,
            notifier,
        }
    }

    pub fn run<H: Host + ?Sized>(&mut self, host: &mut H) -> DecayReport {
        let mut report = DecayReport::default();
        let zones: &'a ZoneRegistry = self.zones;

        self.store.begin_deferred();
        for player in host.online_players() {
            report.players += 1;
            let Some(pos) = host.position(&player) else {
                continue;
            };
            for zone in zones.zones_at(&pos) {
                // An evicted player has been moved; the remaining zones
                // were computed for the old position.
                if self.decay_zone(host, &player, zone, &mut report) {
                    break;
                }
            }
        }
        self.store.flush();

        tracing::trace!(
            players = report.players,
            decremented = report.decremented,
            evictions = report.evictions.len(),
            "decay pass"
        );
        report
    }

    /// Returns `true` if the player was evicted.
    fn decay_zone<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        zone: &Zone,
        report: &mut DecayReport,
    ) -> bool {
        if zone.assigned_tokens().is_empty() || is_bypassed(host, player, &zone.id) {
            return false;
        }

        let inventory = host.inventory(player);
        if matching_tokens(zone, self.tokens, &inventory).is_empty() {
            let eviction = evict(
                host,
                self.store,
                self.presence,
                &self.notifier,
                player,
                zone,
                EvictionReason::NoToken,
            );
            report.evictions.push(eviction);
            return true;
        }

        let mut any_time_left = false;
        for token_id in zone.assigned_tokens() {
            let Some(remaining) = self
                .store
                .get(player, &zone.id, token_id)
                .filter(|left| *left > 0)
            else {
                continue;
            };
            any_time_left = true;

            if remaining <= self.config.time_warning_threshold {
                self.notifier
                    .action_bar(host, player, keys::ACCESS_TIME_WARNING, &[("time", &remaining)]);
                report.warnings += 1;
            }

            let remaining = remaining - 1;
            report.decremented += 1;
            let token = self.tokens.get(token_id);
            let item = token.and_then(|t| find_item(&inventory, t));

            if remaining == 0 {
                self.store.remove_one(player, &zone.id, token_id);
                if let Some(item) = item {
                    host.remove_item(player, item.slot);
                }
                if let Some(token) = token {
                    self.notifier.chat(
                        host,
                        player,
                        keys::ACCESS_TOKEN_EXPIRED,
                        &[("tokenName", &token.name)],
                    );
                }
                tracing::debug!(player_id = %player, zone_id = %zone.id, token_id = %token_id, "entitlement expired");
                report
                    .expired
                    .push((player.clone(), zone.id.clone(), token_id.clone()));
            } else {
                self.store.set(player, &zone.id, token_id, remaining);
                if let Some(item) = item {
                    host.set_item_lore(player, item.slot, item.lore_with_time_left(remaining));
                }
            }
        }

        if !any_time_left {
            let eviction = evict(
                host,
                self.store,
                self.presence,
                &self.notifier,
                player,
                zone,
                EvictionReason::Expired,
            );
            report.evictions.push(eviction);
            return true;
        }
        false
    }
}
