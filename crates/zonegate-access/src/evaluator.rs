//! Entry evaluation for move, teleport and item-drop events.
//!
//! Per (player, zone) a player is OUTSIDE, INSIDE-AUTHORIZED, or
//! INSIDE-UNAUTHORIZED waiting for the next decay pass to evict them.
//! Only the OUTSIDE → INSIDE edge is evaluated here:
//!
//! 1. bypass (all zones or this zone) → allow, no bookkeeping
//! 2. no base enter capability → deny
//! 3. zone has no assigned tokens → allow
//! 4. no matching item → allow with a warning on foot, deny on teleport
//! 5. any matching token not usable by the player → deny
//! 6. seed every matching token's entitlement that is absent or zero
//!
//! A motion may enter several zones at once. All of them are planned
//! before anything is written, so a deny in one zone leaves no seeds in
//! the others.

use zonegate_registry::{TokenCatalog, Zone, ZoneRegistry};
use zonegate_store::EntitlementStore;
use zonegate_types::{
    ItemSnapshot, PlayerId, Position, TokenId, ZoneId, format_duration, keys, permissions,
};

use crate::{
    AccessConfig, EvictionReason, Host, Notifier, Presence, evict, item_matches, matching_tokens,
};

/// How the player got to the new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Walk,
    Teleport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Missing the base enter capability.
    NoEnterPermission,
    /// Carries this token but may not use it.
    NoTokenPermission(TokenId),
    /// Teleported in without any matching token.
    NoToken,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verdict {
    #[default]
    Allow,
    /// The host must cancel the motion.
    Deny { zone: ZoneId, reason: DenyReason },
}

/// Result of evaluating one motion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub verdict: Verdict,
    /// Zones entered, in registry order. Empty on deny.
    pub entered: Vec<ZoneId>,
    /// Zones left. Empty on deny.
    pub left: Vec<ZoneId>,
    /// Entitlements created by this motion as (zone, token, seconds).
    pub seeded: Vec<(ZoneId, TokenId, u64)>,
}

impl MoveOutcome {
    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allow
    }
}

/// `true` if `player` skips every check in `zone`.
pub fn is_bypassed<H: Host + ?Sized>(host: &H, player: &PlayerId, zone: &ZoneId) -> bool {
    host.has_permission(player, permissions::BYPASS_ALL)
        || host.has_permission(player, &permissions::bypass(zone))
}

/// What committing an allowed entry will do.
struct EntryPlan<'z> {
    zone: &'z Zone,
    bypass: bool,
    /// Matching tokens with their configured duration and the item that
    /// matched.
    tokens: Vec<(TokenId, u64, ItemSnapshot)>,
    missing_token: bool,
}

/// Handles position and inventory events for one player at a time.
pub struct AccessEvaluator<'a> {
    zones: &'a ZoneRegistry,
    tokens: &'a TokenCatalog,
    store: &'a mut EntitlementStore,
    presence: &'a mut Presence,
    config: &'a AccessConfig,
    notifier: Notifier<'a>,
}

impl<'a> AccessEvaluator<'a> {
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

    /// A walk from `from` to `to`.
    pub fn on_move<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        from: &Position,
        to: &Position,
    ) -> MoveOutcome {
        self.evaluate(host, player, from, to, Motion::Walk)
    }

    /// A teleport from `from` to `to`.
    pub fn on_teleport<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        from: &Position,
        to: &Position,
    ) -> MoveOutcome {
        self.evaluate(host, player, from, to, Motion::Teleport)
    }

    pub fn evaluate<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        from: &Position,
        to: &Position,
        motion: Motion,
    ) -> MoveOutcome {
        if from.same_point(to) {
            return MoveOutcome::default();
        }

        let zones: &'a ZoneRegistry = self.zones;
        let entering: Vec<&Zone> = zones
            .iter()
            .filter(|z| z.contains(to) && !z.contains(from))
            .collect();

        let mut plans = Vec::with_capacity(entering.len());
        if !entering.is_empty() {
            let inventory = host.inventory(player);
            for zone in entering {
                match self.plan_entry(host, player, zone, &inventory, motion) {
                    Ok(plan) => plans.push(plan),
                    Err(reason) => {
                        self.deny(host, player, zone, &reason, motion);
                        return MoveOutcome {
                            verdict: Verdict::Deny {
                                zone: zone.id.clone(),
                                reason,
                            },
                            ..MoveOutcome::default()
                        };
                    }
                }
            }
        }

        let mut outcome = MoveOutcome::default();

        for zone in zones.iter() {
            let was_inside = zone.contains(from) || self.presence.is_inside(player, &zone.id);
            if was_inside && !zone.contains(to) {
                self.presence.clear(player, &zone.id);
                tracing::debug!(player_id = %player, zone_id = %zone.id, "left zone");
                outcome.left.push(zone.id.clone());
            }
        }

        for plan in plans {
            outcome.entered.push(plan.zone.id.clone());
            self.commit_entry(host, player, plan, &mut outcome.seeded);
        }

        outcome
    }

    /// Handles an item leaving the player's inventory.
    ///
    /// The host calls this after the item is gone, so
    /// [`Host::inventory`] no longer lists it. Returns the zone the
    /// player was evicted from, if any. Evaluation stops at the first
    /// eviction since the player is no longer where they dropped it.
    pub fn on_item_drop<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        dropped: &ItemSnapshot,
    ) -> Option<ZoneId> {
        let pos = host.position(player)?;
        let inventory = host.inventory(player);
        let zones: &'a ZoneRegistry = self.zones;
        let tokens: &'a TokenCatalog = self.tokens;

        for zone in zones.zones_at(&pos) {
            if zone.assigned_tokens().is_empty() || is_bypassed(host, player, &zone.id) {
                continue;
            }
            let assigned: Vec<_> = zone
                .assigned_tokens()
                .iter()
                .filter_map(|id| tokens.get(id))
                .collect();
            if !assigned.iter().any(|t| item_matches(dropped, t)) {
                continue;
            }
            if !matching_tokens(zone, tokens, &inventory).is_empty() {
                continue;
            }

            evict(
                host,
                self.store,
                self.presence,
                &self.notifier,
                player,
                zone,
                EvictionReason::TokenDropped,
            );
            return Some(zone.id.clone());
        }
        None
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn plan_entry<'z, H: Host + ?Sized>(
        &self,
        host: &H,
        player: &PlayerId,
        zone: &'z Zone,
        inventory: &[ItemSnapshot],
        motion: Motion,
    ) -> Result<EntryPlan<'z>, DenyReason> {
        let mut plan = EntryPlan {
            zone,
            bypass: false,
            tokens: Vec::new(),
            missing_token: false,
        };

        if is_bypassed(host, player, &zone.id) {
            plan.bypass = true;
            return Ok(plan);
        }
        if !host.has_permission(player, permissions::ENTER) {
            return Err(DenyReason::NoEnterPermission);
        }
        if zone.assigned_tokens().is_empty() {
            return Ok(plan);
        }

        let matches = matching_tokens(zone, self.tokens, inventory);
        if matches.is_empty() {
            if motion == Motion::Teleport && self.config.teleport_requires_token {
                return Err(DenyReason::NoToken);
            }
            plan.missing_token = true;
            return Ok(plan);
        }

        for (token, item) in matches {
            if !host.has_permission(player, &permissions::use_token(&token.id))
                && !host.has_permission(player, permissions::USE_ALL)
            {
                return Err(DenyReason::NoTokenPermission(token.id.clone()));
            }
            plan.tokens
                .push((token.id.clone(), token.duration_secs, item.clone()));
        }
        Ok(plan)
    }

    fn deny<H: Host + ?Sized>(
        &self,
        host: &mut H,
        player: &PlayerId,
        zone: &Zone,
        reason: &DenyReason,
        motion: Motion,
    ) {
        tracing::debug!(
            player_id = %player,
            zone_id = %zone.id,
            ?reason,
            ?motion,
            "zone entry denied"
        );
        let key = match reason {
            DenyReason::NoToken => keys::ACCESS_NO_TOKEN,
            _ => keys::ACCESS_DENIED,
        };
        self.notifier
            .chat(host, player, key, &[("zoneName", &zone.name)]);
    }

    fn commit_entry<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        player: &PlayerId,
        plan: EntryPlan<'_>,
        seeded: &mut Vec<(ZoneId, TokenId, u64)>,
    ) {
        let zone = plan.zone;
        self.presence.mark(player, &zone.id);

        if plan.bypass {
            tracing::debug!(player_id = %player, zone_id = %zone.id, "entered zone with bypass");
            return;
        }
        if plan.missing_token {
            tracing::debug!(player_id = %player, zone_id = %zone.id, "entered zone without token");
            self.notifier
                .chat(host, player, keys::ACCESS_NO_TOKEN, &[("zoneName", &zone.name)]);
            return;
        }

        for (token, duration, item) in plan.tokens {
            let remaining = match self.store.get(player, &zone.id, &token) {
                Some(left) if left > 0 => left,
                _ => {
                    self.store.set(player, &zone.id, &token, duration);
                    seeded.push((zone.id.clone(), token.clone(), duration));
                    duration
                }
            };
            host.set_item_lore(player, item.slot, item.lore_with_time_left(remaining));
            tracing::debug!(
                player_id = %player,
                zone_id = %zone.id,
                token_id = %token,
                remaining,
                "entered zone"
            );
            self.notifier.chat(
                host,
                player,
                keys::ACCESS_ENTRY_SUCCESS,
                &[("zoneName", &zone.name), ("time", &format_duration(remaining))],
            );
        }
    }
}
