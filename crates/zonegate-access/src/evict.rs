//! The eviction primitive.

use std::fmt;

use zonegate_registry::Zone;
use zonegate_store::EntitlementStore;
use zonegate_types::{PlayerId, Position, ZoneId, keys};

use crate::{Host, Notifier, Presence};

/// Why a player was removed from a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionReason {
    /// Inside a token zone without any matching item.
    NoToken,
    /// Every entitlement for the zone has run out.
    Expired,
    /// Dropped the last qualifying token while inside.
    TokenDropped,
}

impl fmt::Display for EvictionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoToken => write!(f, "no token"),
            Self::Expired => write!(f, "expired"),
            Self::TokenDropped => write!(f, "token dropped"),
        }
    }
}

/// What an eviction did.
#[derive(Debug, Clone, PartialEq)]
pub struct Eviction {
    pub player: PlayerId,
    pub zone: ZoneId,
    pub reason: EvictionReason,
    /// Where the player was sent, or `None` if no destination resolved.
    pub destination: Option<Position>,
    /// Entitlement records removed for (player, zone).
    pub cleared: usize,
}

/// Removes `player` from `zone`.
///
/// 1. Teleport to the zone's kick destination. If that world does not
///    exist, or the destination lies inside the zone, fall back to the
///    spawn of the world the player is in. If the spawn is inside the
///    zone too, step the player out over the nearest side wall.
/// 2. Tell the player.
/// 3. Clear every entitlement the player holds for the zone.
/// 4. Clear the presence marker.
pub fn evict<H: Host + ?Sized>(
    host: &mut H,
    store: &mut EntitlementStore,
    presence: &mut Presence,
    notifier: &Notifier<'_>,
    player: &PlayerId,
    zone: &Zone,
    reason: EvictionReason,
) -> Eviction {
    let destination = kick_destination(host, player, zone);

    match &destination {
        Some(to) => {
            if !host.teleport(player, to) {
                tracing::warn!(player_id = %player, zone_id = %zone.id, "kick teleport refused by host");
            }
        }
        None => {
            tracing::warn!(
                player_id = %player,
                zone_id = %zone.id,
                kick_world = %zone.kick.world,
                "no kick destination resolved"
            );
        }
    }

    notifier.chat(host, player, keys::ACCESS_KICKED, &[("zoneName", &zone.name)]);

    let cleared = store.remove_all(player, &zone.id);
    presence.clear(player, &zone.id);

    tracing::info!(player_id = %player, zone_id = %zone.id, %reason, cleared, "player evicted");

    Eviction {
        player: player.clone(),
        zone: zone.id.clone(),
        reason,
        destination,
        cleared,
    }
}

/// The first candidate outside `zone`: kick point, spawn, side wall.
fn kick_destination<H: Host + ?Sized>(
    host: &H,
    player: &PlayerId,
    zone: &Zone,
) -> Option<Position> {
    if host.world_exists(&zone.kick.world) {
        let kick = zone.kick.to_position();
        if !zone.contains(&kick) {
            return Some(kick);
        }
        tracing::warn!(zone_id = %zone.id, "kick destination is inside the zone");
    }

    let current = host.position(player)?;
    match host.world_spawn(&current.world) {
        Some(spawn) if !zone.contains(&spawn) => Some(spawn),
        _ => Some(step_outside(zone, &current)),
    }
}

/// Moves `pos` horizontally just past the closest side of `zone`.
fn step_outside(zone: &Zone, pos: &Position) -> Position {
    let min = zone.cuboid.min();
    let max = zone.cuboid.max();
    let exits = [
        (pos.x - f64::from(min.x), f64::from(min.x) - 0.5, pos.z),
        (f64::from(max.x) + 1.0 - pos.x, f64::from(max.x) + 1.5, pos.z),
        (pos.z - f64::from(min.z), pos.x, f64::from(min.z) - 0.5),
        (f64::from(max.z) + 1.0 - pos.z, pos.x, f64::from(max.z) + 1.5),
    ];
    let (_, x, z) = exits
        .into_iter()
        .fold((f64::INFINITY, pos.x, pos.z), |best, exit| {
            if exit.0 < best.0 { exit } else { best }
        });
    Position::new(pos.world.clone(), x, pos.y, z)
}
