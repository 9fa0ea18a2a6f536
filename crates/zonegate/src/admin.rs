//! Admin operations.
//!
//! Every operation takes the [`Actor`] issuing it, checks one capability
//! from [`permissions`], runs, and answers the actor through the message
//! catalog: the success line on `Ok`, the matching error line on `Err`.
//! The console is always allowed and its replies go to the log.
//!
//! Zones and tokens both record their assignments, so every operation
//! that touches an assignment updates both sides. Deletes cascade: the
//! other side's sets, stored entitlements and presence markers are
//! purged with the entity.

use std::fmt::Display;

use zonegate_access::{Host, HostError, Notifier};
use zonegate_registry::{RegistryError, TokenTemplate, Zone};
use zonegate_types::{
    BlockPos, DEFAULT_TOKEN_DURATION_SECS, ItemSnapshot, KickDestination, ParseError, PlayerId,
    TokenId, ZoneId, colorize, format_duration, keys, parse_duration, permissions, strip_color,
};

use crate::{Settings, ZoneGate, ZoneGateError};

/// Who issued an admin operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Console,
    Player(PlayerId),
}

impl Actor {
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            Actor::Console => None,
            Actor::Player(id) => Some(id),
        }
    }
}

/// Where [`ZoneGate::set_kick_location`] points the zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickTarget {
    At(KickDestination),
    /// The block the acting player stands in.
    Here,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<T>,
}

/// Slices `items` into page `page` (1-based). Pages outside the range
/// fall back to the first page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = if page == 0 || page > total_pages { 1 } else { page };
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        page,
        total_pages,
        items,
    }
}

impl<H: Host> ZoneGate<H> {
    // -----------------------------------------------------------------------
    // Zones
    // -----------------------------------------------------------------------

    /// Creates a zone from two explicit corners.
    pub fn create_zone(
        &mut self,
        actor: &Actor,
        name: &str,
        corner1: BlockPos,
        corner2: BlockPos,
        world: &str,
    ) -> Result<ZoneId, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_CREATE, |gate| {
            if !gate.host.world_exists(world) {
                return Err(ZoneGateError::UnknownWorld(world.to_string()));
            }
            Ok(gate.finish_zone(actor, name, corner1, corner2, world))
        })
    }

    /// Creates a zone from the acting player's tool selection and clears
    /// the selection.
    pub fn create_zone_from_selection(
        &mut self,
        actor: &Actor,
        name: &str,
    ) -> Result<ZoneId, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_CREATE, |gate| {
            let player = actor.player().ok_or(ZoneGateError::PlayersOnly)?.clone();
            let selection = gate
                .store
                .selection(&player)
                .cloned()
                .ok_or(ZoneGateError::SelectionMissing)?;
            let second = selection.second.ok_or(ZoneGateError::SelectionIncomplete)?;
            let id = gate.finish_zone(actor, name, selection.first, second, &selection.world);
            gate.store.clear_selection(&player);
            Ok(id)
        })
    }

    fn finish_zone(
        &mut self,
        actor: &Actor,
        name: &str,
        corner1: BlockPos,
        corner2: BlockPos,
        world: &str,
    ) -> ZoneId {
        let id = self.zones.create(name, corner1, corner2, world).id.clone();
        self.reply(
            actor,
            keys::ZONE_CREATED,
            &[("zoneName", &name), ("id", &id.as_str())],
        );
        id
    }

    pub fn list_zones(&mut self, actor: &Actor, page: usize) -> Result<Page<Zone>, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_LIST, |gate| {
            let page = paginate(gate.zones.list(), page, gate.settings.items_per_page());
            if page.items.is_empty() {
                gate.reply(actor, keys::ZONE_LIST_EMPTY, &[]);
                return Ok(page);
            }
            gate.reply(
                actor,
                keys::ZONE_LIST_HEADER,
                &[("page", &page.page), ("total", &page.total_pages)],
            );
            for zone in &page.items {
                gate.reply(
                    actor,
                    keys::ZONE_LIST_ITEM,
                    &[("id", &zone.id.as_str()), ("zoneName", &zone.name)],
                );
            }
            Ok(page)
        })
    }

    pub fn rename_zone(
        &mut self,
        actor: &Actor,
        zone: &ZoneId,
        name: &str,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_RENAME, |gate| {
            gate.zones.rename(zone, name)?;
            gate.reply(actor, keys::ZONE_RENAMED, &[("zoneName", &name)]);
            Ok(())
        })
    }

    pub fn set_kick_location(
        &mut self,
        actor: &Actor,
        zone: &ZoneId,
        target: KickTarget,
    ) -> Result<KickDestination, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_KICKTO, |gate| {
            let kick = match target {
                KickTarget::At(kick) => {
                    if !gate.host.world_exists(&kick.world) {
                        return Err(ZoneGateError::UnknownWorld(kick.world));
                    }
                    kick
                }
                KickTarget::Here => {
                    let player = actor.player().ok_or(ZoneGateError::PlayersOnly)?;
                    let pos = gate
                        .host
                        .position(player)
                        .ok_or_else(|| ZoneGateError::PlayerNotFound(player.as_str().to_string()))?;
                    let block = pos.block();
                    KickDestination {
                        world: pos.world,
                        x: block.x,
                        y: block.y,
                        z: block.z,
                    }
                }
            };
            gate.zones.set_kick_location(zone, kick.clone())?;
            gate.reply(
                actor,
                keys::ZONE_KICK_LOCATION_SET,
                &[("x", &kick.x), ("y", &kick.y), ("z", &kick.z)],
            );
            Ok(kick)
        })
    }

    /// Deletes a zone, unassigns it from every token and purges its
    /// entitlements and presence markers.
    pub fn delete_zone(&mut self, actor: &Actor, zone: &ZoneId) -> Result<Zone, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_ZONES_DELETE, |gate| {
            let deleted = gate.zones.delete(zone)?;
            let tokens = gate.tokens.unassign_zone_everywhere(zone);
            let entitlements = gate.store.remove_zone(zone);
            let markers = gate.presence.clear_zone(zone);
            tracing::info!(
                zone_id = %zone,
                tokens = tokens.len(),
                entitlements,
                markers,
                "zone delete cascaded"
            );
            gate.reply(actor, keys::ZONE_DELETED, &[("zoneName", &deleted.name)]);
            Ok(deleted)
        })
    }

    // -----------------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------------

    /// Creates a token. `duration` uses the `90`/`30s`/`5m`/`2h`/`1d`
    /// forms; `None` means 60 seconds.
    pub fn create_token(
        &mut self,
        actor: &Actor,
        name: &str,
        duration: Option<&str>,
    ) -> Result<TokenId, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_CREATE, |gate| {
            let secs = match duration {
                Some(text) => parse_duration(text)?,
                None => DEFAULT_TOKEN_DURATION_SECS,
            };
            let id = gate.tokens.create(name, secs).id.clone();
            gate.reply(
                actor,
                keys::TOKEN_CREATED,
                &[
                    ("tokenName", &name),
                    ("id", &id.as_str()),
                    ("duration", &format_duration(secs)),
                ],
            );
            Ok(id)
        })
    }

    pub fn list_tokens(
        &mut self,
        actor: &Actor,
        page: usize,
    ) -> Result<Page<TokenTemplate>, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_LIST, |gate| {
            let page = paginate(gate.tokens.list(), page, gate.settings.items_per_page());
            if page.items.is_empty() {
                gate.reply(actor, keys::TOKEN_LIST_EMPTY, &[]);
                return Ok(page);
            }
            gate.reply(
                actor,
                keys::TOKEN_LIST_HEADER,
                &[("page", &page.page), ("total", &page.total_pages)],
            );
            for token in &page.items {
                let zone_name = gate.primary_zone_name(token);
                gate.reply(
                    actor,
                    keys::TOKEN_LIST_ITEM,
                    &[
                        ("id", &token.id.as_str()),
                        ("tokenName", &token.name),
                        ("zoneName", &zone_name),
                    ],
                );
            }
            Ok(page)
        })
    }

    /// Assigns `token` to `zone` on both sides. Idempotent.
    pub fn assign_token(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        zone: &ZoneId,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_ASSIGN, |gate| {
            let (token_name, zone_name) = gate.names(token, zone)?;
            gate.zones.assign_token(zone, token)?;
            gate.tokens.assign_to_zone(token, zone)?;
            gate.reply(
                actor,
                keys::TOKEN_ASSIGNED,
                &[("tokenName", &token_name), ("zoneName", &zone_name)],
            );
            Ok(())
        })
    }

    /// Removes the assignment from both sides.
    ///
    /// # Errors
    /// [`ZoneGateError::NotAssigned`] if neither side records it.
    pub fn unassign_token(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        zone: &ZoneId,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_ASSIGN, |gate| {
            let (token_name, zone_name) = gate.names(token, zone)?;
            let on_zone = gate.zones.unassign_token(zone, token)?;
            let on_token = gate.tokens.unassign_from_zone(token, zone)?;
            if !on_zone && !on_token {
                return Err(ZoneGateError::NotAssigned {
                    token: token.clone(),
                    zone: zone.clone(),
                });
            }
            gate.reply(
                actor,
                keys::TOKEN_UNASSIGNED,
                &[("tokenName", &token_name), ("zoneName", &zone_name)],
            );
            Ok(())
        })
    }

    /// Changes the duration new entitlements get. Running ones keep
    /// their remainder.
    pub fn set_token_duration(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        duration: &str,
    ) -> Result<u64, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_DURATION, |gate| {
            let secs = parse_duration(duration)?;
            let name = gate.tokens.set_duration(token, secs)?.name.clone();
            gate.reply(
                actor,
                keys::TOKEN_DURATION_CHANGED,
                &[("tokenName", &name), ("duration", &format_duration(secs))],
            );
            Ok(secs)
        })
    }

    /// Sets the token's item look. Without a material the acting
    /// player's held item decides it.
    pub fn set_token_item(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        material: Option<&str>,
        glowing: bool,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_ITEM, |gate| {
            let material = match material {
                Some(m) => m.to_uppercase(),
                None => {
                    let player = actor.player().ok_or(ZoneGateError::PlayersOnly)?;
                    gate.host
                        .held_item(player)
                        .ok_or(ZoneGateError::NoItemInHand)?
                        .material
                }
            };
            let name = gate
                .tokens
                .set_item_appearance(token, material.clone(), glowing)?
                .name
                .clone();
            let glow = if glowing { "Yes" } else { "No" };
            gate.reply(
                actor,
                keys::TOKEN_ITEM_CONFIGURED,
                &[
                    ("tokenName", &name),
                    ("itemMaterial", &material),
                    ("glowing", &glow),
                ],
            );
            Ok(())
        })
    }

    pub fn rename_token(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        name: &str,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_RENAME, |gate| {
            gate.tokens.rename(token, name)?;
            gate.reply(actor, keys::TOKEN_RENAMED, &[("tokenName", &name)]);
            Ok(())
        })
    }

    // ---- lore (1-based line numbers) ----

    pub fn lore_add(&mut self, actor: &Actor, token: &TokenId, line: &str) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_LORE, |gate| {
            let name = gate.tokens.add_lore_line(token, line)?.name.clone();
            gate.reply(actor, keys::TOKEN_LORE_ADDED, &[("tokenName", &name)]);
            Ok(())
        })
    }

    pub fn lore_set(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        line_number: usize,
        line: &str,
    ) -> Result<(), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_LORE, |gate| {
            let index = lore_index(line_number)?;
            let name = gate
                .tokens
                .set_lore_line(token, index, line)
                .map_err(|e| lore_error(e, line_number))?
                .name
                .clone();
            gate.reply(
                actor,
                keys::TOKEN_LORE_SET,
                &[("tokenName", &name), ("lineNumber", &line_number)],
            );
            Ok(())
        })
    }

    /// Removes and returns lore line `line_number`.
    pub fn lore_remove(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        line_number: usize,
    ) -> Result<String, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_LORE, |gate| {
            let index = lore_index(line_number)?;
            let removed = gate
                .tokens
                .remove_lore_line(token, index)
                .map_err(|e| lore_error(e, line_number))?;
            let name = gate.token(token)?.name.clone();
            gate.reply(
                actor,
                keys::TOKEN_LORE_REMOVED,
                &[("tokenName", &name), ("lineNumber", &line_number)],
            );
            Ok(removed)
        })
    }

    // ---- give / delete ----

    /// Gives the named online player a fresh item for `token` and seeds
    /// a full entitlement in every zone the token opens.
    ///
    /// # Errors
    /// [`ZoneGateError::NoZoneAssigned`] for a token that opens nothing,
    /// [`ZoneGateError::PlayerNotFound`] if nobody online has that name,
    /// [`ZoneGateError::InventoryFull`] if the item does not fit. Nothing
    /// is seeded in any of these cases.
    pub fn give_token(
        &mut self,
        actor: &Actor,
        token: &TokenId,
        player_name: &str,
    ) -> Result<PlayerId, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_GIVE, |gate| {
            let template = gate.token(token)?.clone();
            if template.assigned_zones().is_empty() {
                return Err(ZoneGateError::NoZoneAssigned(token.clone()));
            }
            let target = gate
                .host
                .find_player(player_name)
                .ok_or_else(|| ZoneGateError::PlayerNotFound(player_name.to_string()))?;
            let target_name = gate
                .host
                .player_name(&target)
                .unwrap_or_else(|| player_name.to_string());

            let item = gate.mint_token_item(&template);
            match gate.host.give_item(&target, item) {
                Ok(slot) => {
                    tracing::debug!(player_id = %target, token_id = %token, slot, "token item given");
                }
                Err(HostError::InventoryFull(_)) => {
                    gate.notify(&target, keys::TOKEN_INVENTORY_FULL_SELF, &[]);
                    return Err(ZoneGateError::InventoryFull(target_name));
                }
                Err(HostError::PlayerOffline(_)) => {
                    return Err(ZoneGateError::PlayerNotFound(player_name.to_string()));
                }
            }

            for zone in template.assigned_zones() {
                if gate.zones.get(zone).is_some() {
                    gate.store.set(&target, zone, token, template.duration_secs);
                }
            }
            tracing::info!(
                player_id = %target,
                token_id = %token,
                zones = template.assigned_zones().len(),
                "token given"
            );

            let duration = format_duration(template.duration_secs);
            gate.reply(
                actor,
                keys::TOKEN_GIVEN,
                &[
                    ("tokenName", &template.name),
                    ("playerName", &target_name),
                    ("duration", &duration),
                ],
            );
            gate.notify(
                &target,
                keys::TOKEN_RECEIVED,
                &[("tokenName", &template.name), ("duration", &duration)],
            );
            Ok(target)
        })
    }

    /// Deletes a token, unassigns it from every zone and purges its
    /// entitlements.
    pub fn delete_token(
        &mut self,
        actor: &Actor,
        token: &TokenId,
    ) -> Result<TokenTemplate, ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_TOKEN_DELETE, |gate| {
            let deleted = gate.tokens.delete(token)?;
            let zones = gate.zones.unassign_token_everywhere(token);
            let entitlements = gate.store.remove_token(token);
            tracing::info!(
                token_id = %token,
                zones = zones.len(),
                entitlements,
                "token delete cascaded"
            );
            gate.reply(actor, keys::TOKEN_DELETED, &[("tokenName", &deleted.name)]);
            Ok(deleted)
        })
    }

    /// The item a player receives for `token`: tagged with the token id,
    /// named after the token, lore followed by zone, duration and the
    /// countdown line.
    pub fn mint_token_item(&self, token: &TokenTemplate) -> ItemSnapshot {
        let zone_name = self.primary_zone_name(token);
        let mut lore: Vec<String> = token.lore().iter().map(|l| colorize(l)).collect();
        lore.push(colorize(&format!("&7Zone: &f{zone_name}")));
        lore.push(colorize(&format!(
            "&7Duration: &f{}",
            format_duration(token.duration_secs)
        )));

        let item = ItemSnapshot::new(0, token.material.clone())
            .with_name(colorize(&format!("&e{}", token.name)))
            .with_lore(lore)
            .with_glow(token.glowing)
            .with_tag(token.id.clone());
        let lore = item.lore_with_time_left(token.duration_secs);
        item.with_lore(lore)
    }

    // -----------------------------------------------------------------------
    // Reload
    // -----------------------------------------------------------------------

    /// Re-reads zones and tokens (and the settings file, if the engine
    /// was opened with one). Selections and presence markers are
    /// cleared; entitlements are kept.
    pub fn reload(&mut self, actor: &Actor) -> Result<(usize, usize), ZoneGateError> {
        self.guarded(actor, permissions::ADMIN_RELOAD, |gate| {
            if let Some(path) = gate.config_path.clone() {
                let settings = Settings::load(&path)?;
                gate.apply_settings(settings);
            }
            let zones = gate.zones.reload()?;
            let tokens = gate.tokens.reload()?;
            gate.store.clear_selections();
            gate.presence.clear_all();
            tracing::info!(zones, tokens, "reloaded");
            gate.reply(actor, keys::PLUGIN_RELOADED, &[]);
            Ok((zones, tokens))
        })
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    /// Checks `permission`, runs `op` and answers the actor on failure.
    fn guarded<T>(
        &mut self,
        actor: &Actor,
        permission: &str,
        op: impl FnOnce(&mut Self) -> Result<T, ZoneGateError>,
    ) -> Result<T, ZoneGateError> {
        if let Actor::Player(player) = actor {
            if !self.host.has_permission(player, permission) {
                tracing::debug!(player_id = %player, permission, "admin operation denied");
                self.reply(actor, keys::ERROR_NO_PERMISSION, &[]);
                return Err(ZoneGateError::PermissionDenied(permission.to_string()));
            }
        }
        let result = op(self);
        if let Err(e) = &result {
            tracing::debug!(permission, error = %e, "admin operation failed");
            let (key, owned) = error_reply(e);
            let args: Vec<(&str, &dyn Display)> = owned
                .iter()
                .map(|(name, value)| (*name, value as &dyn Display))
                .collect();
            self.reply(actor, key, &args);
        }
        result
    }

    /// Sends `key` to the actor: chat for a player, the log for the
    /// console.
    pub(crate) fn reply(&mut self, actor: &Actor, key: &str, args: &[(&str, &dyn Display)]) {
        match actor {
            Actor::Console => {
                let line = self.messages.render(key, args);
                tracing::info!(target: "zonegate::console", "{}", strip_color(&line));
            }
            Actor::Player(player) => self.notify(player, key, args),
        }
    }

    pub(crate) fn notify(&mut self, player: &PlayerId, key: &str, args: &[(&str, &dyn Display)]) {
        Notifier::new(&self.messages, self.text.as_deref()).chat(&mut self.host, player, key, args);
    }

    fn token(&self, id: &TokenId) -> Result<&TokenTemplate, ZoneGateError> {
        self.tokens
            .get(id)
            .ok_or_else(|| RegistryError::TokenNotFound(id.clone()).into())
    }

    /// Display names of both ends of an assignment, checking both exist
    /// before anything changes.
    fn names(&self, token: &TokenId, zone: &ZoneId) -> Result<(String, String), ZoneGateError> {
        let zone_name = self
            .zones
            .get(zone)
            .ok_or_else(|| RegistryError::ZoneNotFound(zone.clone()))?
            .name
            .clone();
        Ok((self.token(token)?.name.clone(), zone_name))
    }

    pub(crate) fn primary_zone_name(&self, token: &TokenTemplate) -> String {
        token
            .primary_zone()
            .and_then(|z| self.zones.get(z))
            .map_or_else(|| "None".to_string(), |z| z.name.clone())
    }
}

fn lore_index(line_number: usize) -> Result<usize, ZoneGateError> {
    line_number
        .checked_sub(1)
        .ok_or(ZoneGateError::InvalidLoreLine(line_number))
}

fn lore_error(err: RegistryError, line_number: usize) -> ZoneGateError {
    match err {
        RegistryError::LoreLineOutOfRange { .. } => ZoneGateError::InvalidLoreLine(line_number),
        other => other.into(),
    }
}

/// The message key and arguments answering a failed operation.
fn error_reply(err: &ZoneGateError) -> (&'static str, Vec<(&'static str, String)>) {
    match err {
        ZoneGateError::Registry(RegistryError::ZoneNotFound(id)) => {
            (keys::ZONE_ERROR_NOT_FOUND, vec![("zoneId", id.as_str().to_string())])
        }
        ZoneGateError::Registry(RegistryError::TokenNotFound(id)) => {
            (keys::TOKEN_ERROR_NOT_FOUND, vec![("tokenId", id.as_str().to_string())])
        }
        ZoneGateError::Registry(RegistryError::KickInsideZone(_)) => {
            (keys::ZONE_ERROR_KICK_INSIDE_ZONE, Vec::new())
        }
        ZoneGateError::Parse(ParseError::InvalidDuration(_)) => {
            (keys::TOKEN_ERROR_INVALID_DURATION, Vec::new())
        }
        ZoneGateError::InvalidLoreLine(n) => {
            (keys::TOKEN_ERROR_INVALID_LORE_LINE, vec![("lineNumber", n.to_string())])
        }
        ZoneGateError::PlayerNotFound(name) => {
            (keys::ERROR_PLAYER_NOT_FOUND, vec![("playerName", name.clone())])
        }
        ZoneGateError::SelectionMissing | ZoneGateError::SelectionIncomplete => {
            (keys::ZONE_ERROR_NOT_SELECTED, Vec::new())
        }
        ZoneGateError::SelectionWorldMismatch => (keys::TOOL_ERROR_DIFFERENT_WORLD, Vec::new()),
        ZoneGateError::NoZoneAssigned(_) => (keys::TOKEN_ERROR_NO_ZONE_ASSIGNED, Vec::new()),
        ZoneGateError::NotAssigned { .. } => (keys::TOKEN_ERROR_NOT_ASSIGNED, Vec::new()),
        ZoneGateError::NoItemInHand => (keys::TOKEN_ERROR_NO_ITEM_IN_HAND, Vec::new()),
        ZoneGateError::InventoryFull(name) => {
            (keys::TOKEN_INVENTORY_FULL, vec![("playerName", name.clone())])
        }
        ZoneGateError::PermissionDenied(_) => (keys::ERROR_NO_PERMISSION, Vec::new()),
        ZoneGateError::Store(_)
        | ZoneGateError::Registry(_)
        | ZoneGateError::Config { .. }
        | ZoneGateError::Io { .. } => (keys::PLUGIN_RELOAD_ERROR, vec![("error", err.to_string())]),
        ZoneGateError::Parse(_)
        | ZoneGateError::Host(_)
        | ZoneGateError::PlayersOnly
        | ZoneGateError::UnknownWorld(_) => {
            (keys::ERROR_INVALID_USAGE, vec![("usage", err.to_string())])
        }
    }
}
