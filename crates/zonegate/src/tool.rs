//! The zone selection tool.
//!
//! Admins mark two corners by clicking blocks while holding the tool.
//! The selection lives in the entitlement store until a zone is created
//! from it, the admin switches to another item, or a reload.

use zonegate_access::{Host, HostError};
use zonegate_store::ZoneSelection;
use zonegate_types::{BlockPos, ItemSnapshot, PlayerId, colorize, keys, permissions};

use crate::{Actor, ZoneGate, ZoneGateError};

pub const ZONE_TOOL_MATERIAL: &str = "SHEARS";
pub const ZONE_TOOL_NAME: &str = "&bZone Tool";

/// Which corner a click marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolClick {
    /// First corner. Starts a new selection.
    Left,
    /// Second corner.
    Right,
}

/// A fresh zone tool.
pub fn zone_tool_item() -> ItemSnapshot {
    ItemSnapshot::new(0, ZONE_TOOL_MATERIAL)
        .with_name(colorize(ZONE_TOOL_NAME))
        .with_lore(vec![
            colorize("&7Left-click: first corner"),
            colorize("&7Right-click: second corner"),
        ])
}

pub fn is_zone_tool(item: &ItemSnapshot) -> bool {
    item.material == ZONE_TOOL_MATERIAL
        && item.token_tag.is_none()
        && item.display_name.as_deref() == Some(colorize(ZONE_TOOL_NAME).as_str())
}

impl<H: Host> ZoneGate<H> {
    /// Puts a zone tool in the acting player's inventory.
    pub fn give_tool(&mut self, actor: &Actor) -> Result<usize, ZoneGateError> {
        let Some(player) = actor.player().cloned() else {
            return Err(ZoneGateError::PlayersOnly);
        };
        if !self.host.has_permission(&player, permissions::ADMIN_TOOL) {
            self.notify(&player, keys::TOOL_ERROR_NOT_ENOUGH_PERMS, &[]);
            return Err(ZoneGateError::PermissionDenied(permissions::ADMIN_TOOL.to_string()));
        }
        match self.host.give_item(&player, zone_tool_item()) {
            Ok(slot) => {
                self.notify(&player, keys::TOOL_GIVEN, &[]);
                Ok(slot)
            }
            Err(HostError::InventoryFull(_)) => {
                self.notify(&player, keys::TOKEN_INVENTORY_FULL_SELF, &[]);
                Err(ZoneGateError::InventoryFull(player.as_str().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// A block click by `player`.
    ///
    /// Returns `Ok(false)` when the player is not holding the tool (the
    /// host should let the click through) and `Ok(true)` when the click
    /// marked a corner and should be cancelled.
    pub fn on_tool_click(
        &mut self,
        player: &PlayerId,
        click: ToolClick,
        block: BlockPos,
    ) -> Result<bool, ZoneGateError> {
        if !self.host.held_item(player).is_some_and(|item| is_zone_tool(&item)) {
            return Ok(false);
        }
        if !self.host.has_permission(player, permissions::ADMIN_TOOL) {
            self.notify(player, keys::TOOL_ERROR_NOT_ENOUGH_PERMS, &[]);
            return Err(ZoneGateError::PermissionDenied(permissions::ADMIN_TOOL.to_string()));
        }
        let world = self
            .host
            .position(player)
            .ok_or_else(|| ZoneGateError::PlayerNotFound(player.as_str().to_string()))?
            .world;
        let coords: [(&str, &dyn std::fmt::Display); 3] =
            [("x", &block.x), ("y", &block.y), ("z", &block.z)];

        match click {
            ToolClick::Left => {
                self.store
                    .set_selection(player, ZoneSelection::new(world, block));
                tracing::debug!(player_id = %player, %block, "first corner marked");
                self.notify(player, keys::TOOL_POSITION1, &coords);
            }
            ToolClick::Right => {
                let Some(mut selection) = self.store.selection(player).cloned() else {
                    self.notify(player, keys::TOOL_ERROR_NOT_SELECTED, &[]);
                    return Err(ZoneGateError::SelectionMissing);
                };
                if selection.world != world {
                    self.notify(player, keys::TOOL_ERROR_DIFFERENT_WORLD, &[]);
                    return Err(ZoneGateError::SelectionWorldMismatch);
                }
                selection.second = Some(block);
                self.store.set_selection(player, selection);
                tracing::debug!(player_id = %player, %block, "second corner marked");
                self.notify(player, keys::TOOL_POSITION2, &coords);
                self.notify(player, keys::TOOL_ZONE_SELECTED, &[]);
            }
        }
        Ok(true)
    }

    /// The player switched held items. Switching away from the tool
    /// drops the selection. Returns `true` if one was dropped.
    pub fn on_held_item_change(
        &mut self,
        player: &PlayerId,
        previous: Option<&ItemSnapshot>,
        current: Option<&ItemSnapshot>,
    ) -> bool {
        let was_tool = previous.is_some_and(is_zone_tool);
        let is_tool = current.is_some_and(is_zone_tool);
        if was_tool && !is_tool && self.store.clear_selection(player) {
            tracing::debug!(player_id = %player, "selection dropped");
            return true;
        }
        false
    }
}
