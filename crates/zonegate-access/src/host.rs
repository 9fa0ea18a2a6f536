//! The host boundary.
//!
//! ZoneGate never touches a world, an inventory or a chat channel
//! directly. Everything it needs from the game server goes through
//! [`Host`], and everything it shows a player can be post-processed by
//! an optional [`TextProvider`].

use zonegate_types::{ItemSnapshot, PlayerId, Position};

use crate::HostError;

/// Capabilities the embedding game server provides.
///
/// Query methods take `&self`; anything that changes the world takes
/// `&mut self`. Calls are made from the engine's single logical thread,
/// so implementations need no internal locking of their own.
pub trait Host {
    /// Players currently connected, in a stable order.
    fn online_players(&self) -> Vec<PlayerId>;

    /// Resolves a player by name (case-insensitive), online only.
    fn find_player(&self, name: &str) -> Option<PlayerId>;

    fn player_name(&self, player: &PlayerId) -> Option<String>;

    fn position(&self, player: &PlayerId) -> Option<Position>;

    /// Every occupied slot of the player's inventory.
    fn inventory(&self, player: &PlayerId) -> Vec<ItemSnapshot>;

    /// The item in the player's main hand, if any.
    fn held_item(&self, player: &PlayerId) -> Option<ItemSnapshot>;

    /// Removes the item in `slot`. Returns `false` if the slot was empty.
    fn remove_item(&mut self, player: &PlayerId, slot: usize) -> bool;

    /// Replaces the lore of the item in `slot`.
    fn set_item_lore(&mut self, player: &PlayerId, slot: usize, lore: Vec<String>) -> bool;

    /// Puts `item` in a free slot and returns that slot.
    ///
    /// # Errors
    /// [`HostError::InventoryFull`] or [`HostError::PlayerOffline`].
    fn give_item(&mut self, player: &PlayerId, item: ItemSnapshot) -> Result<usize, HostError>;

    fn teleport(&mut self, player: &PlayerId, to: &Position) -> bool;

    fn world_exists(&self, world: &str) -> bool;

    fn world_spawn(&self, world: &str) -> Option<Position>;

    fn has_permission(&self, player: &PlayerId, permission: &str) -> bool;

    fn send_message(&mut self, player: &PlayerId, text: &str);

    fn send_action_bar(&mut self, player: &PlayerId, text: &str);
}

/// Host-side placeholder expansion applied to outgoing text.
pub trait TextProvider: Send + Sync {
    fn apply(&self, player: &PlayerId, text: &str) -> String;
}
