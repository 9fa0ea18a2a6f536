//! An in-memory [`Host`].
//!
//! `SimHost` keeps players, inventories, permissions and every message
//! sent in plain maps. It exists for tests and offline tooling; a real
//! server adapter implements [`Host`] over its own world.

use std::collections::{BTreeMap, HashMap, HashSet};

use zonegate_types::{ItemSnapshot, PlayerId, Position, strip_color};

use crate::{Host, HostError};

/// Slots a simulated inventory has unless configured otherwise.
pub const DEFAULT_INVENTORY_SIZE: usize = 36;

/// One simulated player.
#[derive(Debug, Clone)]
pub struct SimPlayer {
    pub name: String,
    pub online: bool,
    pub position: Position,
    pub inventory: BTreeMap<usize, ItemSnapshot>,
    pub held_slot: usize,
    pub permissions: HashSet<String>,
    /// Chat lines in delivery order, colour codes intact.
    pub chat: Vec<String>,
    pub action_bar: Vec<String>,
    /// Every teleport destination, in order.
    pub teleports: Vec<Position>,
}

/// In-memory game server.
#[derive(Debug, Clone)]
pub struct SimHost {
    players: BTreeMap<PlayerId, SimPlayer>,
    spawns: HashMap<String, Position>,
    inventory_size: usize,
}

impl Default for SimHost {
    fn default() -> Self {
        Self {
            players: BTreeMap::new(),
            spawns: HashMap::new(),
            inventory_size: DEFAULT_INVENTORY_SIZE,
        }
    }
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a world with its spawn at (0.5, 64, 0.5).
    pub fn with_world(mut self, world: &str) -> Self {
        self.spawns
            .insert(world.to_string(), Position::new(world, 0.5, 64.0, 0.5));
        self
    }

    pub fn with_inventory_size(mut self, slots: usize) -> Self {
        self.inventory_size = slots;
        self
    }

    pub fn set_spawn(&mut self, spawn: Position) {
        self.spawns.insert(spawn.world.clone(), spawn);
    }

    /// Connects a player at `position`.
    pub fn join(&mut self, id: &PlayerId, name: &str, position: Position) -> &mut SimPlayer {
        let player = self.players.entry(id.clone()).or_insert_with(|| SimPlayer {
            name: name.to_string(),
            online: true,
            position: position.clone(),
            inventory: BTreeMap::new(),
            held_slot: 0,
            permissions: HashSet::new(),
            chat: Vec::new(),
            action_bar: Vec::new(),
            teleports: Vec::new(),
        });
        player.online = true;
        player.position = position;
        player
    }

    /// Disconnects a player, keeping their state for a later join.
    pub fn quit(&mut self, id: &PlayerId) {
        if let Some(p) = self.players.get_mut(id) {
            p.online = false;
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&SimPlayer> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut SimPlayer> {
        self.players.get_mut(id)
    }

    pub fn grant(&mut self, id: &PlayerId, permission: &str) {
        if let Some(p) = self.players.get_mut(id) {
            p.permissions.insert(permission.to_string());
        }
    }

    pub fn revoke(&mut self, id: &PlayerId, permission: &str) {
        if let Some(p) = self.players.get_mut(id) {
            p.permissions.remove(permission);
        }
    }

    /// Puts `item` in its own `slot`, replacing whatever was there.
    pub fn put_item(&mut self, id: &PlayerId, item: ItemSnapshot) {
        if let Some(p) = self.players.get_mut(id) {
            p.inventory.insert(item.slot, item);
        }
    }

    /// Removes and returns the item in `slot`, as a player dropping it.
    pub fn take_item(&mut self, id: &PlayerId, slot: usize) -> Option<ItemSnapshot> {
        self.players.get_mut(id)?.inventory.remove(&slot)
    }

    pub fn item(&self, id: &PlayerId, slot: usize) -> Option<&ItemSnapshot> {
        self.players.get(id)?.inventory.get(&slot)
    }

    pub fn set_position(&mut self, id: &PlayerId, position: Position) {
        if let Some(p) = self.players.get_mut(id) {
            p.position = position;
        }
    }

    pub fn set_held_slot(&mut self, id: &PlayerId, slot: usize) {
        if let Some(p) = self.players.get_mut(id) {
            p.held_slot = slot;
        }
    }

    /// Chat lines sent to `id`, colour codes stripped.
    pub fn chat(&self, id: &PlayerId) -> Vec<String> {
        self.players
            .get(id)
            .map(|p| p.chat.iter().map(|l| strip_color(l)).collect())
            .unwrap_or_default()
    }

    /// Action-bar lines sent to `id`, colour codes stripped.
    pub fn action_bar(&self, id: &PlayerId) -> Vec<String> {
        self.players
            .get(id)
            .map(|p| p.action_bar.iter().map(|l| strip_color(l)).collect())
            .unwrap_or_default()
    }

    pub fn clear_messages(&mut self, id: &PlayerId) {
        if let Some(p) = self.players.get_mut(id) {
            p.chat.clear();
            p.action_bar.clear();
        }
    }

    fn online(&self, id: &PlayerId) -> Option<&SimPlayer> {
        self.players.get(id).filter(|p| p.online)
    }

    fn online_mut(&mut self, id: &PlayerId) -> Option<&mut SimPlayer> {
        self.players.get_mut(id).filter(|p| p.online)
    }
}

impl Host for SimHost {
    fn online_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.online)
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn find_player(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.online && p.name.eq_ignore_ascii_case(name))
            .map(|(id, _)| id.clone())
    }

    fn player_name(&self, player: &PlayerId) -> Option<String> {
        self.players.get(player).map(|p| p.name.clone())
    }

    fn position(&self, player: &PlayerId) -> Option<Position> {
        self.online(player).map(|p| p.position.clone())
    }

    fn inventory(&self, player: &PlayerId) -> Vec<ItemSnapshot> {
        self.online(player)
            .map(|p| p.inventory.values().cloned().collect())
            .unwrap_or_default()
    }

    fn held_item(&self, player: &PlayerId) -> Option<ItemSnapshot> {
        let p = self.online(player)?;
        p.inventory.get(&p.held_slot).cloned()
    }

    fn remove_item(&mut self, player: &PlayerId, slot: usize) -> bool {
        self.online_mut(player)
            .is_some_and(|p| p.inventory.remove(&slot).is_some())
    }

    fn set_item_lore(&mut self, player: &PlayerId, slot: usize, lore: Vec<String>) -> bool {
        match self
            .online_mut(player)
            .and_then(|p| p.inventory.get_mut(&slot))
        {
            Some(item) => {
                item.lore = lore;
                true
            }
            None => false,
        }
    }

    fn give_item(&mut self, player: &PlayerId, mut item: ItemSnapshot) -> Result<usize, HostError> {
        let size = self.inventory_size;
        let p = self
            .online_mut(player)
            .ok_or_else(|| HostError::PlayerOffline(player.clone()))?;
        let slot = (0..size)
            .find(|s| !p.inventory.contains_key(s))
            .ok_or_else(|| HostError::InventoryFull(player.clone()))?;
        item.slot = slot;
        p.inventory.insert(slot, item);
        Ok(slot)
    }

    fn teleport(&mut self, player: &PlayerId, to: &Position) -> bool {
        match self.online_mut(player) {
            Some(p) => {
                p.position = to.clone();
                p.teleports.push(to.clone());
                true
            }
            None => false,
        }
    }

    fn world_exists(&self, world: &str) -> bool {
        self.spawns.contains_key(world)
    }

    fn world_spawn(&self, world: &str) -> Option<Position> {
        self.spawns.get(world).cloned()
    }

    fn has_permission(&self, player: &PlayerId, permission: &str) -> bool {
        self.online(player)
            .is_some_and(|p| p.permissions.contains(permission))
    }

    fn send_message(&mut self, player: &PlayerId, text: &str) {
        if let Some(p) = self.players.get_mut(player) {
            p.chat.push(text.to_string());
        }
    }

    fn send_action_bar(&mut self, player: &PlayerId, text: &str) {
        if let Some(p) = self.players.get_mut(player) {
            p.action_bar.push(text.to_string());
        }
    }
}
