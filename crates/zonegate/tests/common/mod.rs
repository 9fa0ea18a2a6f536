//! Shared fixture: an in-memory engine with one arena, one player and
//! one admin.

#![allow(dead_code)]

use zonegate::prelude::*;
use zonegate_access::SimHost;
use zonegate_types::permissions;

pub const WORLD: &str = "world";

pub fn outside() -> Position {
    Position::new(WORLD, 95.5, 64.0, 105.5)
}

pub fn inside() -> Position {
    Position::new(WORLD, 105.5, 64.0, 105.5)
}

pub const ADMIN_PERMISSIONS: &[&str] = &[
    permissions::ADMIN_TOOL,
    permissions::ADMIN_RELOAD,
    permissions::ADMIN_ZONES_CREATE,
    permissions::ADMIN_ZONES_LIST,
    permissions::ADMIN_ZONES_RENAME,
    permissions::ADMIN_ZONES_KICKTO,
    permissions::ADMIN_ZONES_DELETE,
    permissions::ADMIN_TOKEN_CREATE,
    permissions::ADMIN_TOKEN_LIST,
    permissions::ADMIN_TOKEN_ASSIGN,
    permissions::ADMIN_TOKEN_DURATION,
    permissions::ADMIN_TOKEN_ITEM,
    permissions::ADMIN_TOKEN_RENAME,
    permissions::ADMIN_TOKEN_LORE,
    permissions::ADMIN_TOKEN_GIVE,
    permissions::ADMIN_TOKEN_DELETE,
];

/// Sets up players on a host: Alex may enter zones and use any token,
/// Ada holds every admin capability and stands at the origin.
pub fn populate(host: &mut SimHost) -> (PlayerId, PlayerId) {
    let alex = PlayerId::new("alex");
    let ada = PlayerId::new("ada");
    host.join(&alex, "Alex", outside());
    host.grant(&alex, permissions::ENTER);
    host.grant(&alex, permissions::USE_ALL);
    host.join(&ada, "Ada", Position::new(WORLD, 0.5, 64.0, 0.5));
    for perm in ADMIN_PERMISSIONS {
        host.grant(&ada, perm);
    }
    (alex, ada)
}

pub struct Fixture {
    pub gate: ZoneGate<SimHost>,
    pub alex: PlayerId,
    pub ada: PlayerId,
    pub arena: ZoneId,
}

impl Fixture {
    /// Arena spans (100, 60, 100) to (110, 70, 110) in `world`.
    pub fn new() -> Self {
        Self::with_host(SimHost::new().with_world(WORLD))
    }

    pub fn with_host(mut host: SimHost) -> Self {
        let (alex, ada) = populate(&mut host);
        let mut gate = ZoneGate::in_memory(host, Settings::default());
        let arena = gate
            .create_zone(
                &Actor::Console,
                "Arena",
                BlockPos::new(100, 60, 100),
                BlockPos::new(110, 70, 110),
                WORLD,
            )
            .unwrap();
        Self {
            gate,
            alex,
            ada,
            arena,
        }
    }

    pub fn admin(&self) -> Actor {
        Actor::Player(self.ada.clone())
    }

    /// A token assigned to the arena.
    pub fn arena_token(&mut self, name: &str, duration: &str) -> TokenId {
        let token = self
            .gate
            .create_token(&Actor::Console, name, Some(duration))
            .unwrap();
        let arena = self.arena.clone();
        self.gate
            .assign_token(&Actor::Console, &token, &arena)
            .unwrap();
        token
    }

    /// Moves Alex to `to`, applying the position only if allowed.
    pub fn walk(&mut self, to: Position) -> MoveOutcome {
        let alex = self.alex.clone();
        let from = self.gate.host().player(&alex).unwrap().position.clone();
        let outcome = self.gate.on_move(&alex, &from, &to);
        if outcome.is_allowed() {
            self.gate.host_mut().set_position(&alex, to);
        }
        outcome
    }

    pub fn teleport(&mut self, to: Position) -> MoveOutcome {
        let alex = self.alex.clone();
        let from = self.gate.host().player(&alex).unwrap().position.clone();
        let outcome = self.gate.on_teleport(&alex, &from, &to);
        if outcome.is_allowed() {
            self.gate.host_mut().set_position(&alex, to);
        }
        outcome
    }

    pub fn remaining(&self, token: &TokenId) -> Option<u64> {
        self.gate.store().get(&self.alex, &self.arena, token)
    }

    pub fn chat(&self, player: &PlayerId) -> Vec<String> {
        self.gate.host().chat(player)
    }

    pub fn last_chat(&self, player: &PlayerId) -> String {
        self.chat(player).last().cloned().unwrap_or_default()
    }
}
