//! Shared fixture: one world, one arena, one player.

#![allow(dead_code)]

use zonegate_access::{
    AccessConfig, AccessEvaluator, DecayPass, DecayReport, Motion, MoveOutcome, Notifier,
    Presence, SimHost,
};
use zonegate_registry::{TokenCatalog, ZoneRegistry};
use zonegate_store::EntitlementStore;
use zonegate_types::{BlockPos, ItemSnapshot, PlayerId, Position, TokenId, ZoneId, permissions};

pub const WORLD: &str = "world";

pub fn outside() -> Position {
    Position::new(WORLD, 95.5, 64.0, 105.5)
}

pub fn inside() -> Position {
    Position::new(WORLD, 105.5, 64.0, 105.5)
}

pub struct Fixture {
    pub zones: ZoneRegistry,
    pub tokens: TokenCatalog,
    pub store: EntitlementStore,
    pub presence: Presence,
    pub config: AccessConfig,
    pub messages: zonegate_types::MessageCatalog,
    pub host: SimHost,
    pub alex: PlayerId,
    pub arena: ZoneId,
}

impl Fixture {
    /// Alex stands outside the arena with enter and use-all capability.
    pub fn new() -> Self {
        Self::with_store(EntitlementStore::in_memory())
    }

    pub fn with_store(store: EntitlementStore) -> Self {
        let mut zones = ZoneRegistry::in_memory();
        let arena = zones
            .create("Arena", BlockPos::new(100, 60, 100), BlockPos::new(110, 70, 110), WORLD)
            .id
            .clone();

        let mut host = SimHost::new().with_world(WORLD);
        let alex = PlayerId::new("alex");
        host.join(&alex, "Alex", outside());
        host.grant(&alex, permissions::ENTER);
        host.grant(&alex, permissions::USE_ALL);

        Self {
            zones,
            tokens: TokenCatalog::in_memory(),
            store,
            presence: Presence::new(),
            config: AccessConfig::default(),
            messages: zonegate_types::MessageCatalog::default(),
            host,
            alex,
            arena,
        }
    }

    /// Creates a token assigned to `zone` on both sides.
    pub fn token(&mut self, name: &str, duration: u64, zone: &ZoneId) -> TokenId {
        let id = self.tokens.create(name, duration).id.clone();
        self.tokens.assign_to_zone(&id, zone).unwrap();
        self.zones.assign_token(zone, &id).unwrap();
        id
    }

    /// Puts a tagged item for `token` in `slot`.
    pub fn hold(&mut self, token: &TokenId, slot: usize) {
        let alex = self.alex.clone();
        self.host.put_item(
            &alex,
            ItemSnapshot::new(slot, "PAPER")
                .with_name(format!("Token {token}"))
                .with_tag(token.clone()),
        );
    }

    pub fn walk(&mut self, from: Position, to: Position) -> MoveOutcome {
        self.motion(from, to, Motion::Walk)
    }

    pub fn teleport(&mut self, from: Position, to: Position) -> MoveOutcome {
        self.motion(from, to, Motion::Teleport)
    }

    fn motion(&mut self, from: Position, to: Position, motion: Motion) -> MoveOutcome {
        let alex = self.alex.clone();
        let notifier = Notifier::new(&self.messages, None);
        let mut ev = AccessEvaluator::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.config,
            notifier,
        );
        let outcome = ev.evaluate(&mut self.host, &alex, &from, &to, motion);
        if outcome.is_allowed() {
            self.host.set_position(&alex, to);
        }
        outcome
    }

    pub fn drop_slot(&mut self, slot: usize) -> Option<ZoneId> {
        let alex = self.alex.clone();
        let item = self.host.take_item(&alex, slot)?;
        let notifier = Notifier::new(&self.messages, None);
        let mut ev = AccessEvaluator::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.config,
            notifier,
        );
        ev.on_item_drop(&mut self.host, &alex, &item)
    }

    pub fn decay(&mut self) -> DecayReport {
        let notifier = Notifier::new(&self.messages, None);
        let mut pass = DecayPass::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.config,
            notifier,
        );
        pass.run(&mut self.host)
    }

    pub fn remaining(&self, token: &TokenId) -> Option<u64> {
        self.store.get(&self.alex, &self.arena, token)
    }
}
