//! The engine: one owned value holding every registry plus the host.
//!
//! Events from the host come in through the `on_*` methods, the decay
//! pass through [`ZoneGate::decay_tick`]. Admin operations live in
//! [`crate::admin`], the selection tool in [`crate::tool`] and
//! placeholder resolution in [`crate::placeholders`]; all of them are
//! methods on the same [`ZoneGate`] value.
//!
//! Everything runs on `&mut self`, so events and ticks are serialized
//! by construction. Hosts that need the engine on several tasks wrap it
//! in `Arc<tokio::sync::Mutex<_>>` (see [`crate::driver`]).

use std::path::{Path, PathBuf};

use zonegate_access::{
    AccessConfig, AccessEvaluator, DecayPass, DecayReport, Host, MoveOutcome, Notifier, Presence,
    TextProvider,
};
use zonegate_registry::{TokenCatalog, YamlDirStore, ZoneRegistry};
use zonegate_store::{EntitlementStore, JsonFileBackend};
use zonegate_types::{ItemSnapshot, MessageCatalog, PlayerId, Position, ZoneId};

use crate::{Settings, ZoneGateError};

/// Zone definitions, one YAML file per zone.
pub const ZONES_DIR: &str = "zones";
/// Token definitions, one YAML file per token.
pub const TOKENS_DIR: &str = "tokens";
/// Entitlements and selections.
pub const ENTITLEMENTS_FILE: &str = "entitlements.json";
/// Settings file looked up by [`ZoneGate::open_dir`].
pub const CONFIG_FILE: &str = "config.yml";

/// Token-gated zones over a [`Host`].
pub struct ZoneGate<H> {
    pub(crate) host: H,
    pub(crate) zones: ZoneRegistry,
    pub(crate) tokens: TokenCatalog,
    pub(crate) store: EntitlementStore,
    pub(crate) presence: Presence,
    pub(crate) settings: Settings,
    pub(crate) messages: MessageCatalog,
    pub(crate) access: AccessConfig,
    pub(crate) text: Option<Box<dyn TextProvider>>,
    pub(crate) config_path: Option<PathBuf>,
}

impl<H: Host> ZoneGate<H> {
    /// Assembles an engine from already-loaded parts.
    pub fn new(
        host: H,
        zones: ZoneRegistry,
        tokens: TokenCatalog,
        store: EntitlementStore,
        settings: Settings,
    ) -> Self {
        let messages = settings.messages();
        let access = settings.access_config();
        Self {
            host,
            zones,
            tokens,
            store,
            presence: Presence::new(),
            settings,
            messages,
            access,
            text: None,
            config_path: None,
        }
    }

    /// An engine with empty in-memory registries and store.
    pub fn in_memory(host: H, settings: Settings) -> Self {
        Self::new(
            host,
            ZoneRegistry::in_memory(),
            TokenCatalog::in_memory(),
            EntitlementStore::in_memory(),
            settings,
        )
    }

    /// Opens the file-backed layout under `data_dir`:
    ///
    /// ```text
    /// data_dir/
    ///   zones/<id>.yml
    ///   tokens/<id>.yml
    ///   entitlements.json
    /// ```
    ///
    /// Missing directories and files start out empty.
    ///
    /// # Errors
    /// If a directory cannot be read or the entitlement file is corrupt.
    pub fn open(host: H, data_dir: &Path, settings: Settings) -> Result<Self, ZoneGateError> {
        let zones = ZoneRegistry::load(YamlDirStore::new(data_dir.join(ZONES_DIR)))?;
        let tokens = TokenCatalog::load(YamlDirStore::new(data_dir.join(TOKENS_DIR)))?;
        let store = EntitlementStore::open(JsonFileBackend::new(data_dir.join(ENTITLEMENTS_FILE)))?;
        tracing::info!(
            data_dir = %data_dir.display(),
            zones = zones.len(),
            tokens = tokens.len(),
            "zonegate opened"
        );
        Ok(Self::new(host, zones, tokens, store, settings))
    }

    /// Like [`open`](Self::open), reading `config.yml` from `data_dir`.
    /// Reload re-reads the same file.
    pub fn open_dir(host: H, data_dir: &Path) -> Result<Self, ZoneGateError> {
        let config_path = data_dir.join(CONFIG_FILE);
        let settings = Settings::load(&config_path)?;
        let mut engine = Self::open(host, data_dir, settings)?;
        engine.config_path = Some(config_path);
        Ok(engine)
    }

    /// Routes all outgoing player text through `provider`.
    pub fn with_text_provider(mut self, provider: impl TextProvider + 'static) -> Self {
        self.text = Some(Box::new(provider));
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn tokens(&self) -> &TokenCatalog {
        &self.tokens
    }

    pub fn store(&self) -> &EntitlementStore {
        &self.store
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Persistence failures across both registries and the store.
    pub fn persist_failures(&self) -> u64 {
        self.zones.persist_failures()
            + self.tokens.persist_failures()
            + self.store.persist_failures()
    }

    // -----------------------------------------------------------------------
    // Host events
    // -----------------------------------------------------------------------

    /// A walk. The host cancels the motion unless the outcome allows it.
    pub fn on_move(&mut self, player: &PlayerId, from: &Position, to: &Position) -> MoveOutcome {
        let mut evaluator = AccessEvaluator::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.access,
            Notifier::new(&self.messages, self.text.as_deref()),
        );
        evaluator.on_move(&mut self.host, player, from, to)
    }

    /// A teleport. Entering a tokened zone without a token is refused
    /// unless `teleport-requires-token` is off.
    pub fn on_teleport(&mut self, player: &PlayerId, from: &Position, to: &Position) -> MoveOutcome {
        let mut evaluator = AccessEvaluator::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.access,
            Notifier::new(&self.messages, self.text.as_deref()),
        );
        evaluator.on_teleport(&mut self.host, player, from, to)
    }

    /// An item has left the player's inventory. Returns the zone the
    /// player was evicted from, if any.
    pub fn on_item_drop(&mut self, player: &PlayerId, dropped: &ItemSnapshot) -> Option<ZoneId> {
        let mut evaluator = AccessEvaluator::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.access,
            Notifier::new(&self.messages, self.text.as_deref()),
        );
        evaluator.on_item_drop(&mut self.host, player, dropped)
    }

    /// Forgets where the player was. Entitlements stay for the next
    /// session.
    pub fn on_player_quit(&mut self, player: &PlayerId) {
        let cleared = self.presence.clear_player(player);
        tracing::debug!(player_id = %player, cleared, "player quit");
    }

    /// One decay pass over every online player.
    pub fn decay_tick(&mut self) -> DecayReport {
        let mut pass = DecayPass::new(
            &self.zones,
            &self.tokens,
            &mut self.store,
            &mut self.presence,
            &self.access,
            Notifier::new(&self.messages, self.text.as_deref()),
        );
        pass.run(&mut self.host)
    }

    /// Replaces the settings and everything derived from them.
    pub(crate) fn apply_settings(&mut self, settings: Settings) {
        self.messages = settings.messages();
        self.access = settings.access_config();
        self.settings = settings;
    }
}
