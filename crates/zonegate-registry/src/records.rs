//! On-disk record shapes.
//!
//! Zone and token files are meant to be hand-editable, so records are
//! lenient on the way in (missing keys take defaults, ids may be written
//! as numbers or strings) and canonical on the way out.
//!
//! ```yaml
//! # zones/3.yml
//! id: '3'
//! name: Arena
//! x1: 0
//! y1: 60
//! z1: 0
//! x2: 20
//! y2: 80
//! z2: 20
//! world: world
//! kick-world: world
//! kick-x: 0
//! kick-y: 64
//! kick-z: -10
//! assigned-tokens:
//! - '1'
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use zonegate_types::{
    BlockPos, Cuboid, DEFAULT_KICK_Y, DEFAULT_TOKEN_DURATION_SECS, DEFAULT_TOKEN_MATERIAL,
    KickDestination, TokenId, ZoneId,
};

use crate::{TokenTemplate, Zone};

/// A persisted entity with an id that may be missing in hand-written files.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> Option<String>;
    fn set_id(&mut self, id: String);
}

/// An id as written in YAML: `id: 3` and `id: '3'` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdRepr {
    Int(i64),
    Str(String),
}

impl fmt::Display for IdRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

fn default_world() -> String {
    "world".to_string()
}

fn default_kick_y() -> i32 {
    DEFAULT_KICK_Y
}

fn default_duration() -> u64 {
    DEFAULT_TOKEN_DURATION_SECS
}

fn default_material() -> String {
    DEFAULT_TOKEN_MATERIAL.to_string()
}

/// Distinct, non-empty ids in first-seen order.
fn dedup_ids(ids: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if !id.is_empty() && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// ZoneRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ZoneRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdRepr>,
    /// Missing names fall back to the file stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub x1: i32,
    #[serde(default)]
    pub y1: i32,
    #[serde(default)]
    pub z1: i32,
    #[serde(default)]
    pub x2: i32,
    #[serde(default)]
    pub y2: i32,
    #[serde(default)]
    pub z2: i32,
    #[serde(default = "default_world")]
    pub world: String,
    /// Defaults to the zone's own world.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kick_world: Option<String>,
    #[serde(default)]
    pub kick_x: i32,
    #[serde(default = "default_kick_y")]
    pub kick_y: i32,
    #[serde(default)]
    pub kick_z: i32,
    #[serde(default)]
    pub assigned_tokens: Vec<IdRepr>,
}

impl Record for ZoneRecord {
    fn id(&self) -> Option<String> {
        self.id.as_ref().map(IdRepr::to_string)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(IdRepr::Str(id));
    }
}

impl ZoneRecord {
    pub(crate) fn from_zone(zone: &Zone) -> Self {
        let (min, max) = (zone.cuboid.min(), zone.cuboid.max());
        Self {
            id: Some(IdRepr::Str(zone.id.as_str().to_string())),
            name: Some(zone.name.clone()),
            x1: min.x,
            y1: min.y,
            z1: min.z,
            x2: max.x,
            y2: max.y,
            z2: max.z,
            world: zone.world.clone(),
            kick_world: Some(zone.kick.world.clone()),
            kick_x: zone.kick.x,
            kick_y: zone.kick.y,
            kick_z: zone.kick.z,
            assigned_tokens: zone
                .assigned_tokens()
                .iter()
                .map(|t| IdRepr::Str(t.as_str().to_string()))
                .collect(),
        }
    }

    pub(crate) fn into_zone(self, id: ZoneId, fallback_name: &str) -> Zone {
        let cuboid = Cuboid::new(
            BlockPos::new(self.x1, self.y1, self.z1),
            BlockPos::new(self.x2, self.y2, self.z2),
        );
        let kick = KickDestination {
            world: self.kick_world.unwrap_or_else(|| self.world.clone()),
            x: self.kick_x,
            y: self.kick_y,
            z: self.kick_z,
        };
        let mut zone = Zone::new(
            id,
            self.name.unwrap_or_else(|| fallback_name.to_string()),
            self.world,
            cuboid,
        );
        zone.kick = kick;
        for token in dedup_ids(self.assigned_tokens.iter().map(IdRepr::to_string)) {
            zone.assign(TokenId::new(token));
        }
        zone
    }
}

// ---------------------------------------------------------------------------
// TokenRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TokenRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IdRepr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Single-zone field from before tokens could open several zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_zone: Option<IdRepr>,
    #[serde(default)]
    pub assigned_zones: Vec<IdRepr>,
    #[serde(default = "default_material")]
    pub item_material: String,
    #[serde(default)]
    pub glowing: bool,
    #[serde(default)]
    pub lore: Vec<String>,
}

impl Record for TokenRecord {
    fn id(&self) -> Option<String> {
        self.id.as_ref().map(IdRepr::to_string)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(IdRepr::Str(id));
    }
}

impl TokenRecord {
    pub(crate) fn from_token(token: &TokenTemplate) -> Self {
        Self {
            id: Some(IdRepr::Str(token.id.as_str().to_string())),
            name: Some(token.name.clone()),
            duration: token.duration_secs,
            assigned_zone: token
                .primary_zone()
                .map(|z| IdRepr::Str(z.as_str().to_string())),
            assigned_zones: token
                .assigned_zones()
                .iter()
                .map(|z| IdRepr::Str(z.as_str().to_string()))
                .collect(),
            item_material: token.material.clone(),
            glowing: token.glowing,
            lore: token.lore().to_vec(),
        }
    }

    pub(crate) fn into_token(self, id: TokenId, fallback_name: &str) -> TokenTemplate {
        let mut token = TokenTemplate::new(
            id,
            self.name.unwrap_or_else(|| fallback_name.to_string()),
            self.duration,
        );
        token.material = self.item_material;
        token.glowing = self.glowing;
        for line in self.lore {
            token.push_lore(line);
        }

        let primary = self
            .assigned_zone
            .map(|z| z.to_string())
            .filter(|z| !z.is_empty());
        let zones = dedup_ids(
            self.assigned_zones
                .iter()
                .map(IdRepr::to_string)
                .chain(primary.clone()),
        );
        for zone in zones {
            token.assign(ZoneId::new(zone));
        }
        // `assign` moves the primary to the latest zone; restore the
        // stored one.
        token.set_primary(primary.map(ZoneId::new));
        token
    }
}
