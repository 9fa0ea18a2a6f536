//! `config.yml`.
//!
//! ```yaml
//! settings:
//!   time-warning-threshold: 10
//!   decay-period-ms: 1000
//!   teleport-requires-token: true
//! pagination:
//!   items-per-page: 5
//! messages:
//!   prefix: "&8[&6Zones&8] "
//!   access:
//!     kicked: "{prefix}&cOut of &e{zoneName}&c!"
//! ```
//!
//! Every key is optional. Message entries overlay the built-in
//! templates; their nesting becomes the dotted key (`access.kicked`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use zonegate_access::AccessConfig;
use zonegate_tick::TickConfig;
use zonegate_types::MessageCatalog;

use crate::ZoneGateError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GeneralSettings {
    pub time_warning_threshold: u64,
    /// Milliseconds between decay passes. 0 means the host calls
    /// `decay_tick` itself.
    pub decay_period_ms: u64,
    pub teleport_requires_token: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        let access = AccessConfig::default();
        Self {
            time_warning_threshold: access.time_warning_threshold,
            decay_period_ms: 1000,
            teleport_requires_token: access.teleport_requires_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Pagination {
    pub items_per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { items_per_page: 5 }
    }
}

/// Everything `config.yml` can set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub settings: GeneralSettings,
    pub pagination: Pagination,
    /// Nested message overrides, flattened by [`Settings::messages`].
    #[serde(rename = "messages")]
    pub message_overrides: serde_yaml::Value,
}

impl Settings {
    /// Reads `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// [`ZoneGateError::Io`] if the file exists but cannot be read,
    /// [`ZoneGateError::Config`] if it is not valid YAML for this shape.
    pub fn load(path: &Path) -> Result<Self, ZoneGateError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ZoneGateError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_yaml(&text).map_err(|e| match e {
            ZoneGateError::Config { message, .. } => ZoneGateError::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parses settings from YAML text. Empty text yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, ZoneGateError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| ZoneGateError::Config {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// The message catalog: defaults overlaid with configured entries.
    pub fn messages(&self) -> MessageCatalog {
        let mut flat = Vec::new();
        flatten_messages(&self.message_overrides, String::new(), &mut flat);
        MessageCatalog::with_overrides(flat)
    }

    pub fn access_config(&self) -> AccessConfig {
        AccessConfig {
            time_warning_threshold: self.settings.time_warning_threshold,
            teleport_requires_token: self.settings.teleport_requires_token,
        }
    }

    pub fn tick_config(&self) -> TickConfig {
        TickConfig::from_millis(self.settings.decay_period_ms)
    }

    /// Items per page, never zero.
    pub fn items_per_page(&self) -> usize {
        self.pagination.items_per_page.max(1)
    }
}

fn flatten_messages(value: &serde_yaml::Value, prefix: String, out: &mut Vec<(String, String)>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let Some(k) = k.as_str() else {
                    continue;
                };
                let key = if prefix.is_empty() {
                    k.to_string()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_messages(v, key, out);
            }
        }
        serde_yaml::Value::String(s) if !prefix.is_empty() => out.push((prefix, s.clone())),
        serde_yaml::Value::Null => {}
        other => {
            tracing::warn!(key = %prefix, value = ?other, "ignoring non-text message entry");
        }
    }
}
