//! Access configuration.

use serde::{Deserialize, Serialize};

/// Tunables for entry evaluation and decay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AccessConfig {
    /// Remaining seconds at or below which the decay pass shows a
    /// countdown on the action bar.
    pub time_warning_threshold: u64,

    /// Refuse a teleport into a token zone when the player carries no
    /// matching token. Walking in without one is allowed and left to the
    /// next decay pass.
    pub teleport_requires_token: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            time_warning_threshold: 10,
            teleport_requires_token: true,
        }
    }
}
