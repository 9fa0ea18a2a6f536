//! Error types for host interactions.

use zonegate_types::PlayerId;

/// Failures a [`Host`](crate::Host) reports back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("player {0} is not online")]
    PlayerOffline(PlayerId),

    /// No free slot for a new item.
    #[error("inventory of {0} is full")]
    InventoryFull(PlayerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display_names_player() {
        let err = HostError::InventoryFull(PlayerId::new("steve"));
        assert!(err.to_string().contains("P-steve"));
    }
}
