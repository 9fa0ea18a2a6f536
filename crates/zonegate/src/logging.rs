//! Tracing setup for binaries and embedding hosts.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs a global fmt subscriber filtered by `RUST_LOG`, falling back
/// to `default_directive` (for example `"zonegate=info"`).
///
/// Returns `false` if a global subscriber was already installed, in
/// which case nothing changes.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_second_call_is_noop() {
        init_tracing("zonegate=debug");
        assert!(!init_tracing("zonegate=debug"));
    }
}
