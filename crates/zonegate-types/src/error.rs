//! Error types for the shared vocabulary crate.
//!
//! Anything that turns text or bytes into ZoneGate values reports a
//! [`ParseError`]: storage codecs, duration strings typed by an admin,
//! coordinate arguments.

/// Errors raised while parsing or encoding shared values.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A record could not be written as JSON.
    #[cfg(feature = "json")]
    #[error("json encode failed: {0}")]
    JsonEncode(serde_json::Error),

    /// Stored bytes are not valid JSON for the expected type.
    #[cfg(feature = "json")]
    #[error("json decode failed: {0}")]
    JsonDecode(serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("yaml encode failed: {0}")]
    YamlEncode(serde_yaml::Error),

    /// Common causes: a hand-edited file with a wrong indent, or a
    /// string where a number is expected.
    #[cfg(feature = "yaml")]
    #[error("yaml decode failed: {0}")]
    YamlDecode(serde_yaml::Error),

    /// The input is not a duration such as `90`, `30s`, `5m`, `2h` or `1d`.
    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),

    /// The input is not an integer block coordinate.
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),
}
