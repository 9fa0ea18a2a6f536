//! Storage codecs.
//!
//! The store and registry crates never call `serde_json` or `serde_yaml`
//! directly; they hold something that implements [`Codec`] and hand it
//! whole records. Entitlement snapshots use [`JsonCodec`], zone and token
//! records use [`YamlCodec`] so admins can edit them by hand.

use serde::{Serialize, de::DeserializeOwned};

use crate::ParseError;

/// Turns records into bytes and back.
///
/// `Send + Sync + 'static` lets a backend holding a codec live inside the
/// engine when the engine is shared across tokio tasks.
pub trait Codec: Send + Sync + 'static {
    /// # Errors
    /// Returns the format's encode variant of [`ParseError`].
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ParseError>;

    /// # Errors
    /// Returns the format's decode variant of [`ParseError`] for
    /// malformed input or a shape mismatch.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// Pretty-printed JSON. Behind the `json` feature (on by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ParseError> {
        serde_json::to_vec_pretty(value).map_err(ParseError::JsonEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError> {
        serde_json::from_slice(data).map_err(ParseError::JsonDecode)
    }
}

// ---------------------------------------------------------------------------
// YamlCodec
// ---------------------------------------------------------------------------

/// YAML, the format of the hand-editable zone and token files.
#[cfg(feature = "yaml")]
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

#[cfg(feature = "yaml")]
impl Codec for YamlCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ParseError> {
        serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(ParseError::YamlEncode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError> {
        serde_yaml::from_slice(data).map_err(ParseError::YamlDecode)
    }
}
