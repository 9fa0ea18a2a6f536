//! Shared vocabulary for ZoneGate.
//!
//! Every other crate in the workspace speaks in these types:
//!
//! - **Identity** ([`PlayerId`], [`ZoneId`], [`TokenId`]): stable keys.
//!   Display names are mutable and non-unique, so nothing is ever keyed
//!   by a name.
//! - **Geometry** ([`BlockPos`], [`Position`], [`Cuboid`],
//!   [`KickDestination`]): axis-aligned boxes and the points tested
//!   against them.
//! - **Items** ([`ItemSnapshot`]): what the host reports about a carried
//!   item, including the hidden token tag.
//! - **Text** ([`MessageCatalog`], [`colorize`], [`strip_color`]):
//!   user-facing message templates.
//! - **Durations** ([`parse_duration`], [`format_duration`],
//!   [`format_hms`]).
//! - **Permissions** ([`permissions`]): capability keys checked
//!   against the host.
//! - **Codecs** ([`Codec`], [`JsonCodec`], [`YamlCodec`]): how persisted
//!   records become bytes.
//!
//! ```text
//! Registry / Store (above)  ← persist records through a Codec
//!     ↕
//! Types (this crate)        ← ids, geometry, items, text
//! ```

mod codec;
mod duration;
mod error;
mod geometry;
mod item;
mod messages;
pub mod permissions;
mod text;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
#[cfg(feature = "yaml")]
pub use codec::YamlCodec;
pub use duration::{
    DEFAULT_TOKEN_DURATION_SECS, format_duration, format_hms, parse_duration,
};
pub use error::ParseError;
pub use geometry::{BlockPos, Cuboid, DEFAULT_KICK_Y, KickDestination, Position};
pub use item::{
    DEFAULT_TOKEN_MATERIAL, ItemSnapshot, TIME_LEFT_LABEL, time_left_line,
};
pub use messages::{MessageCatalog, keys};
pub use text::{colorize, strip_color};
pub use types::{PlayerId, TokenId, ZoneId};
