//! Axis-aligned geometry.
//!
//! Zones are boxes of whole blocks. Players stand at fractional
//! positions, so containment compares a `Position` (f64) against integer
//! bounds with a closed interval on every axis: a player at x = 10.0 is
//! inside a box whose max x is 10, a player at x = 10.5 is not.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Altitude used when a kick destination was never configured.
pub const DEFAULT_KICK_Y: i32 = 64;

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// Integer block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A point in a named world, as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// The block this position falls in.
    pub fn block(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    /// `true` if both positions are the same point in the same world.
    ///
    /// Hosts fire move events for head rotation too; those are not
    /// motion and never change zone membership.
    pub fn same_point(&self, other: &Position) -> bool {
        self.world == other.world
            && self.x == other.x
            && self.y == other.y
            && self.z == other.z
    }
}

// ---------------------------------------------------------------------------
// Cuboid
// ---------------------------------------------------------------------------

/// A normalized axis-aligned box: `min <= max` on every axis.
///
/// The only way to build one is [`Cuboid::new`], which sorts each axis,
/// so the invariant holds regardless of the order corners are supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCuboid")]
pub struct Cuboid {
    min: BlockPos,
    max: BlockPos,
}

/// Deserialization goes through `new` so stored boxes are re-normalized.
#[derive(Deserialize)]
struct RawCuboid {
    min: BlockPos,
    max: BlockPos,
}

impl From<RawCuboid> for Cuboid {
    fn from(raw: RawCuboid) -> Self {
        Cuboid::new(raw.min, raw.max)
    }
}

impl Cuboid {
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    pub fn min(&self) -> BlockPos {
        self.min
    }

    pub fn max(&self) -> BlockPos {
        self.max
    }

    /// Closed-interval containment on each axis.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        x >= f64::from(self.min.x)
            && x <= f64::from(self.max.x)
            && y >= f64::from(self.min.y)
            && y <= f64::from(self.max.y)
            && z >= f64::from(self.min.z)
            && z <= f64::from(self.max.z)
    }

    pub fn contains_block(&self, pos: BlockPos) -> bool {
        self.contains(f64::from(pos.x), f64::from(pos.y), f64::from(pos.z))
    }
}

// ---------------------------------------------------------------------------
// KickDestination
// ---------------------------------------------------------------------------

/// Where an evicted player is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickDestination {
    pub world: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl KickDestination {
    /// The destination a fresh zone gets: origin of its own world at
    /// [`DEFAULT_KICK_Y`].
    pub fn fallback(world: impl Into<String>) -> Self {
        Self {
            world: world.into(),
            x: 0,
            y: DEFAULT_KICK_Y,
            z: 0,
        }
    }

    /// Center of the destination block.
    pub fn to_position(&self) -> Position {
        Position::new(
            self.world.clone(),
            f64::from(self.x) + 0.5,
            f64::from(self.y) + 0.5,
            f64::from(self.z) + 0.5,
        )
    }
}
