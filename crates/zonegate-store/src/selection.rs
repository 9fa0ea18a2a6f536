use serde::{Deserialize, Serialize};
use zonegate_types::{BlockPos, Cuboid};

/// A zone being drawn with the selection tool.
///
/// The first corner always exists once a selection exists; the second
/// arrives later and only in the same world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSelection {
    pub world: String,
    pub first: BlockPos,
    pub second: Option<BlockPos>,
}

impl ZoneSelection {
    pub fn new(world: impl Into<String>, first: BlockPos) -> Self {
        Self {
            world: world.into(),
            first,
            second: None,
        }
    }

    /// The finished box, if both corners are set.
    pub fn cuboid(&self) -> Option<Cuboid> {
        self.second.map(|second| Cuboid::new(self.first, second))
    }
}
