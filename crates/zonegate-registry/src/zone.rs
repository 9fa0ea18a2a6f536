use serde::{Deserialize, Serialize};
use zonegate_types::{Cuboid, KickDestination, Position, TokenId, ZoneId};

/// A named cuboid in one world.
///
/// Mutate through [`ZoneRegistry`](crate::ZoneRegistry) so changes are
/// persisted; the public fields are for reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub world: String,
    pub cuboid: Cuboid,
    pub kick: KickDestination,
    assigned_tokens: Vec<TokenId>,
}

impl Zone {
    /// A zone with no tokens and the fallback kick destination in its
    /// own world.
    pub fn new(id: ZoneId, name: impl Into<String>, world: impl Into<String>, cuboid: Cuboid) -> Self {
        let world = world.into();
        Self {
            id,
            name: name.into(),
            kick: KickDestination::fallback(world.clone()),
            world,
            cuboid,
            assigned_tokens: Vec::new(),
        }
    }

    /// `true` if `pos` is in this zone's world and inside its box.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.world == self.world && self.cuboid.contains(pos.x, pos.y, pos.z)
    }

    /// Tokens that open this zone, in assignment order.
    pub fn assigned_tokens(&self) -> &[TokenId] {
        &self.assigned_tokens
    }

    pub fn is_token_assigned(&self, token: &TokenId) -> bool {
        self.assigned_tokens.contains(token)
    }

    /// Adds `token` if absent. Returns `true` if the set changed.
    pub(crate) fn assign(&mut self, token: TokenId) -> bool {
        if self.assigned_tokens.contains(&token) {
            return false;
        }
        self.assigned_tokens.push(token);
        true
    }

    /// Removes `token` if present. Returns `true` if the set changed.
    pub(crate) fn unassign(&mut self, token: &TokenId) -> bool {
        let before = self.assigned_tokens.len();
        self.assigned_tokens.retain(|t| t != token);
        before != self.assigned_tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegate_types::BlockPos;

    fn zone() -> Zone {
        Zone::new(
            ZoneId::new("1"),
            "Arena",
            "world",
            Cuboid::new(BlockPos::new(0, 0, 0), BlockPos::new(10, 10, 10)),
        )
    }

    #[test]
    fn test_contains_requires_same_world() {
        let z = zone();
        assert!(z.contains(&Position::new("world", 5.0, 5.0, 5.0)));
        assert!(!z.contains(&Position::new("nether", 5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_assign_then_unassign_restores_set() {
        let mut z = zone();
        z.assign(TokenId::new("a"));
        let before = z.assigned_tokens().to_vec();

        assert!(z.assign(TokenId::new("b")));
        assert!(!z.assign(TokenId::new("b")));
        assert!(z.unassign(&TokenId::new("b")));
        assert!(!z.unassign(&TokenId::new("b")));
        assert_eq!(z.assigned_tokens(), before.as_slice());
    }
}
