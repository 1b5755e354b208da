//! Physical cards - in-play card instances.
//!
//! `PhysicalCard` is one copy of a blueprint on the table. It tracks the
//! per-game state the protocol needs: owner, the location card it is at,
//! and the transport it is aboard (if any).

use serde::{Deserialize, Serialize};

use super::blueprint::BlueprintId;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalCard {
    /// Unique entity ID for this instance.
    pub id: EntityId,

    /// Blueprint this card is a copy of. Never changes.
    pub blueprint: BlueprintId,

    /// Owner (who deployed it).
    pub owner: PlayerId,

    /// Location card this card is at. `None` when not on the table, and for
    /// location cards themselves.
    pub location: Option<EntityId>,

    /// Starship or vehicle this card is aboard.
    pub aboard: Option<EntityId>,
}

impl PhysicalCard {
    /// Create a card instance that is not yet at a location.
    #[must_use]
    pub fn new(id: EntityId, blueprint: BlueprintId, owner: PlayerId) -> Self {
        Self {
            id,
            blueprint,
            owner,
            location: None,
            aboard: None,
        }
    }

    /// Place at a location (builder pattern).
    #[must_use]
    pub fn at(mut self, location: EntityId) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether the card is at the given location.
    #[must_use]
    pub fn is_at(&self, location: EntityId) -> bool {
        self.location == Some(location)
    }

    /// Whether the card is aboard the given transport.
    #[must_use]
    pub fn is_aboard(&self, transport: EntityId) -> bool {
        self.aboard == Some(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card() {
        let card = PhysicalCard::new(EntityId(10), BlueprintId::new(1), PlayerId::new(0));

        assert_eq!(card.id, EntityId(10));
        assert_eq!(card.blueprint, BlueprintId::new(1));
        assert_eq!(card.owner, PlayerId::new(0));
        assert!(card.location.is_none());
        assert!(card.aboard.is_none());
    }

    #[test]
    fn test_at_location() {
        let card = PhysicalCard::new(EntityId(10), BlueprintId::new(1), PlayerId::new(0)).at(EntityId(2));

        assert!(card.is_at(EntityId(2)));
        assert!(!card.is_at(EntityId(3)));
    }

    #[test]
    fn test_serialization() {
        let card = PhysicalCard::new(EntityId(10), BlueprintId::new(1), PlayerId::new(1)).at(EntityId(2));

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: PhysicalCard = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
