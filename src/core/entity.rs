//! Entity identification.
//!
//! Every card on the table has a unique `EntityId`. Locations (sites,
//! systems, sectors) are cards too, so "where is this card" is answered
//! with the `EntityId` of a location card.
//!
//! ## Usage
//!
//! ```
//! use swccg_engine::core::EntityId;
//!
//! let vehicle = EntityId::new(10);
//! assert_eq!(vehicle.raw(), 10);
//! assert_eq!(format!("{}", vehicle), "Entity(10)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an in-play card instance.
///
/// Identity comparison is all the protocol needs from a card; everything
/// else goes through `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
