//! Card blueprints - static card data.
//!
//! `CardBlueprint` holds the immutable properties of a card: side, stats,
//! category and subtype, capacities and capability flags. A blueprint is
//! created once at content-load time and never mutated afterwards; all
//! per-game variability lives on `PhysicalCard`.
//!
//! Blueprints are only produced by `BlueprintBuilder::build`, which
//! validates the stat combination; deserialization goes through it too. An
//! invalid definition fails there, not at play time.

use serde::{Deserialize, Serialize};

use super::capability::Capabilities;
use crate::core::{ContentError, Side};

/// Unique identifier for a blueprint.
///
/// This identifies the card printing (e.g., "Lambda-Class Shuttle"), not a
/// specific copy on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlueprintId(pub u32);

impl BlueprintId {
    /// Create a new blueprint ID.
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

impl std::fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blueprint({})", self.0)
    }
}

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Character,
    Starship,
    Vehicle,
    Location,
    Weapon,
    Device,
    Effect,
    Interrupt,
}

impl CardCategory {
    /// Whether cards of this category can carry pilots or passengers.
    #[must_use]
    pub const fn is_transport(self) -> bool {
        matches!(self, CardCategory::Starship | CardCategory::Vehicle)
    }
}

/// Specialization within a category that changes which rules apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSubtype {
    // Vehicles
    Shuttle,
    Combat,
    Transport,
    Creature,
    // Starships
    Starfighter,
    Capital,
    // Locations
    Site,
    System,
    Sector,
}

impl CardSubtype {
    /// The category this subtype belongs to.
    #[must_use]
    pub const fn category(self) -> CardCategory {
        match self {
            CardSubtype::Shuttle
            | CardSubtype::Combat
            | CardSubtype::Transport
            | CardSubtype::Creature => CardCategory::Vehicle,
            CardSubtype::Starfighter | CardSubtype::Capital => CardCategory::Starship,
            CardSubtype::Site | CardSubtype::System | CardSubtype::Sector => CardCategory::Location,
        }
    }
}

/// How many copies of a card may be on the table at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Uniqueness {
    /// One copy.
    Unique,
    /// At most `n` copies.
    Restricted(u8),
    /// Any number of copies.
    #[default]
    Unrestricted,
}

impl Uniqueness {
    /// Maximum copies in play, or `None` if unlimited.
    #[must_use]
    pub const fn max_in_play(self) -> Option<u8> {
        match self {
            Uniqueness::Unique => Some(1),
            Uniqueness::Restricted(n) => Some(n),
            Uniqueness::Unrestricted => None,
        }
    }
}

/// Base numeric stats. `None` means "not applicable to this card".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    pub destiny: Option<f32>,
    pub deploy_cost: Option<f32>,
    pub power: Option<f32>,
    pub armor: Option<f32>,
    pub maneuver: Option<f32>,
    pub landspeed: Option<f32>,
    pub forfeit: Option<f32>,
}

impl CardStats {
    fn named(&self) -> [(&'static str, Option<f32>); 7] {
        [
            ("destiny", self.destiny),
            ("deploy cost", self.deploy_cost),
            ("power", self.power),
            ("armor", self.armor),
            ("maneuver", self.maneuver),
            ("landspeed", self.landspeed),
            ("forfeit", self.forfeit),
        ]
    }
}

/// Immutable card template.
///
/// Read through the getters; build one with [`BlueprintBuilder`].
/// Deserializing a blueprint runs the same validation as `build()`.
///
/// ## Example
///
/// ```
/// use swccg_engine::cards::{BlueprintBuilder, BlueprintId, CardStats, CardSubtype};
/// use swccg_engine::core::Side;
///
/// let shuttle = BlueprintBuilder::shuttle_vehicle(
///     BlueprintId::new(1),
///     Side::Dark,
///     "Lambda-Class Shuttle",
///     CardStats {
///         destiny: Some(3.0),
///         deploy_cost: Some(2.0),
///         power: Some(2.0),
///         maneuver: Some(3.0),
///         landspeed: Some(1.0),
///         forfeit: Some(3.0),
///         ..CardStats::default()
///     },
/// )
/// .pilot_capacity(2)
/// .build()
/// .unwrap();
///
/// assert_eq!(shuttle.subtype(), Some(CardSubtype::Shuttle));
/// assert_eq!(shuttle.pilot_capacity(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlueprintDefinition")]
pub struct CardBlueprint {
    id: BlueprintId,
    title: String,
    side: Side,
    category: CardCategory,
    subtype: Option<CardSubtype>,
    stats: CardStats,
    uniqueness: Uniqueness,
    pilot_capacity: u8,
    passenger_capacity: u8,
    capabilities: Capabilities,
}

impl CardBlueprint {
    #[must_use]
    pub fn id(&self) -> BlueprintId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn category(&self) -> CardCategory {
        self.category
    }

    #[must_use]
    pub fn subtype(&self) -> Option<CardSubtype> {
        self.subtype
    }

    #[must_use]
    pub fn stats(&self) -> &CardStats {
        &self.stats
    }

    #[must_use]
    pub fn uniqueness(&self) -> Uniqueness {
        self.uniqueness
    }

    /// Pilot-class cards the card can hold.
    #[must_use]
    pub fn pilot_capacity(&self) -> u8 {
        self.pilot_capacity
    }

    #[must_use]
    pub fn passenger_capacity(&self) -> u8 {
        self.passenger_capacity
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether only one copy may be in play.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.uniqueness == Uniqueness::Unique
    }

    /// Whether the card has any of the given capabilities.
    #[must_use]
    pub fn has_any(&self, capabilities: Capabilities) -> bool {
        self.capabilities.intersects(capabilities)
    }
}

/// Serialized form of a blueprint, validated on the way in.
#[derive(Deserialize)]
struct BlueprintDefinition {
    id: BlueprintId,
    title: String,
    side: Side,
    category: CardCategory,
    #[serde(default)]
    subtype: Option<CardSubtype>,
    #[serde(default)]
    stats: CardStats,
    #[serde(default)]
    uniqueness: Uniqueness,
    #[serde(default)]
    pilot_capacity: i32,
    #[serde(default)]
    passenger_capacity: i32,
    #[serde(default)]
    capabilities: Capabilities,
}

impl TryFrom<BlueprintDefinition> for CardBlueprint {
    type Error = ContentError;

    fn try_from(def: BlueprintDefinition) -> Result<Self, Self::Error> {
        let mut builder = BlueprintBuilder::new(def.id, def.side, def.category, def.title)
            .stats(def.stats)
            .uniqueness(def.uniqueness)
            .pilot_capacity(def.pilot_capacity)
            .passenger_capacity(def.passenger_capacity)
            .capabilities(def.capabilities);
        if let Some(subtype) = def.subtype {
            builder = builder.subtype(subtype);
        }
        builder.build()
    }
}

/// Construction-time builder for [`CardBlueprint`].
///
/// The setters here are the only way to give a card its capacities and
/// flags; once `build()` returns, the blueprint is frozen.
#[derive(Clone, Debug)]
pub struct BlueprintBuilder {
    id: BlueprintId,
    title: String,
    side: Side,
    category: CardCategory,
    subtype: Option<CardSubtype>,
    stats: CardStats,
    uniqueness: Uniqueness,
    pilot_capacity: i32,
    passenger_capacity: i32,
    capabilities: Capabilities,
}

impl BlueprintBuilder {
    /// Start a blueprint of any category.
    pub fn new(id: BlueprintId, side: Side, category: CardCategory, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            side,
            category,
            subtype: None,
            stats: CardStats::default(),
            uniqueness: Uniqueness::default(),
            pilot_capacity: 0,
            passenger_capacity: 0,
            capabilities: Capabilities::empty(),
        }
    }

    /// A character.
    pub fn character(id: BlueprintId, side: Side, title: impl Into<String>, stats: CardStats) -> Self {
        Self::new(id, side, CardCategory::Character, title).stats(stats)
    }

    /// A vehicle.
    pub fn vehicle(id: BlueprintId, side: Side, title: impl Into<String>, stats: CardStats) -> Self {
        Self::new(id, side, CardCategory::Vehicle, title).stats(stats)
    }

    /// A shuttle vehicle: a vehicle forced to the `Shuttle` subtype, with no
    /// armor value.
    pub fn shuttle_vehicle(
        id: BlueprintId,
        side: Side,
        title: impl Into<String>,
        stats: CardStats,
    ) -> Self {
        Self::vehicle(id, side, title, CardStats { armor: None, ..stats })
            .subtype(CardSubtype::Shuttle)
    }

    /// A starship.
    pub fn starship(id: BlueprintId, side: Side, title: impl Into<String>, stats: CardStats) -> Self {
        Self::new(id, side, CardCategory::Starship, title).stats(stats)
    }

    /// A location of the given subtype (site, system or sector).
    pub fn location(id: BlueprintId, side: Side, title: impl Into<String>, subtype: CardSubtype) -> Self {
        Self::new(id, side, CardCategory::Location, title).subtype(subtype)
    }

    /// Replace all base stats.
    #[must_use]
    pub fn stats(mut self, stats: CardStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn subtype(mut self, subtype: CardSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    #[must_use]
    pub fn uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Mark as unique (shorthand for `uniqueness(Uniqueness::Unique)`).
    #[must_use]
    pub fn unique(self) -> Self {
        self.uniqueness(Uniqueness::Unique)
    }

    /// Set how many pilot-class cards the card can hold.
    ///
    /// Checked by `build()`: must be non-negative and only on a starship or
    /// vehicle.
    #[must_use]
    pub fn pilot_capacity(mut self, capacity: i32) -> Self {
        self.pilot_capacity = capacity;
        self
    }

    #[must_use]
    pub fn passenger_capacity(mut self, capacity: i32) -> Self {
        self.passenger_capacity = capacity;
        self
    }

    /// Add capability flags.
    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Validate and freeze the blueprint.
    pub fn build(self) -> Result<CardBlueprint, ContentError> {
        if self.title.trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        for (stat, value) in self.stats.named() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ContentError::InvalidStat {
                        title: self.title,
                        stat,
                        value,
                    });
                }
            }
        }

        if let Some(subtype) = self.subtype {
            if subtype.category() != self.category {
                return Err(ContentError::SubtypeMismatch {
                    title: self.title,
                    subtype,
                    category: self.category,
                });
            }
        }

        let pilot_capacity = self.checked_capacity("pilot", self.pilot_capacity)?;
        let passenger_capacity = self.checked_capacity("passenger", self.passenger_capacity)?;

        Ok(CardBlueprint {
            id: self.id,
            title: self.title,
            side: self.side,
            category: self.category,
            subtype: self.subtype,
            stats: self.stats,
            uniqueness: self.uniqueness,
            pilot_capacity,
            passenger_capacity,
            capabilities: self.capabilities,
        })
    }

    fn checked_capacity(&self, kind: &'static str, capacity: i32) -> Result<u8, ContentError> {
        if capacity < 0 {
            return Err(ContentError::NegativeCapacity {
                title: self.title.clone(),
                kind,
                capacity,
            });
        }
        if capacity > 0 && !self.category.is_transport() {
            return Err(ContentError::CapacityNotAllowed {
                title: self.title.clone(),
                kind,
                category: self.category,
            });
        }
        u8::try_from(capacity).map_err(|_| ContentError::InvalidStat {
            title: self.title.clone(),
            stat: if kind == "pilot" { "pilot capacity" } else { "passenger capacity" },
            value: capacity as f32,
        })
    }
}
