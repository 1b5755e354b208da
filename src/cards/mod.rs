//! Card system: blueprints, instances, library and derived rules.
//!
//! ## Key Types
//!
//! - `BlueprintId`: Identifier for a card printing
//! - `CardBlueprint`: Immutable card template, built by `BlueprintBuilder`
//! - `Capabilities` / `MovementModes`: Orthogonal rules flags
//! - `PhysicalCard`: A copy of a blueprint on the table
//! - `BlueprintLibrary`: Blueprint lookup with per-card failure isolation
//! - `rules`: Free functions computing derived rules properties
//!
//! There is one blueprint record for every card family. What a shuttle
//! vehicle does differently is expressed through its subtype and flags,
//! and answered by the functions in [`rules`].

pub mod blueprint;
pub mod capability;
pub mod instance;
pub mod library;
pub mod rules;

pub use blueprint::{
    BlueprintBuilder, BlueprintId, CardBlueprint, CardCategory, CardStats, CardSubtype, Uniqueness,
};
pub use capability::{Capabilities, MovementModes};
pub use instance::PhysicalCard;
pub use library::{BlueprintLibrary, LoadReport};
pub use rules::{can_move_using, has_capacity_for_pilot, is_shuttle, movement_modes, valid_pilot_filter};
