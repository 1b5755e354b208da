//! Derived rules properties.
//!
//! Free functions computing what a blueprint allows, from its category,
//! subtype, stats and capability flags. Card families do not override
//! these; a shuttle vehicle answers every question with the same vehicle
//! rule as any other vehicle.

use super::blueprint::{CardBlueprint, CardCategory, CardSubtype};
use super::capability::{Capabilities, MovementModes};
use super::instance::PhysicalCard;
use crate::core::{EntityId, GameState, PlayerId};
use crate::filters::Filter;
use crate::results::MovementMode;

/// Capabilities that count as pilot-class aboard a card of this blueprint.
///
/// Vehicles accept pilots or drivers; starships accept pilots.
#[must_use]
pub fn pilot_class(blueprint: &CardBlueprint) -> Capabilities {
    match blueprint.category() {
        CardCategory::Vehicle => Capabilities::PILOT | Capabilities::DRIVER,
        _ => Capabilities::PILOT,
    }
}

/// Filter for the cards that are valid pilots (or drivers) of `self_card`.
///
/// A valid pilot has a pilot-class capability, is owned by `player` and is
/// not the transport itself. Outside deployment it must also already be
/// aboard or at the same location. A transport with no room left for
/// another pilot accepts nobody.
#[must_use]
pub fn valid_pilot_filter(
    blueprint: &CardBlueprint,
    player: PlayerId,
    game: &GameState,
    self_card: &PhysicalCard,
    for_deployment: bool,
) -> Filter {
    if !blueprint.category().is_transport() || !has_capacity_for_pilot(game, self_card.id) {
        return Filter::Never;
    }

    let base = Filter::all([
        Filter::HasCapability(pilot_class(blueprint)),
        Filter::OwnedBy(player),
        Filter::Card(self_card.id).negate(),
    ]);

    if for_deployment {
        base
    } else {
        base.and(Filter::Aboard(self_card.id).or(Filter::AtSameLocationAs(self_card.id)))
    }
}

/// Whether a transport has room for one more pilot-class card.
#[must_use]
pub fn has_capacity_for_pilot(game: &GameState, transport: EntityId) -> bool {
    let Some(blueprint) = game.blueprint_of(transport) else {
        return false;
    };
    let class = pilot_class(blueprint);
    let aboard = game
        .cards_aboard(transport)
        .filter(|c| game.blueprint(c.blueprint).is_some_and(|bp| bp.has_any(class)))
        .count();
    aboard < usize::from(blueprint.pilot_capacity())
}

/// Whether the blueprint is a shuttle vehicle.
#[must_use]
pub fn is_shuttle(blueprint: &CardBlueprint) -> bool {
    blueprint.subtype() == Some(CardSubtype::Shuttle)
}

/// Movement modes a card of this blueprint can use.
#[must_use]
pub fn movement_modes(blueprint: &CardBlueprint) -> MovementModes {
    let mut modes = MovementModes::empty();

    if blueprint.stats().landspeed.is_some() {
        modes |= MovementModes::LANDSPEED;
    }

    match blueprint.category() {
        CardCategory::Starship => {
            modes |= MovementModes::HYPERSPEED | MovementModes::SECTOR_MOVEMENT;
            if blueprint.subtype() == Some(CardSubtype::Starfighter) {
                modes |= MovementModes::TAKE_OFF | MovementModes::LANDING;
            }
        }
        CardCategory::Vehicle => {
            if is_shuttle(blueprint) {
                modes |= MovementModes::TAKE_OFF | MovementModes::LANDING;
            }
            modes |= MovementModes::DOCKING_BAY_TRANSIT;
        }
        CardCategory::Character => {
            modes |= MovementModes::SHUTTLE | MovementModes::DOCKING_BAY_TRANSIT;
        }
        _ => {}
    }

    modes
}

/// Whether a card of this blueprint can move using the mode.
#[must_use]
pub fn can_move_using(blueprint: &CardBlueprint, mode: MovementMode) -> bool {
    movement_modes(blueprint).contains(mode.flag())
}
