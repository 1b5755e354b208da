//! Result type tags.
//!
//! Every result carries a closed [`ResultType`]. The type is the pair
//! (movement mode, phase): each mode contributes one "before" type, emitted
//! while the move can still be prevented, and one "after" type, emitted once
//! it has happened.

use serde::{Deserialize, Serialize};

use crate::cards::MovementModes;

/// How a card moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    Landspeed,
    Hyperspeed,
    SectorMovement,
    TakeOff,
    Landing,
    Shuttle,
    DockingBayTransit,
}

impl MovementMode {
    /// All modes, in declaration order.
    pub const ALL: [MovementMode; 7] = [
        MovementMode::Landspeed,
        MovementMode::Hyperspeed,
        MovementMode::SectorMovement,
        MovementMode::TakeOff,
        MovementMode::Landing,
        MovementMode::Shuttle,
        MovementMode::DockingBayTransit,
    ];

    /// The flag for this mode in a [`MovementModes`] set.
    #[must_use]
    pub const fn flag(self) -> MovementModes {
        match self {
            MovementMode::Landspeed => MovementModes::LANDSPEED,
            MovementMode::Hyperspeed => MovementModes::HYPERSPEED,
            MovementMode::SectorMovement => MovementModes::SECTOR_MOVEMENT,
            MovementMode::TakeOff => MovementModes::TAKE_OFF,
            MovementMode::Landing => MovementModes::LANDING,
            MovementMode::Shuttle => MovementModes::SHUTTLE,
            MovementMode::DockingBayTransit => MovementModes::DOCKING_BAY_TRANSIT,
        }
    }
}

/// Whether a result is emitted before or after the state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultPhase {
    /// About to happen; may still be prevented.
    Before,
    /// Has happened.
    After,
}

/// Closed discriminator for every reportable event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultType {
    MovingUsingLandspeed,
    MovedUsingLandspeed,
    MovingUsingHyperspeed,
    MovedUsingHyperspeed,
    MovingUsingSectorMovement,
    MovedUsingSectorMovement,
    TakingOff,
    TookOff,
    Landing,
    Landed,
    Shuttling,
    Shuttled,
    DockingBayTransiting,
    DockingBayTransited,
}

impl ResultType {
    /// The type for a mode and phase.
    #[must_use]
    pub const fn of(mode: MovementMode, phase: ResultPhase) -> Self {
        use MovementMode as M;
        use ResultPhase::{After, Before};
        match (mode, phase) {
            (M::Landspeed, Before) => Self::MovingUsingLandspeed,
            (M::Landspeed, After) => Self::MovedUsingLandspeed,
            (M::Hyperspeed, Before) => Self::MovingUsingHyperspeed,
            (M::Hyperspeed, After) => Self::MovedUsingHyperspeed,
            (M::SectorMovement, Before) => Self::MovingUsingSectorMovement,
            (M::SectorMovement, After) => Self::MovedUsingSectorMovement,
            (M::TakeOff, Before) => Self::TakingOff,
            (M::TakeOff, After) => Self::TookOff,
            (M::Landing, Before) => Self::Landing,
            (M::Landing, After) => Self::Landed,
            (M::Shuttle, Before) => Self::Shuttling,
            (M::Shuttle, After) => Self::Shuttled,
            (M::DockingBayTransit, Before) => Self::DockingBayTransiting,
            (M::DockingBayTransit, After) => Self::DockingBayTransited,
        }
    }

    /// Movement mode of this type.
    #[must_use]
    pub const fn mode(self) -> MovementMode {
        match self {
            Self::MovingUsingLandspeed | Self::MovedUsingLandspeed => MovementMode::Landspeed,
            Self::MovingUsingHyperspeed | Self::MovedUsingHyperspeed => MovementMode::Hyperspeed,
            Self::MovingUsingSectorMovement | Self::MovedUsingSectorMovement => {
                MovementMode::SectorMovement
            }
            Self::TakingOff | Self::TookOff => MovementMode::TakeOff,
            Self::Landing | Self::Landed => MovementMode::Landing,
            Self::Shuttling | Self::Shuttled => MovementMode::Shuttle,
            Self::DockingBayTransiting | Self::DockingBayTransited => MovementMode::DockingBayTransit,
        }
    }

    /// Phase of this type.
    #[must_use]
    pub const fn phase(self) -> ResultPhase {
        match self {
            Self::MovingUsingLandspeed
            | Self::MovingUsingHyperspeed
            | Self::MovingUsingSectorMovement
            | Self::TakingOff
            | Self::Landing
            | Self::Shuttling
            | Self::DockingBayTransiting => ResultPhase::Before,
            _ => ResultPhase::After,
        }
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
