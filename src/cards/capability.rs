//! Capability flags.
//!
//! Orthogonal rules properties a card carries instead of a class per card
//! family. Filters and rules functions test these flags directly.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// What a card is able to do or be.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Capabilities: u8 {
        /// Can pilot starships and vehicles.
        const PILOT = 1 << 0;
        /// Can drive vehicles (counts toward a vehicle's pilot capacity).
        const DRIVER = 1 << 1;
        const WARRIOR = 1 << 2;
        const ASTROMECH = 1 << 3;
        const NAVIGATOR = 1 << 4;
    }
}

bitflags! {
    /// Movement modes available to a card.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MovementModes: u8 {
        const LANDSPEED = 1 << 0;
        const HYPERSPEED = 1 << 1;
        const SECTOR_MOVEMENT = 1 << 2;
        const TAKE_OFF = 1 << 3;
        const LANDING = 1 << 4;
        const SHUTTLE = 1 << 5;
        const DOCKING_BAY_TRANSIT = 1 << 6;
    }
}
