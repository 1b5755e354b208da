//! Core engine types: entities, players, configuration, errors, game state.
//!
//! These are the building blocks every other module depends on.

pub mod entity;
pub mod player;
pub mod config;
pub mod error;
pub mod state;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, Side, PLAYER_COUNT};
pub use config::{EngineConfig, LinkStyle};
pub use error::{ContentError, ListenerError, ProtocolError};
pub use state::GameState;
