//! # swccg-engine
//!
//! Rules-engine core for the Star Wars Customizable Card Game: card
//! blueprints, legality filters, and the cancellable two-phase effect/result
//! protocol that drives card movement.
//!
//! ## Design Principles
//!
//! 1. **One Blueprint Record**: Every card family shares `CardBlueprint`.
//!    Differences are data (category, subtype, capability flags), and rules
//!    properties are free functions in `cards::rules`.
//!
//! 2. **Prevent Before, Report After**: A move is first reported while it
//!    can still be prevented, then committed and reported again. A
//!    cancelled move never changes the game.
//!
//! 3. **Handles, Not References**: Results refer to their effect through
//!    an `EffectHandle` that goes stale when its resolution pass ends.
//!
//! 4. **Deterministic Replay**: Cards iterate in entity-ID order and
//!    listeners run in (priority, registration) order.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning of `GameState` via `im`.
//! - **Pure Filters**: Evaluating a `Filter` never mutates the game.
//! - **Structured Logging**: `tracing` events for dispatch, commit/cancel
//!   decisions, listener failures and rejected content.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, sides, configuration, errors, game state
//! - `cards`: Blueprints, capability flags, card instances, library, rules
//! - `filters`: Composable card predicates
//! - `effects`: Move effects, the per-pass effect table, the resolver
//! - `results`: Result types, movement results, text rendering
//! - `listeners`: Listener trait, registry, dispatcher, result log

pub mod core;
pub mod cards;
pub mod filters;
pub mod effects;
pub mod results;
pub mod listeners;

// Re-export commonly used types
pub use crate::core::{
    EntityId, PlayerId, PlayerMap, Side,
    EngineConfig, LinkStyle,
    ContentError, ListenerError, ProtocolError,
    GameState,
};

pub use crate::cards::{
    BlueprintBuilder, BlueprintId, CardBlueprint, CardCategory, CardStats, CardSubtype, Uniqueness,
    Capabilities, MovementModes, PhysicalCard, BlueprintLibrary, LoadReport,
};

pub use crate::filters::{Filter, FilterContext, FilterEvaluator};

pub use crate::effects::{
    CommittedMove, EffectHandle, EffectResolver, EffectStatus, EffectTable, MoveEffect, MoveOutcome,
};

pub use crate::results::{
    EffectResult, MovedResult, MovementMode, MovingResult, ResultPhase, ResultType, TextContext,
};

pub use crate::listeners::{
    DispatchReport, FnListener, Listener, ListenerId, ListenerRegistry, PreventMovement,
    RegisteredListener, ResponseContext, ResultDispatcher, ResultLog, LogEntry,
};
