//! Error taxonomy.
//!
//! - [`ContentError`]: a card definition is invalid. Raised while loading
//!   content, fatal to that card only.
//! - [`ProtocolError`]: the effect/result protocol was driven incorrectly
//!   (stale handle, committing a cancelled effect, unknown card). These are
//!   engine bugs; the state machine keeps them from corrupting an effect.
//! - [`ListenerError`]: a listener failed while handling a result. The
//!   dispatcher logs it and moves on to the next listener.
//!
//! None of these are ever rendered as game text.

use crate::cards::{BlueprintId, CardCategory, CardSubtype};
use crate::core::EntityId;
use crate::effects::{EffectHandle, EffectStatus};

/// Invalid card definition, detected at content-load time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ContentError {
    /// Blueprint was given an empty title.
    #[error("blueprint has an empty title")]
    EmptyTitle,

    /// A stat is negative, NaN or infinite.
    #[error("'{title}': {stat} must be a finite, non-negative number (got {value})")]
    InvalidStat {
        title: String,
        stat: &'static str,
        value: f32,
    },

    /// Pilot or passenger capacity below zero.
    #[error("'{title}': {kind} capacity cannot be negative (got {capacity})")]
    NegativeCapacity {
        title: String,
        kind: &'static str,
        capacity: i32,
    },

    /// Capacity declared on a card that cannot carry anything.
    #[error("'{title}': a {category:?} cannot declare a {kind} capacity")]
    CapacityNotAllowed {
        title: String,
        kind: &'static str,
        category: CardCategory,
    },

    /// Subtype does not belong to the card's category.
    #[error("'{title}': subtype {subtype:?} is not valid for a {category:?}")]
    SubtypeMismatch {
        title: String,
        subtype: CardSubtype,
        category: CardCategory,
    },

    /// Two blueprints share an ID.
    #[error("blueprint {0} is already registered")]
    DuplicateBlueprint(BlueprintId),
}

/// Misuse of the effect/result protocol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// Handle belongs to a resolution pass that has already ended.
    #[error("effect handle {0} is from a finished resolution pass")]
    StaleHandle(EffectHandle),

    /// Handle does not name an effect in the current table.
    #[error("no effect for handle {0}")]
    UnknownEffect(EffectHandle),

    /// Commit attempted on an effect that is no longer pending.
    #[error("effect {handle} is {status:?}, not pending")]
    NotPending {
        handle: EffectHandle,
        status: EffectStatus,
    },

    /// Card is not in the game.
    #[error("unknown card {0}")]
    UnknownCard(EntityId),

    /// Card is not at any location.
    #[error("card {0} is not at any location")]
    NoLocation(EntityId),

    /// Card was expected at a location it is not at.
    #[error("card {card} is not at location {location}")]
    NotAtLocation { card: EntityId, location: EntityId },
}

/// Failure reported by a listener while handling a result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ListenerError {
    pub message: String,
}

impl ListenerError {
    /// Create a listener error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<ProtocolError> for ListenerError {
    fn from(error: ProtocolError) -> Self {
        Self::new(error.to_string())
    }
}
