//! In-flight move effects.
//!
//! A `MoveEffect` is the engine's attempt to move a card (and whatever
//! moves with it) from one location to another. It has three states:
//!
//! ```text
//! PENDING --prevent()--> CANCELLED
//!    |
//!    +-----complete()--> COMPLETED
//! ```
//!
//! Both exits are terminal. `prevent()` is idempotent and never fails, so
//! any number of listeners may try to cancel the same effect in one pass.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};
use crate::results::MovementMode;

/// Cards that move together. The primary card is always first.
pub type MovingCards = SmallVec<[EntityId; 4]>;

/// Lifecycle state of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectStatus {
    /// Proposed; listeners may still prevent it.
    Pending,
    /// Prevented. Must not change game state.
    Cancelled,
    /// Committed to the game state.
    Completed,
}

/// A proposed movement of one card, plus any cards moving with it.
///
/// ## Example
///
/// ```
/// use swccg_engine::core::{EntityId, PlayerId};
/// use swccg_engine::effects::{EffectStatus, MoveEffect};
/// use swccg_engine::results::MovementMode;
///
/// let mut effect = MoveEffect::new(MovementMode::Landspeed, PlayerId::new(0), EntityId(10), EntityId(1), EntityId(2))
///     .with_passengers([EntityId(11)]);
///
/// assert_eq!(effect.cards_moving(), Some(&[EntityId(10), EntityId(11)][..]));
///
/// assert!(effect.prevent());
/// assert!(!effect.prevent());
/// assert_eq!(effect.status(), EffectStatus::Cancelled);
/// assert_eq!(effect.cards_moving(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEffect {
    mode: MovementMode,
    acting_player: PlayerId,
    cards: MovingCards,
    from: EntityId,
    to: EntityId,
    react: bool,
    move_away: bool,
    status: EffectStatus,
}

impl MoveEffect {
    /// Propose moving `card` from `from` to `to`.
    #[must_use]
    pub fn new(mode: MovementMode, acting_player: PlayerId, card: EntityId, from: EntityId, to: EntityId) -> Self {
        let mut cards = MovingCards::new();
        cards.push(card);
        Self {
            mode,
            acting_player,
            cards,
            from,
            to,
            react: false,
            move_away: false,
            status: EffectStatus::Pending,
        }
    }

    /// Movement is a 'react' (builder pattern).
    #[must_use]
    pub fn as_react(mut self) -> Self {
        self.react = true;
        self
    }

    /// Movement is a 'move away' (builder pattern).
    #[must_use]
    pub fn as_move_away(mut self) -> Self {
        self.move_away = true;
        self
    }

    /// Add cards that move along with the primary card (builder pattern).
    ///
    /// Duplicates and the primary card itself are ignored.
    #[must_use]
    pub fn with_passengers(mut self, passengers: impl IntoIterator<Item = EntityId>) -> Self {
        for card in passengers {
            if !self.cards.contains(&card) {
                self.cards.push(card);
            }
        }
        self
    }

    #[must_use]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.acting_player
    }

    /// The primary card being moved.
    #[must_use]
    pub fn card_moving(&self) -> EntityId {
        self.cards[0]
    }

    /// Every card in the move, primary first.
    ///
    /// `None` once the effect is cancelled: a cancelled move has no
    /// meaningful group.
    #[must_use]
    pub fn cards_moving(&self) -> Option<&[EntityId]> {
        match self.status {
            EffectStatus::Cancelled => None,
            EffectStatus::Pending | EffectStatus::Completed => Some(&self.cards),
        }
    }

    #[must_use]
    pub fn moving_from(&self) -> EntityId {
        self.from
    }

    #[must_use]
    pub fn moving_to(&self) -> EntityId {
        self.to
    }

    #[must_use]
    pub fn is_react(&self) -> bool {
        self.react
    }

    #[must_use]
    pub fn is_move_away(&self) -> bool {
        self.move_away
    }

    #[must_use]
    pub fn status(&self) -> EffectStatus {
        self.status
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == EffectStatus::Pending
    }

    /// Prevent the move.
    ///
    /// Returns `true` if this call cancelled the effect, `false` if it was
    /// already cancelled or completed.
    pub fn prevent(&mut self) -> bool {
        if self.status == EffectStatus::Pending {
            self.status = EffectStatus::Cancelled;
            true
        } else {
            false
        }
    }

    /// Undo a prevent. Only a cancelled effect can be reinstated.
    pub(crate) fn reinstate(&mut self) -> bool {
        if self.status == EffectStatus::Cancelled {
            self.status = EffectStatus::Pending;
            true
        } else {
            false
        }
    }

    /// Mark the move as committed. Only a pending effect can complete.
    pub(crate) fn complete(&mut self) -> bool {
        if self.status == EffectStatus::Pending {
            self.status = EffectStatus::Completed;
            true
        } else {
            false
        }
    }
}
