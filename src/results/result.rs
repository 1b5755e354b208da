//! The result union handed to listeners.

use serde::{Deserialize, Serialize};

use super::kind::{MovementMode, ResultPhase, ResultType};
use super::movement::{MovedResult, MovingResult};
use super::text::TextContext;
use crate::core::{EntityId, PlayerId};
use crate::effects::EffectHandle;

/// An event listeners may observe and, in the before phase, respond to.
///
/// The variant fixes the phase and the payload fixes the movement mode, so
/// [`EffectResult::result_type`] is always one of the closed
/// [`ResultType`] tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectResult {
    /// A move is about to happen.
    Moving(MovingResult),
    /// A move has happened.
    Moved(MovedResult),
}

impl EffectResult {
    /// A card is about to move using landspeed.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn moving_using_landspeed(
        card: EntityId,
        player: PlayerId,
        from: EntityId,
        to: EntityId,
        react: bool,
        move_away: bool,
        effect: EffectHandle,
        all_cards_moving: impl IntoIterator<Item = EntityId>,
    ) -> Self {
        Self::Moving(
            MovingResult::new(MovementMode::Landspeed, player, card, from, to, effect)
                .as_react(react)
                .as_move_away(move_away)
                .with_all_cards(all_cards_moving),
        )
    }

    /// A card has taken off.
    #[must_use]
    pub fn took_off(card: EntityId, player: PlayerId, from: EntityId, to: EntityId, react: bool) -> Self {
        Self::Moved(MovedResult::new(MovementMode::TakeOff, player, card, from, to).as_react(react))
    }

    #[must_use]
    pub fn result_type(&self) -> ResultType {
        match self {
            Self::Moving(r) => r.result_type(),
            Self::Moved(r) => r.result_type(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> ResultPhase {
        match self {
            Self::Moving(_) => ResultPhase::Before,
            Self::Moved(_) => ResultPhase::After,
        }
    }

    #[must_use]
    pub fn mode(&self) -> MovementMode {
        match self {
            Self::Moving(r) => r.mode(),
            Self::Moved(r) => r.mode(),
        }
    }

    /// Player performing the action that produced this result.
    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        match self {
            Self::Moving(r) => r.acting_player(),
            Self::Moved(r) => r.acting_player(),
        }
    }

    /// The primary card.
    #[must_use]
    pub fn primary_card(&self) -> EntityId {
        match self {
            Self::Moving(r) => r.card_moving(),
            Self::Moved(r) => r.primary_card(),
        }
    }

    /// Effect a listener can prevent. Only before-phase results have one.
    #[must_use]
    pub fn preventable_effect(&self) -> Option<EffectHandle> {
        match self {
            Self::Moving(r) => Some(r.preventable_effect()),
            Self::Moved(_) => None,
        }
    }

    #[must_use]
    pub fn as_moving(&self) -> Option<&MovingResult> {
        match self {
            Self::Moving(r) => Some(r),
            Self::Moved(_) => None,
        }
    }

    #[must_use]
    pub fn as_moved(&self) -> Option<&MovedResult> {
        match self {
            Self::Moved(r) => Some(r),
            Self::Moving(_) => None,
        }
    }

    /// Human-readable description for the game log.
    #[must_use]
    pub fn text(&self, ctx: &TextContext<'_>) -> String {
        match self {
            Self::Moving(r) => r.text(ctx),
            Self::Moved(r) => r.text(ctx),
        }
    }
}

impl From<MovingResult> for EffectResult {
    fn from(result: MovingResult) -> Self {
        Self::Moving(result)
    }
}

impl From<MovedResult> for EffectResult {
    fn from(result: MovedResult) -> Self {
        Self::Moved(result)
    }
}
