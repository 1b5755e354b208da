//! Movement results.
//!
//! [`MovingResult`] is the before-phase report: it names the pending effect
//! so a listener can prevent it, and snapshots every card in the move.
//! [`MovedResult`] is the after-phase report. It has no effect handle,
//! since there is nothing left to prevent.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::kind::{MovementMode, ResultPhase, ResultType};
use super::text::TextContext;
use crate::core::{EntityId, PlayerId, ProtocolError};
use crate::effects::{CommittedMove, EffectHandle, MoveEffect, MovingCards};

/// A serialized group must name its primary card.
fn non_empty_group<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MovingCards, D::Error> {
    let cards = MovingCards::deserialize(deserializer)?;
    if cards.is_empty() {
        return Err(<D::Error as de::Error>::invalid_length(0, &"at least one card"));
    }
    Ok(cards)
}

/// A card is about to move. Emitted while the move can still be prevented.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingResult {
    mode: MovementMode,
    acting_player: PlayerId,
    /// Every card in the move. The primary card is always first.
    #[serde(deserialize_with = "non_empty_group")]
    all_cards_moving: MovingCards,
    moving_from: EntityId,
    moving_to: EntityId,
    react: bool,
    move_away: bool,
    effect: EffectHandle,
}

impl MovingResult {
    /// Report the single-card move `card` from `from` to `to`.
    #[must_use]
    pub fn new(
        mode: MovementMode,
        acting_player: PlayerId,
        card: EntityId,
        from: EntityId,
        to: EntityId,
        effect: EffectHandle,
    ) -> Self {
        let mut all_cards_moving = MovingCards::new();
        all_cards_moving.push(card);
        Self {
            mode,
            acting_player,
            all_cards_moving,
            moving_from: from,
            moving_to: to,
            react: false,
            move_away: false,
            effect,
        }
    }

    /// Snapshot a pending effect.
    ///
    /// Fails with `NotPending` if the effect was already cancelled or
    /// committed.
    pub fn from_effect(handle: EffectHandle, effect: &MoveEffect) -> Result<Self, ProtocolError> {
        let cards = match effect.cards_moving() {
            Some(cards) if effect.is_pending() => cards,
            _ => {
                return Err(ProtocolError::NotPending {
                    handle,
                    status: effect.status(),
                })
            }
        };
        Ok(Self {
            mode: effect.mode(),
            acting_player: effect.acting_player(),
            all_cards_moving: MovingCards::from_slice(cards),
            moving_from: effect.moving_from(),
            moving_to: effect.moving_to(),
            react: effect.is_react(),
            move_away: effect.is_move_away(),
            effect: handle,
        })
    }

    /// Movement is a 'react' (builder pattern).
    #[must_use]
    pub fn as_react(mut self, react: bool) -> Self {
        self.react = react;
        self
    }

    /// Movement is a 'move away' (builder pattern).
    #[must_use]
    pub fn as_move_away(mut self, move_away: bool) -> Self {
        self.move_away = move_away;
        self
    }

    /// Add cards moving with the primary card (builder pattern).
    ///
    /// The primary card stays first; duplicates are dropped.
    #[must_use]
    pub fn with_all_cards(mut self, cards: impl IntoIterator<Item = EntityId>) -> Self {
        for card in cards {
            if !self.all_cards_moving.contains(&card) {
                self.all_cards_moving.push(card);
            }
        }
        self
    }

    #[must_use]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[must_use]
    pub fn result_type(&self) -> ResultType {
        ResultType::of(self.mode, ResultPhase::Before)
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.acting_player
    }

    /// The primary card being moved.
    #[must_use]
    pub fn card_moving(&self) -> EntityId {
        self.all_cards_moving[0]
    }

    /// Just the primary card.
    #[must_use]
    pub fn cards_moving(&self) -> &[EntityId] {
        &self.all_cards_moving[..1]
    }

    /// The primary card plus everything moving with it.
    #[must_use]
    pub fn all_cards_moving(&self) -> &[EntityId] {
        &self.all_cards_moving
    }

    #[must_use]
    pub fn moving_from(&self) -> EntityId {
        self.moving_from
    }

    #[must_use]
    pub fn moving_to(&self) -> EntityId {
        self.moving_to
    }

    #[must_use]
    pub fn is_react(&self) -> bool {
        self.react
    }

    #[must_use]
    pub fn is_move_away(&self) -> bool {
        self.move_away
    }

    /// Handle a listener passes to `prevent` to stop this move.
    #[must_use]
    pub fn preventable_effect(&self) -> EffectHandle {
        self.effect
    }

    /// Human-readable description, naming the primary card only.
    #[must_use]
    pub fn text(&self, ctx: &TextContext<'_>) -> String {
        describe(
            ctx,
            self.mode,
            ResultPhase::Before,
            &ctx.card_link(self.card_moving()),
            self.moving_from,
            self.moving_to,
            self.react,
            self.move_away,
        )
    }
}

/// A card has moved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedResult {
    mode: MovementMode,
    acting_player: PlayerId,
    /// Cards that moved, primary first.
    #[serde(deserialize_with = "non_empty_group")]
    moved_cards: MovingCards,
    moved_from: EntityId,
    moved_to: EntityId,
    react: bool,
    move_away: bool,
    initial_move: bool,
    move_complete: bool,
}

impl MovedResult {
    /// Report a completed single-card move.
    #[must_use]
    pub fn new(mode: MovementMode, acting_player: PlayerId, card: EntityId, from: EntityId, to: EntityId) -> Self {
        let mut moved_cards = MovingCards::new();
        moved_cards.push(card);
        Self {
            mode,
            acting_player,
            moved_cards,
            moved_from: from,
            moved_to: to,
            react: false,
            move_away: false,
            initial_move: true,
            move_complete: true,
        }
    }

    /// Report a committed move.
    #[must_use]
    pub fn from_committed(committed: &CommittedMove) -> Self {
        Self {
            mode: committed.mode(),
            acting_player: committed.acting_player(),
            moved_cards: MovingCards::from_slice(committed.cards()),
            moved_from: committed.from(),
            moved_to: committed.to(),
            react: committed.is_react(),
            move_away: committed.is_move_away(),
            initial_move: true,
            move_complete: true,
        }
    }

    /// Movement was a 'react' (builder pattern).
    #[must_use]
    pub fn as_react(mut self, react: bool) -> Self {
        self.react = react;
        self
    }

    /// Movement was a 'move away' (builder pattern).
    #[must_use]
    pub fn as_move_away(mut self, move_away: bool) -> Self {
        self.move_away = move_away;
        self
    }

    /// Add cards that moved with the primary card (builder pattern).
    #[must_use]
    pub fn with_moved_cards(mut self, cards: impl IntoIterator<Item = EntityId>) -> Self {
        for card in cards {
            if !self.moved_cards.contains(&card) {
                self.moved_cards.push(card);
            }
        }
        self
    }

    /// Mark a multi-step move's progress (builder pattern).
    ///
    /// Single-step moves are both the initial step and complete.
    #[must_use]
    pub fn with_progress(mut self, initial_move: bool, move_complete: bool) -> Self {
        self.initial_move = initial_move;
        self.move_complete = move_complete;
        self
    }

    #[must_use]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[must_use]
    pub fn result_type(&self) -> ResultType {
        ResultType::of(self.mode, ResultPhase::After)
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.acting_player
    }

    /// The primary card that moved.
    #[must_use]
    pub fn primary_card(&self) -> EntityId {
        self.moved_cards[0]
    }

    #[must_use]
    pub fn moved_cards(&self) -> &[EntityId] {
        &self.moved_cards
    }

    #[must_use]
    pub fn moved_from(&self) -> EntityId {
        self.moved_from
    }

    #[must_use]
    pub fn moved_to(&self) -> EntityId {
        self.moved_to
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
    pub fn is_initial_move(&self) -> bool {
        self.initial_move
    }

    #[must_use]
    pub fn is_move_complete(&self) -> bool {
        self.move_complete
    }

    /// Human-readable description, naming every card that moved.
    #[must_use]
    pub fn text(&self, ctx: &TextContext<'_>) -> String {
        describe(
            ctx,
            self.mode,
            ResultPhase::After,
            &ctx.card_links(&self.moved_cards),
            self.moved_from,
            self.moved_to,
            self.react,
            self.move_away,
        )
    }
}

/// Verb, particle after the cards, and trailing phrase for a mode.
fn wording(mode: MovementMode, phase: ResultPhase) -> (&'static str, &'static str, &'static str) {
    let before = phase == ResultPhase::Before;
    match mode {
        MovementMode::Landspeed => (if before { "Moving" } else { "Moved" }, "", " using landspeed"),
        MovementMode::Hyperspeed => (if before { "Moving" } else { "Moved" }, "", " using hyperspeed"),
        MovementMode::SectorMovement => {
            (if before { "Moving" } else { "Moved" }, "", " using sector movement")
        }
        MovementMode::TakeOff => (if before { "Taking" } else { "Took" }, " off", ""),
        MovementMode::Landing => (if before { "Landing" } else { "Landed" }, "", ""),
        MovementMode::Shuttle => (if before { "Shuttling" } else { "Shuttled" }, "", ""),
        MovementMode::DockingBayTransit => {
            (if before { "Transiting" } else { "Transited" }, "", " via docking bay")
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn describe(
    ctx: &TextContext<'_>,
    mode: MovementMode,
    phase: ResultPhase,
    cards: &str,
    from: EntityId,
    to: EntityId,
    react: bool,
    move_away: bool,
) -> String {
    let (verb, particle, trailer) = wording(mode, phase);
    format!(
        "{verb} {away}{cards}{particle} from {from} to {to}{trailer}{react}",
        away = if move_away { "away " } else { "" },
        from = ctx.card_link(from),
        to = ctx.card_link(to),
        react = if react { " as a 'react'" } else { "" },
    )
}
