//! Effect resolution: one two-phase pass per move.
//!
//! ```text
//! validate -> begin -> dispatch Before -> Pending?  -> commit, relocate, dispatch After
//!                                      -> Cancelled -> nothing moves
//!                                                   -> end pass
//! ```
//!
//! The game is only borrowed immutably while listeners run. Cards move
//! after the before-phase dispatch returns and before the after-phase
//! dispatch starts, so after-phase listeners see the new positions.

use tracing::info;

use super::effect::{EffectStatus, MoveEffect};
use super::table::EffectHandle;
use crate::core::{EntityId, GameState, PlayerId, ProtocolError};
use crate::listeners::{DispatchReport, ResultDispatcher};
use crate::results::{EffectResult, MovedResult, MovementMode, MovingResult, ResultType};

/// What happened to a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Handle the effect had during its pass. Stale once this is returned.
    pub handle: EffectHandle,
    /// `Completed` or `Cancelled`.
    pub status: EffectStatus,
    pub before: ResultType,
    /// Set only when the move completed.
    pub after: Option<ResultType>,
    pub before_report: DispatchReport,
    pub after_report: Option<DispatchReport>,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == EffectStatus::Completed
    }
}

/// Drives move effects through the result protocol.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve one move.
    ///
    /// Every card in the effect must be at its origin. Listeners get one
    /// chance to prevent the move; if none does, every card in the group
    /// is relocated and an after-phase result is dispatched. The effect
    /// table is cleared before returning, even on error.
    pub fn resolve_move(
        state: &mut GameState,
        dispatcher: &mut ResultDispatcher,
        effect: MoveEffect,
    ) -> Result<MoveOutcome, ProtocolError> {
        Self::validate(state, &effect)?;
        let handle = dispatcher.begin(effect);
        let outcome = Self::run_pass(state, dispatcher, handle);
        dispatcher.end_pass();
        outcome
    }

    /// Build a move of `card` from where it is now, carrying everything
    /// aboard it (and aboard those, recursively).
    pub fn move_with_aboard(
        state: &GameState,
        mode: MovementMode,
        player: PlayerId,
        card: EntityId,
        to: EntityId,
    ) -> Result<MoveEffect, ProtocolError> {
        let from = state
            .try_card(card)?
            .location
            .ok_or(ProtocolError::NoLocation(card))?;

        let mut group = vec![card];
        let mut next = 0;
        while next < group.len() {
            let aboard: Vec<EntityId> = state
                .cards_aboard(group[next])
                .map(|c| c.id)
                .filter(|id| !group.contains(id))
                .collect();
            group.extend(aboard);
            next += 1;
        }

        Ok(MoveEffect::new(mode, player, card, from, to).with_passengers(group.into_iter().skip(1)))
    }

    fn validate(state: &GameState, effect: &MoveEffect) -> Result<(), ProtocolError> {
        let from = effect.moving_from();
        for &card in effect.cards_moving().unwrap_or_default() {
            if !state.try_card(card)?.is_at(from) {
                return Err(ProtocolError::NotAtLocation { card, location: from });
            }
        }
        Ok(())
    }

    fn run_pass(
        state: &mut GameState,
        dispatcher: &mut ResultDispatcher,
        handle: EffectHandle,
    ) -> Result<MoveOutcome, ProtocolError> {
        let before = EffectResult::from(MovingResult::from_effect(handle, dispatcher.effects().get(handle)?)?);
        let before_report = dispatcher.dispatch(&before, state);

        let status = dispatcher.effects().status(handle)?;
        if status != EffectStatus::Pending {
            info!(
                %handle,
                result_type = ?before.result_type(),
                cancelled_by = ?before_report.cancelled_by,
                "move prevented"
            );
            return Ok(MoveOutcome {
                handle,
                status,
                before: before.result_type(),
                after: None,
                before_report,
                after_report: None,
            });
        }

        let committed = dispatcher.effects_mut().commit(handle)?;
        for &card in committed.cards() {
            // A card leaving without its transport is no longer aboard it.
            if let Some(transport) = state.try_card(card)?.aboard {
                if !committed.cards().contains(&transport) {
                    state.disembark(card)?;
                }
            }
            state.relocate(card, committed.to())?;
        }
        let left_behind: Vec<EntityId> = committed
            .cards()
            .iter()
            .flat_map(|&transport| state.cards_aboard(transport).map(|c| c.id))
            .filter(|id| !committed.cards().contains(id))
            .collect();
        for card in left_behind {
            state.disembark(card)?;
        }
        info!(
            %handle,
            mode = ?committed.mode(),
            from = %committed.from(),
            to = %committed.to(),
            cards = committed.cards().len(),
            "move committed"
        );

        let after = EffectResult::from(MovedResult::from_committed(&committed));
        let after_report = dispatcher.dispatch(&after, state);

        Ok(MoveOutcome {
            handle,
            status: EffectStatus::Completed,
            before: before.result_type(),
            after: Some(after.result_type()),
            before_report,
            after_report: Some(after_report),
        })
    }
}
