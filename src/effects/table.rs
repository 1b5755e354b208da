//! Per-pass effect table.
//!
//! Results never hold a reference to the effect they report; they hold an
//! [`EffectHandle`] into the `EffectTable` owned by the dispatcher for the
//! duration of one resolution pass. Ending the pass clears the table and
//! bumps its pass number, so a handle kept past its pass is rejected
//! instead of silently naming a different effect.

use serde::{Deserialize, Serialize};

use super::effect::{EffectStatus, MoveEffect, MovingCards};
use crate::core::{EntityId, PlayerId, ProtocolError};
use crate::results::MovementMode;

/// Handle to an effect in the current resolution pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHandle {
    pass: u32,
    index: u32,
}

impl EffectHandle {
    /// Resolution pass this handle belongs to.
    #[must_use]
    pub const fn pass(self) -> u32 {
        self.pass
    }

    /// Slot within the pass.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({}.{})", self.pass, self.index)
    }
}

/// Snapshot of a move at the moment it was committed.
///
/// Only [`EffectTable::commit`] creates one, and only for a pending effect,
/// so an after-phase result built from it always describes a move that
/// really happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommittedMove {
    handle: EffectHandle,
    mode: MovementMode,
    acting_player: PlayerId,
    cards: MovingCards,
    from: EntityId,
    to: EntityId,
    react: bool,
    move_away: bool,
}

impl CommittedMove {
    #[must_use]
    pub fn handle(&self) -> EffectHandle {
        self.handle
    }

    #[must_use]
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    #[must_use]
    pub fn acting_player(&self) -> PlayerId {
        self.acting_player
    }

    /// Cards that moved, primary first.
    #[must_use]
    pub fn cards(&self) -> &[EntityId] {
        &self.cards
    }

    #[must_use]
    pub fn from(&self) -> EntityId {
        self.from
    }

    #[must_use]
    pub fn to(&self) -> EntityId {
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
}

/// Effects proposed during one resolution pass.
#[derive(Clone, Debug, Default)]
pub struct EffectTable {
    pass: u32,
    effects: Vec<MoveEffect>,
}

impl EffectTable {
    /// Create an empty table at pass 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pass number.
    #[must_use]
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Number of effects in the current pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Add an effect to the current pass.
    pub fn insert(&mut self, effect: MoveEffect) -> EffectHandle {
        let handle = EffectHandle {
            pass: self.pass,
            index: self.effects.len() as u32,
        };
        self.effects.push(effect);
        handle
    }

    /// Look up an effect.
    pub fn get(&self, handle: EffectHandle) -> Result<&MoveEffect, ProtocolError> {
        self.check(handle)?;
        self.effects
            .get(handle.index as usize)
            .ok_or(ProtocolError::UnknownEffect(handle))
    }

    /// Current status of an effect.
    pub fn status(&self, handle: EffectHandle) -> Result<EffectStatus, ProtocolError> {
        self.get(handle).map(MoveEffect::status)
    }

    /// Prevent an effect. `Ok(true)` only when this call cancelled it.
    ///
    /// A handle from an ended pass names an effect that already resolved,
    /// so preventing it is a no-op.
    pub fn prevent(&mut self, handle: EffectHandle) -> Result<bool, ProtocolError> {
        if handle.pass < self.pass {
            return Ok(false);
        }
        Ok(self.get_mut(handle)?.prevent())
    }

    /// Return a cancelled effect to pending.
    pub(crate) fn reinstate(&mut self, handle: EffectHandle) -> Result<bool, ProtocolError> {
        Ok(self.get_mut(handle)?.reinstate())
    }

    /// Commit a pending effect and snapshot it.
    ///
    /// Fails with `NotPending` if the effect was cancelled or already
    /// committed.
    pub fn commit(&mut self, handle: EffectHandle) -> Result<CommittedMove, ProtocolError> {
        let effect = self.get_mut(handle)?;
        if !effect.complete() {
            return Err(ProtocolError::NotPending {
                handle,
                status: effect.status(),
            });
        }
        Ok(CommittedMove {
            handle,
            mode: effect.mode(),
            acting_player: effect.acting_player(),
            cards: effect.cards_moving().map(MovingCards::from_slice).unwrap_or_default(),
            from: effect.moving_from(),
            to: effect.moving_to(),
            react: effect.is_react(),
            move_away: effect.is_move_away(),
        })
    }

    /// End the current pass: drop every effect and invalidate old handles.
    pub fn end_pass(&mut self) {
        self.effects.clear();
        self.pass = self.pass.wrapping_add(1);
    }

    fn get_mut(&mut self, handle: EffectHandle) -> Result<&mut MoveEffect, ProtocolError> {
        self.check(handle)?;
        self.effects
            .get_mut(handle.index as usize)
            .ok_or(ProtocolError::UnknownEffect(handle))
    }

    fn check(&self, handle: EffectHandle) -> Result<(), ProtocolError> {
        if handle.pass != self.pass {
            return Err(ProtocolError::StaleHandle(handle));
        }
        Ok(())
    }
}
