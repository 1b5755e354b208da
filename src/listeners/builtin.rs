//! Built-in listeners.

use super::dispatcher::ResponseContext;
use super::registry::Listener;
use crate::core::{EntityId, ListenerError, PlayerId};
use crate::filters::Filter;
use crate::results::{EffectResult, MovementMode};

/// Adapts a closure into a [`Listener`].
///
/// ```
/// use swccg_engine::core::ListenerError;
/// use swccg_engine::listeners::{FnListener, RegisteredListener, ResponseContext};
/// use swccg_engine::results::{EffectResult, ResultType};
///
/// let listener = RegisteredListener::new(
///     "watch take-offs",
///     FnListener::new(|_: &EffectResult, _: &mut ResponseContext<'_>| Ok::<(), ListenerError>(())),
/// )
/// .on(ResultType::TookOff);
/// assert!(listener.wants(ResultType::TookOff));
/// ```
pub struct FnListener<F> {
    f: F,
}

impl<F> FnListener<F>
where
    F: Fn(&EffectResult, &mut ResponseContext<'_>) -> Result<(), ListenerError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Listener for FnListener<F>
where
    F: Fn(&EffectResult, &mut ResponseContext<'_>) -> Result<(), ListenerError>,
{
    fn on_result(&self, result: &EffectResult, ctx: &mut ResponseContext<'_>) -> Result<(), ListenerError> {
        (self.f)(result, ctx)
    }
}

/// Prevents movement of matching cards.
///
/// Acts on before-phase results only. The primary moving card is tested
/// against `filter`, evaluated for `controller`. An optional origin and
/// mode narrow which moves are stopped, e.g. "cards may not move away from
/// this site using landspeed".
#[derive(Clone, Debug)]
pub struct PreventMovement {
    pub controller: PlayerId,
    pub filter: Filter,
    pub from: Option<EntityId>,
    pub mode: Option<MovementMode>,
}

impl PreventMovement {
    /// Prevent any movement of cards matching `filter`.
    #[must_use]
    pub fn new(controller: PlayerId, filter: Filter) -> Self {
        Self {
            controller,
            filter,
            from: None,
            mode: None,
        }
    }

    /// Only moves out of `location` (builder pattern).
    #[must_use]
    pub fn from_location(mut self, location: EntityId) -> Self {
        self.from = Some(location);
        self
    }

    /// Only moves using `mode` (builder pattern).
    #[must_use]
    pub fn using(mut self, mode: MovementMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl Listener for PreventMovement {
    fn on_result(&self, result: &EffectResult, ctx: &mut ResponseContext<'_>) -> Result<(), ListenerError> {
        let Some(moving) = result.as_moving() else {
            return Ok(());
        };
        if self.mode.is_some_and(|mode| mode != moving.mode())
            || self.from.is_some_and(|from| from != moving.moving_from())
        {
            return Ok(());
        }

        let game = ctx.game();
        let card = game.try_card(moving.card_moving())?;
        if self.filter.accepts(self.controller, game, card, false) {
            ctx.prevent(moving.preventable_effect())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{BlueprintBuilder, BlueprintId, BlueprintLibrary, CardCategory, CardStats, CardSubtype};
    use crate::core::{GameState, Side};
    use crate::effects::{EffectTable, MoveEffect};
    use crate::results::MovingResult;

    struct Fixture {
        state: GameState,
        site_a: EntityId,
        site_b: EntityId,
        trooper: EntityId,
        walker: EntityId,
    }

    fn fixture() -> Fixture {
        let mut library = BlueprintLibrary::new();
        library.register(BlueprintBuilder::location(BlueprintId::new(1), Side::Dark, "Hoth: North Ridge", CardSubtype::Site).build().unwrap()).unwrap();
        library.register(BlueprintBuilder::character(BlueprintId::new(2), Side::Dark, "Snowtrooper", CardStats::default()).build().unwrap()).unwrap();
        library.register(
            BlueprintBuilder::vehicle(BlueprintId::new(3), Side::Dark, "Blizzard 4", CardStats { landspeed: Some(1.0), ..CardStats::default() })
                .build()
                .unwrap(),
        ).unwrap();

        let mut state = GameState::new(Arc::new(library));
        let site_a = state.deploy(BlueprintId::new(1), PlayerId::new(0), None);
        let site_b = state.deploy(BlueprintId::new(1), PlayerId::new(0), None);
        let trooper = state.deploy(BlueprintId::new(2), PlayerId::new(0), Some(site_a));
        let walker = state.deploy(BlueprintId::new(3), PlayerId::new(0), Some(site_a));
        Fixture { state, site_a, site_b, trooper, walker }
    }

    fn propose(table: &mut EffectTable, mode: MovementMode, card: EntityId, from: EntityId, to: EntityId) -> EffectResult {
        let handle = table.insert(MoveEffect::new(mode, PlayerId::new(0), card, from, to));
        MovingResult::from_effect(handle, table.get(handle).unwrap()).unwrap().into()
    }

    #[test]
    fn test_prevents_matching_card() {
        let f = fixture();
        let mut table = EffectTable::new();
        let listener = PreventMovement::new(PlayerId::new(1), Filter::Category(CardCategory::Vehicle));

        let walker_move = propose(&mut table, MovementMode::Landspeed, f.walker, f.site_a, f.site_b);
        let trooper_move = propose(&mut table, MovementMode::Landspeed, f.trooper, f.site_a, f.site_b);

        let mut ctx = ResponseContext::new(&f.state, &mut table);
        listener.on_result(&walker_move, &mut ctx).unwrap();
        listener.on_result(&trooper_move, &mut ctx).unwrap();

        assert!(!ctx.is_pending(walker_move.preventable_effect().unwrap()));
        assert!(ctx.is_pending(trooper_move.preventable_effect().unwrap()));
    }

    #[test]
    fn test_origin_and_mode_narrowing() {
        let f = fixture();
        let mut table = EffectTable::new();
        let listener = PreventMovement::new(PlayerId::new(1), Filter::Always)
            .from_location(f.site_b)
            .using(MovementMode::Landspeed);

        let wrong_origin = propose(&mut table, MovementMode::Landspeed, f.walker, f.site_a, f.site_b);
        let wrong_mode = propose(&mut table, MovementMode::Shuttle, f.trooper, f.site_b, f.site_a);
        let matching = propose(&mut table, MovementMode::Landspeed, f.trooper, f.site_b, f.site_a);

        let mut ctx = ResponseContext::new(&f.state, &mut table);
        for result in [&wrong_origin, &wrong_mode, &matching] {
            listener.on_result(result, &mut ctx).unwrap();
        }

        assert!(ctx.is_pending(wrong_origin.preventable_effect().unwrap()));
        assert!(ctx.is_pending(wrong_mode.preventable_effect().unwrap()));
        assert!(!ctx.is_pending(matching.preventable_effect().unwrap()));
        assert!(ctx.prevented());
    }

    #[test]
    fn test_ignores_after_phase() {
        let f = fixture();
        let mut table = EffectTable::new();
        let listener = PreventMovement::new(PlayerId::new(1), Filter::Always);
        let result = EffectResult::took_off(f.walker, PlayerId::new(0), f.site_a, f.site_b, false);

        let mut ctx = ResponseContext::new(&f.state, &mut table);
        assert!(listener.on_result(&result, &mut ctx).is_ok());
        assert!(!ctx.prevented());
    }

    #[test]
    fn test_unknown_card_is_an_error() {
        let f = fixture();
        let mut table = EffectTable::new();
        let listener = PreventMovement::new(PlayerId::new(1), Filter::Always);
        let result = propose(&mut table, MovementMode::Landspeed, EntityId(99), f.site_a, f.site_b);

        let mut ctx = ResponseContext::new(&f.state, &mut table);
        let err = listener.on_result(&result, &mut ctx).unwrap_err();
        assert_eq!(err.message, "unknown card Entity(99)");
    }
}
