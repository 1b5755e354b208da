//! Property tests for the effect/result protocol and filters.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use proptest::prelude::*;

use swccg_engine::cards::{BlueprintBuilder, BlueprintId, BlueprintLibrary, Capabilities, CardStats, CardSubtype};
use swccg_engine::core::{EntityId, GameState, PlayerId, Side};
use swccg_engine::effects::{EffectResolver, EffectStatus, EffectTable, MoveEffect};
use swccg_engine::filters::Filter;
use swccg_engine::listeners::{FnListener, RegisteredListener, ResponseContext, ResultDispatcher};
use swccg_engine::results::{EffectResult, MovementMode, MovingResult, ResultPhase};

const SITE: BlueprintId = BlueprintId::new(1);
const SPEEDER: BlueprintId = BlueprintId::new(2);
const PILOT: BlueprintId = BlueprintId::new(3);

fn game() -> GameState {
    let mut library = BlueprintLibrary::new();
    library.register(BlueprintBuilder::location(SITE, Side::Light, "Endor: Dense Forest", CardSubtype::Site).build().unwrap()).unwrap();
    library
        .register(
            BlueprintBuilder::vehicle(SPEEDER, Side::Light, "Speeder Bike", CardStats { landspeed: Some(3.0), ..CardStats::default() })
                .pilot_capacity(3)
                .build()
                .unwrap(),
        )
        .unwrap();
    library
        .register(
            BlueprintBuilder::character(PILOT, Side::Light, "Ewok Glider Pilot", CardStats::default())
                .capabilities(Capabilities::PILOT)
                .build()
                .unwrap(),
        )
        .unwrap();
    GameState::new(Arc::new(library))
}

fn mode() -> impl Strategy<Value = MovementMode> {
    prop::sample::select(MovementMode::ALL.to_vec())
}

fn filter() -> impl Strategy<Value = Filter> {
    let leaf = prop_oneof![
        Just(Filter::Always),
        Just(Filter::Never),
        Just(Filter::Unique),
        Just(Filter::Deploying),
        Just(Filter::OwnedByEvaluatingPlayer),
        Just(Filter::pilot()),
        (1u32..8).prop_map(|id| Filter::Card(EntityId(id))),
        (1u32..3).prop_map(|id| Filter::AtLocation(EntityId(id))),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Filter::All),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Filter::Any),
            inner.prop_map(Filter::negate),
        ]
    })
}

proptest! {
    /// Preventing any number of times cancels exactly once.
    #[test]
    fn prop_cancellation_is_idempotent(mode in mode(), attempts in 1usize..6) {
        let mut table = EffectTable::new();
        let handle = table.insert(MoveEffect::new(mode, PlayerId::new(0), EntityId(3), EntityId(1), EntityId(2)));

        let results: Vec<bool> = (0..attempts).map(|_| table.prevent(handle).unwrap()).collect();

        prop_assert!(results[0]);
        prop_assert!(results[1..].iter().all(|r| !r));
        prop_assert_eq!(table.status(handle).unwrap(), EffectStatus::Cancelled);
        prop_assert!(table.commit(handle).is_err());
    }

    /// Each move ends either committed with one after-result, or cancelled
    /// with none.
    #[test]
    fn prop_exactly_one_outcome(mode in mode(), cancel in any::<bool>(), passengers in 0usize..3) {
        let mut state = game();
        let owner = PlayerId::new(1);
        let from = state.deploy(SITE, owner, None);
        let to = state.deploy(SITE, owner, None);
        let speeder = state.deploy(SPEEDER, owner, Some(from));
        for _ in 0..passengers {
            let pilot = state.deploy(PILOT, owner, None);
            state.board(pilot, speeder).unwrap();
        }

        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        let mut dispatcher = ResultDispatcher::default();
        dispatcher.register(RegisteredListener::new(
            "maybe cancel",
            FnListener::new(move |result: &EffectResult, ctx: &mut ResponseContext<'_>| {
                sink.borrow_mut().push(result.phase());
                if cancel {
                    if let Some(handle) = result.preventable_effect() {
                        ctx.prevent(handle)?;
                    }
                }
                Ok(())
            }),
        ));

        let effect = EffectResolver::move_with_aboard(&state, mode, owner, speeder, to).unwrap();
        let outcome = EffectResolver::resolve_move(&mut state, &mut dispatcher, effect).unwrap();

        let phases = phases.borrow();
        if cancel {
            prop_assert_eq!(outcome.status, EffectStatus::Cancelled);
            prop_assert_eq!(&*phases, &[ResultPhase::Before]);
            prop_assert_eq!(state.location_of(speeder), Some(from));
            prop_assert!(outcome.after.is_none());
        } else {
            prop_assert_eq!(outcome.status, EffectStatus::Completed);
            prop_assert_eq!(&*phases, &[ResultPhase::Before, ResultPhase::After]);
            prop_assert_eq!(state.location_of(speeder), Some(to));
            prop_assert_eq!(state.cards_at(to).count(), passengers + 1);
            prop_assert!(outcome.after.is_some());
        }
    }

    /// The primary card is always a member of the whole group, and first.
    #[test]
    fn prop_primary_in_group(primary in 1u32..50, others in prop::collection::vec(1u32..50, 0..8)) {
        let mut table = EffectTable::new();
        let effect = MoveEffect::new(MovementMode::Landspeed, PlayerId::new(0), EntityId(primary), EntityId(100), EntityId(101))
            .with_passengers(others.iter().copied().map(EntityId));
        let handle = table.insert(effect);
        let result = MovingResult::from_effect(handle, table.get(handle).unwrap()).unwrap();

        prop_assert_eq!(result.cards_moving(), &[EntityId(primary)]);
        prop_assert_eq!(result.all_cards_moving()[0], EntityId(primary));
        prop_assert!(result.all_cards_moving().contains(&result.card_moving()));

        let committed = table.commit(handle).unwrap();
        prop_assert_eq!(committed.cards(), result.all_cards_moving());
    }

    /// Before-phase results carry a handle; after-phase results never do.
    #[test]
    fn prop_capability_consistency(mode in mode(), react in any::<bool>()) {
        let mut table = EffectTable::new();
        let mut effect = MoveEffect::new(mode, PlayerId::new(0), EntityId(3), EntityId(1), EntityId(2));
        if react {
            effect = effect.as_react();
        }
        let handle = table.insert(effect);
        let before: EffectResult = MovingResult::from_effect(handle, table.get(handle).unwrap()).unwrap().into();
        let committed = table.commit(handle).unwrap();
        let after: EffectResult = swccg_engine::results::MovedResult::from_committed(&committed).into();

        prop_assert_eq!(before.preventable_effect(), Some(handle));
        prop_assert_eq!(after.preventable_effect(), None);
        prop_assert_eq!(before.mode(), after.mode());
        prop_assert_eq!(before.as_moving().unwrap().is_react(), after.as_moved().unwrap().is_react());
    }

    /// Evaluating a filter twice with the same arguments agrees, and does
    /// not change the game.
    #[test]
    fn prop_filter_purity(filter in filter(), player in 0u8..2, for_deployment in any::<bool>()) {
        let mut state = game();
        let a = state.deploy(SITE, PlayerId::new(0), None);
        let _b = state.deploy(SITE, PlayerId::new(1), None);
        state.deploy(SPEEDER, PlayerId::new(1), Some(a));
        state.deploy(PILOT, PlayerId::new(0), Some(a));
        let snapshot = state.clone();
        let player = PlayerId::new(player);

        for card in state.cards() {
            let first = filter.accepts(player, &state, card, for_deployment);
            let second = filter.accepts(player, &state, card, for_deployment);
            prop_assert_eq!(first, second);
        }
        prop_assert_eq!(
            state.cards().cloned().collect::<Vec<_>>(),
            snapshot.cards().cloned().collect::<Vec<_>>()
        );
    }
}
