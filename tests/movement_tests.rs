//! Movement resolution integration tests.
//!
//! These tests drive whole moves through `EffectResolver` and check what
//! listeners observe in each phase, and where the cards end up.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use swccg_engine::cards::{BlueprintBuilder, BlueprintId, BlueprintLibrary, Capabilities, CardStats, CardSubtype};
use swccg_engine::core::{EngineConfig, EntityId, GameState, LinkStyle, ListenerError, PlayerId, ProtocolError, Side};
use swccg_engine::effects::{EffectHandle, EffectResolver, EffectStatus, MoveEffect};
use swccg_engine::listeners::{FnListener, RegisteredListener, ResponseContext, ResultDispatcher};
use swccg_engine::results::{EffectResult, MovementMode, ResultPhase, ResultType};

const SITE: BlueprintId = BlueprintId::new(1);
const SPEEDER: BlueprintId = BlueprintId::new(2);
const PILOT: BlueprintId = BlueprintId::new(3);
const FIGHTER: BlueprintId = BlueprintId::new(4);
const SYSTEM: BlueprintId = BlueprintId::new(5);
const BUNKER: BlueprintId = BlueprintId::new(6);

const LIGHT: PlayerId = PlayerId::new(1);

struct Table {
    state: GameState,
    site_a: EntityId,
    site_b: EntityId,
    speeder: EntityId,
    pilot: EntityId,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn library() -> BlueprintLibrary {
    let mut library = BlueprintLibrary::new();
    let report = library.load([
        BlueprintBuilder::location(SITE, Side::Light, "Endor: Forest Clearing", CardSubtype::Site).build(),
        BlueprintBuilder::vehicle(SPEEDER, Side::Light, "Speeder Bike", CardStats { landspeed: Some(3.0), ..CardStats::default() })
            .pilot_capacity(1)
            .build(),
        BlueprintBuilder::character(PILOT, Side::Light, "Wedge Antilles", CardStats::default())
            .unique()
            .capabilities(Capabilities::PILOT)
            .build(),
        BlueprintBuilder::starship(FIGHTER, Side::Light, "Red 2", CardStats::default())
            .subtype(CardSubtype::Starfighter)
            .pilot_capacity(1)
            .build(),
        BlueprintBuilder::location(SYSTEM, Side::Light, "Endor", CardSubtype::System).build(),
        BlueprintBuilder::location(BUNKER, Side::Dark, "Endor: Bunker", CardSubtype::Site).build(),
    ]);
    assert!(report.is_clean());
    library
}

fn table() -> Table {
    init_tracing();
    let mut state = GameState::new(Arc::new(library()));
    let site_a = state.deploy(SITE, LIGHT, None);
    let site_b = state.deploy(BUNKER, LIGHT, None);
    let speeder = state.deploy(SPEEDER, LIGHT, Some(site_a));
    let pilot = state.deploy(PILOT, LIGHT, None);
    state.board(pilot, speeder).unwrap();
    Table { state, site_a, site_b, speeder, pilot }
}

/// Register a listener that records every result it sees.
fn record_all(dispatcher: &mut ResultDispatcher) -> Rc<RefCell<Vec<EffectResult>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    dispatcher.register(RegisteredListener::new(
        "recorder",
        FnListener::new(move |result: &EffectResult, _: &mut ResponseContext<'_>| {
            sink.borrow_mut().push(result.clone());
            Ok(())
        }),
    ));
    seen
}

/// Register a listener that prevents every landspeed move.
fn cancel_landspeed(dispatcher: &mut ResultDispatcher) {
    dispatcher.register(
        RegisteredListener::new(
            "no landspeed",
            FnListener::new(|result: &EffectResult, ctx: &mut ResponseContext<'_>| {
                if let Some(handle) = result.preventable_effect() {
                    ctx.prevent(handle)?;
                }
                Ok(())
            }),
        )
        .on(ResultType::MovingUsingLandspeed),
    );
}

#[test]
fn test_cancelled_landspeed_move_stays_put() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();
    let seen = record_all(&mut dispatcher);
    cancel_landspeed(&mut dispatcher);

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b);
    let outcome = EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    assert_eq!(outcome.status, EffectStatus::Cancelled);
    assert_eq!(t.state.location_of(t.speeder), Some(t.site_a));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1, "no after-phase result for a cancelled move");
    assert_eq!(seen[0].result_type(), ResultType::MovingUsingLandspeed);
    assert!(!seen[0].as_moving().unwrap().is_react());
}

#[test]
fn test_uncancelled_landspeed_move_commits() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();
    let seen = record_all(&mut dispatcher);

    let effect = EffectResolver::move_with_aboard(&t.state, MovementMode::Landspeed, LIGHT, t.speeder, t.site_b).unwrap();
    let outcome = EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    assert!(outcome.is_completed());
    assert_eq!(t.state.location_of(t.speeder), Some(t.site_b));
    assert_eq!(t.state.location_of(t.pilot), Some(t.site_b));

    let seen = seen.borrow();
    assert_eq!(
        seen.iter().map(EffectResult::result_type).collect::<Vec<_>>(),
        vec![ResultType::MovingUsingLandspeed, ResultType::MovedUsingLandspeed]
    );

    let before = seen[0].as_moving().unwrap();
    assert_eq!(before.cards_moving(), &[t.speeder]);
    assert_eq!(before.all_cards_moving(), &[t.speeder, t.pilot]);

    let after = seen[1].as_moved().unwrap();
    assert_eq!(after.moved_cards(), &[t.speeder, t.pilot]);
    assert_eq!(after.moved_from(), t.site_a);
    assert_eq!(after.moved_to(), t.site_b);
    assert_eq!(seen[1].preventable_effect(), None);
}

#[test]
fn test_after_phase_listeners_see_new_positions() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();
    let observed = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&observed);
    let speeder = t.speeder;
    dispatcher.register(
        RegisteredListener::new(
            "where is it",
            FnListener::new(move |_: &EffectResult, ctx: &mut ResponseContext<'_>| {
                *sink.borrow_mut() = ctx.game().location_of(speeder);
                Ok(())
            }),
        )
        .on(ResultType::MovedUsingLandspeed),
    );

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b);
    EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    assert_eq!(*observed.borrow(), Some(t.site_b));
}

#[test]
fn test_single_leg_take_off_reports_complete() {
    let mut t = table();
    let system = t.state.deploy(SYSTEM, LIGHT, None);
    let fighter = t.state.deploy(FIGHTER, LIGHT, Some(t.site_a));
    let mut dispatcher = ResultDispatcher::default();
    let seen = record_all(&mut dispatcher);

    let effect = MoveEffect::new(MovementMode::TakeOff, LIGHT, fighter, t.site_a, system).as_react();
    let outcome = EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    assert_eq!(outcome.before, ResultType::TakingOff);
    assert_eq!(outcome.after, Some(ResultType::TookOff));

    let seen = seen.borrow();
    let took_off = seen[1].as_moved().unwrap();
    assert!(took_off.is_initial_move());
    assert!(took_off.is_move_complete());
    assert!(took_off.is_react());
    assert_eq!(seen[1].phase(), ResultPhase::After);
}

#[test]
fn test_flags_thread_through_both_phases() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();
    let seen = record_all(&mut dispatcher);

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b)
        .as_react()
        .as_move_away();
    EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    let seen = seen.borrow();
    let before = seen[0].as_moving().unwrap();
    let after = seen[1].as_moved().unwrap();
    assert!(before.is_react() && before.is_move_away());
    assert!(after.is_react() && after.is_move_away());
}

#[test]
fn test_log_renders_text() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::new(EngineConfig::new().with_link_style(LinkStyle::Plain));

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b).as_move_away();
    EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    let texts: Vec<_> = dispatcher.log().entries().map(|e| e.text.clone()).collect();
    assert_eq!(
        texts,
        vec![
            "Moving away Speeder Bike from Endor: Forest Clearing to Endor: Bunker using landspeed".to_string(),
            "Moved away Speeder Bike from Endor: Forest Clearing to Endor: Bunker using landspeed".to_string(),
        ]
    );
}

#[test]
fn test_hint_links_in_log() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::new(EngineConfig::new().with_link_style(LinkStyle::Hint));

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b);
    EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    let first = dispatcher.log().entries().next().unwrap();
    assert!(first.text.starts_with("Moving <div class='cardHint' value='2'>Speeder Bike</div> from "));
}

#[test]
fn test_handle_kept_past_its_pass_is_stale() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();
    let kept: Rc<RefCell<Option<EffectHandle>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&kept);
    dispatcher.register(RegisteredListener::new(
        "hoarder",
        FnListener::new(move |result: &EffectResult, _: &mut ResponseContext<'_>| {
            if let Some(handle) = result.preventable_effect() {
                *sink.borrow_mut() = Some(handle);
            }
            Ok::<(), ListenerError>(())
        }),
    ));

    let effect = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b);
    EffectResolver::resolve_move(&mut t.state, &mut dispatcher, effect).unwrap();

    let handle = kept.borrow().unwrap();
    assert_eq!(dispatcher.effects_mut().prevent(handle), Ok(false));
    assert_eq!(dispatcher.effects().status(handle), Err(ProtocolError::StaleHandle(handle)));
    assert_eq!(t.state.location_of(t.speeder), Some(t.site_b));
}

#[test]
fn test_sequential_moves_use_fresh_passes() {
    let mut t = table();
    let mut dispatcher = ResultDispatcher::default();

    let there = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_a, t.site_b);
    let first = EffectResolver::resolve_move(&mut t.state, &mut dispatcher, there).unwrap();
    let back = MoveEffect::new(MovementMode::Landspeed, LIGHT, t.speeder, t.site_b, t.site_a);
    let second = EffectResolver::resolve_move(&mut t.state, &mut dispatcher, back).unwrap();

    assert_ne!(first.handle, second.handle);
    assert_eq!(second.handle.pass(), first.handle.pass() + 1);
    assert_eq!(t.state.location_of(t.speeder), Some(t.site_a));
    assert_eq!(dispatcher.log().len(), 4);
}
