//! Result dispatcher.
//!
//! The dispatcher owns the listener registry, the effect table for the
//! current resolution pass, and the result log. `dispatch` hands one result
//! to every interested listener, in registry order, and reports what
//! happened. Listener failures are logged and isolated; they never escape
//! a dispatch. A listener that fails, by error or by panic, is
//! non-cancelling: any effect it cancelled is returned to pending before
//! the next listener runs.

use std::panic::{self, AssertUnwindSafe};

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::log::ResultLog;
use super::registry::{ListenerId, ListenerRegistry, RegisteredListener};
use crate::core::{EngineConfig, GameState, ListenerError, ProtocolError};
use crate::effects::{EffectHandle, EffectStatus, EffectTable, MoveEffect};
use crate::results::{EffectResult, TextContext};

/// What a listener may do while handling a result.
///
/// The game is read-only. The only write a listener can make is to
/// prevent a pending effect.
pub struct ResponseContext<'a> {
    game: &'a GameState,
    effects: &'a mut EffectTable,
    prevented: SmallVec<[EffectHandle; 2]>,
}

impl<'a> ResponseContext<'a> {
    /// Create a context over a game and the current effect table.
    pub fn new(game: &'a GameState, effects: &'a mut EffectTable) -> Self {
        Self {
            game,
            effects,
            prevented: SmallVec::new(),
        }
    }

    /// The game, read-only.
    #[must_use]
    pub fn game(&self) -> &'a GameState {
        self.game
    }

    /// Prevent an effect.
    ///
    /// `Ok(true)` if this call cancelled it; `Ok(false)` if it was already
    /// cancelled or completed.
    pub fn prevent(&mut self, handle: EffectHandle) -> Result<bool, ProtocolError> {
        let cancelled = self.effects.prevent(handle)?;
        if cancelled {
            self.prevented.push(handle);
        }
        Ok(cancelled)
    }

    /// Is the effect still pending? Stale or unknown handles are not.
    #[must_use]
    pub fn is_pending(&self, handle: EffectHandle) -> bool {
        matches!(self.effects.status(handle), Ok(EffectStatus::Pending))
    }

    /// Current status of an effect.
    pub fn status(&self, handle: EffectHandle) -> Result<EffectStatus, ProtocolError> {
        self.effects.status(handle)
    }

    /// Did this context cancel an effect?
    #[must_use]
    pub fn prevented(&self) -> bool {
        !self.prevented.is_empty()
    }

    /// Undo every cancellation made through this context.
    fn rollback(&mut self) {
        for handle in self.prevented.drain(..) {
            if let Err(error) = self.effects.reinstate(handle) {
                warn!(%handle, %error, "could not reinstate effect");
            }
        }
    }
}

/// Outcome of dispatching one result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Every listener invoked, in dispatch order.
    pub notified: Vec<ListenerId>,
    /// Listeners that returned an error or panicked.
    pub failed: Vec<ListenerId>,
    /// The listener whose `prevent` cancelled the effect, if any.
    pub cancelled_by: Option<ListenerId>,
}

impl DispatchReport {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled_by.is_some()
    }
}

/// Delivers results to listeners and owns the per-pass effect table.
#[derive(Clone, Debug)]
pub struct ResultDispatcher {
    config: EngineConfig,
    listeners: ListenerRegistry,
    effects: EffectTable,
    log: ResultLog,
}

impl Default for ResultDispatcher {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ResultDispatcher {
    /// Create a dispatcher with no listeners.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            log: ResultLog::new(config.result_log_capacity),
            config,
            listeners: ListenerRegistry::new(),
            effects: EffectTable::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a listener.
    pub fn register(&mut self, listener: RegisteredListener) -> ListenerId {
        self.listeners.register(listener)
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerRegistry {
        &mut self.listeners
    }

    #[must_use]
    pub fn effects(&self) -> &EffectTable {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectTable {
        &mut self.effects
    }

    /// Propose an effect in the current pass.
    pub fn begin(&mut self, effect: MoveEffect) -> EffectHandle {
        self.effects.insert(effect)
    }

    /// Close the current pass. Every handle issued so far becomes stale.
    pub fn end_pass(&mut self) {
        self.effects.end_pass();
    }

    #[must_use]
    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    /// Hand a result to every interested listener.
    ///
    /// Every enabled listener for the result's type runs, even after an
    /// earlier one fails or cancels the effect. The first listener whose
    /// `prevent` cancels the effect, and which then succeeds, is reported in
    /// `cancelled_by`. A failing listener's cancellations are undone.
    pub fn dispatch(&mut self, result: &EffectResult, game: &GameState) -> DispatchReport {
        let result_type = result.result_type();
        if self.config.log_results {
            let ctx = TextContext::new(game, self.config.link_style);
            self.log.record(result, &ctx);
        }

        let listeners = self.listeners.listeners_for(result_type);
        debug!(?result_type, listeners = listeners.len(), "dispatching result");

        let mut report = DispatchReport::default();
        for registered in listeners {
            let id = registered.id;
            debug!(listener = %registered.name, %id, "notifying listener");

            let handler = registered.handler();
            let mut ctx = ResponseContext::new(game, &mut self.effects);
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.on_result(result, &mut ctx)))
                .unwrap_or_else(|_| Err(ListenerError::new("listener panicked")));
            if let Err(error) = outcome {
                warn!(listener = %registered.name, %id, %error, "listener failed");
                ctx.rollback();
                report.failed.push(id);
            } else if ctx.prevented() && report.cancelled_by.is_none() {
                debug!(listener = %registered.name, %id, "listener prevented effect");
                report.cancelled_by = Some(id);
            }
            report.notified.push(id);
        }
        report
    }
}
