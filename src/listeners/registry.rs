//! Listener registry.
//!
//! The registry stores listeners and answers one question per dispatched
//! result: which listeners want it, and in what order. Cards register
//! listeners when they come into play and remove them (by source) when they
//! leave.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::dispatcher::ResponseContext;
use crate::core::{EntityId, ListenerError};
use crate::results::{EffectResult, ResultType};

/// Unique identifier for a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Create a new listener ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// Something that observes results and may respond to them.
///
/// A listener sees the result and a [`ResponseContext`] through which it
/// can read the game and prevent the result's pending effect. Returning
/// `Err` marks this listener as failed for the pass; dispatch continues
/// with the next listener.
pub trait Listener {
    fn on_result(&self, result: &EffectResult, ctx: &mut ResponseContext<'_>) -> Result<(), ListenerError>;
}

/// A listener plus its registration metadata.
#[derive(Clone)]
pub struct RegisteredListener {
    /// Assigned by the registry on registration.
    pub id: ListenerId,

    /// Human-readable name (for logs).
    pub name: String,

    /// The card that owns this listener. `None` for game rules.
    pub source: Option<EntityId>,

    /// Result types this listener wants. Empty means every type.
    pub result_types: Vec<ResultType>,

    /// Higher priority listeners run first.
    /// When equal, listeners run in registration order.
    pub priority: i32,

    /// Is this listener currently active?
    pub enabled: bool,

    listener: Arc<dyn Listener>,
}

impl RegisteredListener {
    /// Wrap a listener. It hears every result type until narrowed with `on`.
    pub fn new(name: impl Into<String>, listener: impl Listener + 'static) -> Self {
        Self {
            id: ListenerId::new(0),
            name: name.into(),
            source: None,
            result_types: Vec::new(),
            priority: 0,
            enabled: true,
            listener: Arc::new(listener),
        }
    }

    /// Set the source card (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Listen for a result type (builder pattern).
    #[must_use]
    pub fn on(mut self, result_type: ResultType) -> Self {
        if !self.result_types.contains(&result_type) {
            self.result_types.push(result_type);
        }
        self
    }

    /// Set priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Does this listener want results of the given type?
    #[must_use]
    pub fn wants(&self, result_type: ResultType) -> bool {
        self.enabled && (self.result_types.is_empty() || self.result_types.contains(&result_type))
    }

    pub(crate) fn handler(&self) -> Arc<dyn Listener> {
        Arc::clone(&self.listener)
    }
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("source", &self.source)
            .field("result_types", &self.result_types)
            .field("priority", &self.priority)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Registry for listeners.
#[derive(Clone, Debug)]
pub struct ListenerRegistry {
    listeners: FxHashMap<ListenerId, RegisteredListener>,

    /// Next listener ID to allocate.
    next_id: u32,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            listeners: FxHashMap::default(),
            next_id: 1,
        }
    }
}

impl ListenerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, returns its ID.
    pub fn register(&mut self, mut listener: RegisteredListener) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        listener.id = id;
        self.listeners.insert(id, listener);
        id
    }

    /// Unregister a listener.
    pub fn unregister(&mut self, id: ListenerId) -> Option<RegisteredListener> {
        self.listeners.remove(&id)
    }

    /// Get a listener by ID.
    #[must_use]
    pub fn get(&self, id: ListenerId) -> Option<&RegisteredListener> {
        self.listeners.get(&id)
    }

    /// Listeners for a result type, in dispatch order.
    ///
    /// Sorted by priority (descending), then by ID (ascending) so that
    /// replays dispatch identically.
    #[must_use]
    pub fn listeners_for(&self, result_type: ResultType) -> Vec<&RegisteredListener> {
        let mut found: Vec<_> = self
            .listeners
            .values()
            .filter(|l| l.wants(result_type))
            .collect();
        found.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        found
    }

    /// Listeners owned by a source card.
    pub fn listeners_for_source(&self, source: EntityId) -> Vec<&RegisteredListener> {
        let mut found: Vec<_> = self
            .listeners
            .values()
            .filter(|l| l.source == Some(source))
            .collect();
        found.sort_by_key(|l| l.id);
        found
    }

    /// Remove all listeners owned by a source card. Returns how many.
    pub fn remove_for_source(&mut self, source: EntityId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|_, l| l.source != Some(source));
        before - self.listeners.len()
    }

    /// Enable or disable a listener.
    pub fn set_enabled(&mut self, id: ListenerId, enabled: bool) {
        if let Some(listener) = self.listeners.get_mut(&id) {
            listener.enabled = enabled;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quiet;

    impl Listener for Quiet {
        fn on_result(&self, _: &EffectResult, _: &mut ResponseContext<'_>) -> Result<(), ListenerError> {
            Ok(())
        }
    }

    fn ids(found: Vec<&RegisteredListener>) -> Vec<ListenerId> {
        found.into_iter().map(|l| l.id).collect()
    }

    #[test]
    fn test_listener_id() {
        let id = ListenerId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Listener(5)");
    }

    #[test]
    fn test_register_assigns_ids() {
        let mut registry = ListenerRegistry::new();
        let a = registry.register(RegisteredListener::new("a", Quiet));
        let b = registry.register(RegisteredListener::new("b", Quiet));

        assert_eq!(a, ListenerId::new(1));
        assert_eq!(b, ListenerId::new(2));
        assert_eq!(registry.get(a).map(|l| l.name.as_str()), Some("a"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_order_priority_then_id() {
        let mut registry = ListenerRegistry::new();
        let low = registry.register(RegisteredListener::new("low", Quiet).with_priority(-1));
        let first = registry.register(RegisteredListener::new("first", Quiet));
        let high = registry.register(RegisteredListener::new("high", Quiet).with_priority(10));
        let second = registry.register(RegisteredListener::new("second", Quiet));

        assert_eq!(
            ids(registry.listeners_for(ResultType::TookOff)),
            vec![high, first, second, low]
        );
    }

    #[test]
    fn test_interest_filtering() {
        let mut registry = ListenerRegistry::new();
        let any = registry.register(RegisteredListener::new("any", Quiet));
        let took_off = registry.register(RegisteredListener::new("took off", Quiet).on(ResultType::TookOff));

        assert_eq!(ids(registry.listeners_for(ResultType::TookOff)), vec![any, took_off]);
        assert_eq!(ids(registry.listeners_for(ResultType::MovingUsingLandspeed)), vec![any]);
    }

    #[test]
    fn test_disable_and_unregister() {
        let mut registry = ListenerRegistry::new();
        let id = registry.register(RegisteredListener::new("x", Quiet));

        registry.set_enabled(id, false);
        assert!(registry.listeners_for(ResultType::Landed).is_empty());

        registry.set_enabled(id, true);
        assert_eq!(registry.listeners_for(ResultType::Landed).len(), 1);

        assert!(registry.unregister(id).is_some());
        assert!(registry.unregister(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_for_source() {
        let mut registry = ListenerRegistry::new();
        registry.register(RegisteredListener::new("a", Quiet).with_source(EntityId(10)));
        registry.register(RegisteredListener::new("b", Quiet).with_source(EntityId(10)));
        let keep = registry.register(RegisteredListener::new("c", Quiet).with_source(EntityId(20)));

        assert_eq!(registry.listeners_for_source(EntityId(10)).len(), 2);
        assert_eq!(registry.remove_for_source(EntityId(10)), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(keep).is_some());
    }
}
