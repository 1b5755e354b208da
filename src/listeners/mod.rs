//! Listener system.
//!
//! Listeners are the "respond to this" half of the effect/result protocol.
//! When the engine is about to move a card it dispatches a before-phase
//! result; any listener may prevent the pending effect through its
//! [`ResponseContext`]. Once the move is committed, an after-phase result
//! is dispatched for listeners that only observe.
//!
//! ## Key Components
//!
//! - [`Listener`]: Trait implemented by anything that handles results
//! - [`ListenerRegistry`]: Storage and ordering of listeners
//! - [`ResultDispatcher`]: Delivers results, owns the per-pass effect table
//! - [`FnListener`] / [`PreventMovement`]: Built-in listeners
//! - [`ResultLog`]: Ordered text record of dispatched results
//!
//! ## Ordering
//!
//! Listeners run by priority (higher first), then registration order.
//! The order depends only on registrations, never on hash iteration, so a
//! replayed game dispatches identically.

mod builtin;
mod dispatcher;
mod log;
mod registry;

pub use builtin::{FnListener, PreventMovement};
pub use dispatcher::{DispatchReport, ResponseContext, ResultDispatcher};
pub use log::{LogEntry, ResultLog};
pub use registry::{Listener, ListenerId, ListenerRegistry, RegisteredListener};
