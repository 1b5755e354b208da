//! Effect results.
//!
//! A result is an immutable report of something that is about to happen or
//! has happened. Before-phase results carry an [`crate::effects::EffectHandle`]
//! listeners may use to prevent the move; after-phase results are purely
//! informational.
//!
//! ## Key Types
//!
//! - `MovementMode`: How a card moves
//! - `ResultType`: Closed tag, one per (mode, phase)
//! - `MovingResult` / `MovedResult`: Before and after payloads
//! - `EffectResult`: The union dispatched to listeners
//! - `TextContext`: Read-only context for rendering result text

pub mod kind;
pub mod movement;
pub mod result;
pub mod text;

pub use kind::{MovementMode, ResultPhase, ResultType};
pub use movement::{MovedResult, MovingResult};
pub use result::EffectResult;
pub use text::TextContext;
