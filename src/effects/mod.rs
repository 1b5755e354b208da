//! Effect system: proposed state changes that listeners may prevent.
//!
//! - `MoveEffect`: A proposed move with a PENDING/CANCELLED/COMPLETED
//!   state machine
//! - `EffectTable` / `EffectHandle`: Effects of the current resolution
//!   pass, addressed by handle
//! - `CommittedMove`: Proof that a move was committed, the only input for
//!   an after-phase result
//! - `EffectResolver`: Runs one move through the two-phase protocol
//!
//! ## Design Philosophy
//!
//! Results never point at effects. A before-phase result carries an
//! `EffectHandle`, valid only until its pass ends. Once a pass is over, a
//! handle cannot reach a recycled effect: the table rejects it as stale.

mod effect;
mod resolver;
mod table;

pub use effect::{EffectStatus, MoveEffect, MovingCards};
pub use resolver::{EffectResolver, MoveOutcome};
pub use table::{CommittedMove, EffectHandle, EffectTable};
