//! Legality filters.
//!
//! A filter is a pure predicate over (player, game, candidate card, mode
//! flag). Blueprint-level rules such as "who may pilot this vehicle" return
//! a [`Filter`], so every answer composes with the same AND/OR/NOT
//! combinators.
//!
//! ## Example Usage
//!
//! ```
//! use swccg_engine::cards::Capabilities;
//! use swccg_engine::core::PlayerId;
//! use swccg_engine::filters::Filter;
//!
//! // "A pilot or warrior you own"
//! let filter = Filter::pilot()
//!     .or(Filter::HasCapability(Capabilities::WARRIOR))
//!     .and(Filter::OwnedBy(PlayerId::new(0)));
//!
//! assert!(matches!(filter, Filter::All(_)));
//! ```

mod filter;

pub use filter::{Filter, FilterContext, FilterEvaluator};
