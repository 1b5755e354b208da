//! Legality filters.
//!
//! A `Filter` answers "does this card qualify" for a (player, game, card,
//! deployment-mode) tuple. Filters are plain data: evaluating one reads the
//! game and never mutates anything, so two evaluations with the same
//! arguments always agree.

use serde::{Deserialize, Serialize};

use crate::cards::{Capabilities, CardCategory, CardSubtype, PhysicalCard};
use crate::core::{EntityId, GameState, PlayerId, Side};

/// A composable predicate over a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    // === Identity ===

    /// The specific card.
    Card(EntityId),

    /// Card owned by the player.
    OwnedBy(PlayerId),

    /// Card owned by the player the filter is evaluated for.
    OwnedByEvaluatingPlayer,

    // === Blueprint properties ===

    /// Card's blueprint is on the side.
    Side(Side),

    Category(CardCategory),

    Subtype(CardSubtype),

    /// Card has at least one of the capabilities.
    HasCapability(Capabilities),

    /// Card is unique.
    Unique,

    // === Position ===

    /// Card is at the location.
    AtLocation(EntityId),

    /// Card is at the same location as another card.
    AtSameLocationAs(EntityId),

    /// Card is aboard the starship or vehicle.
    Aboard(EntityId),

    // === Mode ===

    /// Matches only when evaluated for deployment.
    Deploying,

    // === Combinators ===

    /// All filters must match.
    All(Vec<Filter>),

    /// At least one filter must match.
    Any(Vec<Filter>),

    /// Filter must not match.
    Not(Box<Filter>),

    // === Special ===

    /// Always matches.
    Always,

    /// Never matches.
    Never,
}

impl Filter {
    /// Cards with the pilot capability.
    pub fn pilot() -> Self {
        Self::HasCapability(Capabilities::PILOT)
    }

    /// Create an AND filter.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::All(filters.into_iter().collect())
    }

    /// Create an OR filter.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Any(filters.into_iter().collect())
    }

    /// Negate this filter.
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another filter with AND.
    pub fn and(self, other: Filter) -> Self {
        match self {
            Self::All(mut filters) => {
                filters.push(other);
                Self::All(filters)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another filter with OR.
    pub fn or(self, other: Filter) -> Self {
        match self {
            Self::Any(mut filters) => {
                filters.push(other);
                Self::Any(filters)
            }
            _ => Self::Any(vec![self, other]),
        }
    }

    /// Evaluate against a card.
    #[must_use]
    pub fn accepts(&self, player: PlayerId, game: &GameState, card: &PhysicalCard, for_deployment: bool) -> bool {
        let ctx = FilterContext::new(player, game, for_deployment);
        FilterEvaluator::evaluate(self, &ctx, card)
    }
}

/// Context a filter is evaluated in.
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    /// Player the question is asked for.
    pub player: PlayerId,
    /// Current game state.
    pub game: &'a GameState,
    /// Asked while deploying the card (as opposed to during play).
    pub for_deployment: bool,
}

impl<'a> FilterContext<'a> {
    /// Create a new context.
    pub fn new(player: PlayerId, game: &'a GameState, for_deployment: bool) -> Self {
        Self {
            player,
            game,
            for_deployment,
        }
    }
}

/// Evaluator for filters.
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Check if a card satisfies a filter.
    pub fn evaluate(filter: &Filter, ctx: &FilterContext, card: &PhysicalCard) -> bool {
        match filter {
            Filter::Card(id) => card.id == *id,

            Filter::OwnedBy(player) => card.owner == *player,

            Filter::OwnedByEvaluatingPlayer => card.owner == ctx.player,

            Filter::Side(side) => ctx
                .game
                .blueprint(card.blueprint)
                .is_some_and(|bp| bp.side() == *side),

            Filter::Category(category) => ctx
                .game
                .blueprint(card.blueprint)
                .is_some_and(|bp| bp.category() == *category),

            Filter::Subtype(subtype) => ctx
                .game
                .blueprint(card.blueprint)
                .is_some_and(|bp| bp.subtype() == Some(*subtype)),

            Filter::HasCapability(capabilities) => ctx
                .game
                .blueprint(card.blueprint)
                .is_some_and(|bp| bp.has_any(*capabilities)),

            Filter::Unique => ctx
                .game
                .blueprint(card.blueprint)
                .is_some_and(|bp| bp.is_unique()),

            Filter::AtLocation(location) => card.is_at(*location),

            Filter::AtSameLocationAs(other) => match (card.location, ctx.game.location_of(*other)) {
                (Some(here), Some(there)) => here == there,
                _ => false,
            },

            Filter::Aboard(transport) => card.is_aboard(*transport),

            Filter::Deploying => ctx.for_deployment,

            Filter::All(filters) => filters.iter().all(|f| Self::evaluate(f, ctx, card)),

            Filter::Any(filters) => filters.iter().any(|f| Self::evaluate(f, ctx, card)),

            Filter::Not(inner) => !Self::evaluate(inner, ctx, card),

            Filter::Always => true,

            Filter::Never => false,
        }
    }

    /// Cards in the game that satisfy the filter, in entity-ID order.
    pub fn matching<'a>(filter: &'a Filter, ctx: &'a FilterContext<'a>) -> impl Iterator<Item = &'a PhysicalCard> + 'a {
        ctx.game.cards().filter(move |card| Self::evaluate(filter, ctx, card))
    }
}
