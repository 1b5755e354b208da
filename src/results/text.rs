//! Text rendering context.
//!
//! Results describe themselves for spectators and the game log. Rendering
//! takes an explicit read-only `TextContext` instead of reaching into a
//! global game object, and has no side effects.

use crate::core::{EntityId, GameState, LinkStyle};

/// Read-only context for rendering result text.
#[derive(Clone, Copy)]
pub struct TextContext<'a> {
    pub game: &'a GameState,
    pub link_style: LinkStyle,
}

impl<'a> TextContext<'a> {
    /// Create a context.
    pub fn new(game: &'a GameState, link_style: LinkStyle) -> Self {
        Self { game, link_style }
    }

    /// Plain-title context.
    pub fn plain(game: &'a GameState) -> Self {
        Self::new(game, LinkStyle::Plain)
    }

    /// Render a reference to a card.
    #[must_use]
    pub fn card_link(&self, card: EntityId) -> String {
        let Some(blueprint) = self.game.blueprint_of(card) else {
            return "Unknown card".to_string();
        };
        match self.link_style {
            LinkStyle::Plain => blueprint.title().to_string(),
            LinkStyle::Hint => format!(
                "<div class='cardHint' value='{}'>{}</div>",
                blueprint.id().raw(),
                blueprint.title()
            ),
        }
    }

    /// Render several card references, comma separated.
    #[must_use]
    pub fn card_links(&self, cards: &[EntityId]) -> String {
        cards
            .iter()
            .map(|&c| self.card_link(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
