//! Game state: the slice of the game container the protocol needs.
//!
//! `GameState` answers three questions for the resolution layer:
//! - where is a card (card-location lookup)
//! - whose turn is it (acting player context)
//! - what is a card (blueprint lookup, used for filters and text)
//!
//! Cards are held in an `im::OrdMap`, so cloning a state is O(1) and
//! iteration is in entity-ID order, which keeps every derived list
//! deterministic across replays.

use std::sync::Arc;

use im::OrdMap;

use super::entity::EntityId;
use super::error::ProtocolError;
use super::player::{PlayerId, PlayerMap, Side};
use crate::cards::{BlueprintId, BlueprintLibrary, CardBlueprint, PhysicalCard};

/// Game state shared by the effect resolver, filters and text rendering.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use swccg_engine::cards::{BlueprintBuilder, BlueprintId, BlueprintLibrary, CardStats, CardSubtype};
/// use swccg_engine::core::{GameState, PlayerId, Side};
///
/// let mut library = BlueprintLibrary::new();
/// library.register(BlueprintBuilder::location(BlueprintId::new(1), Side::Dark, "Hoth: Echo Base", CardSubtype::Site).build().unwrap()).unwrap();
/// library.register(BlueprintBuilder::vehicle(BlueprintId::new(2), Side::Light, "Snowspeeder", CardStats::default()).build().unwrap()).unwrap();
///
/// let mut state = GameState::new(Arc::new(library));
/// let site = state.deploy(BlueprintId::new(1), PlayerId::new(0), None);
/// let speeder = state.deploy(BlueprintId::new(2), PlayerId::new(1), Some(site));
///
/// assert_eq!(state.location_of(speeder), Some(site));
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    library: Arc<BlueprintLibrary>,

    /// Side each player plays.
    sides: PlayerMap<Side>,

    /// Player whose turn it is.
    current_player: PlayerId,

    /// Turn number (starts at 1).
    turn_number: u32,

    /// Card instances by entity ID.
    cards: OrdMap<EntityId, PhysicalCard>,

    /// Next entity ID to allocate.
    next_entity_id: u32,
}

impl GameState {
    /// Create a game with player 0 on the Dark Side and player 1 on the
    /// Light Side. Player 0 takes the first turn.
    #[must_use]
    pub fn new(library: Arc<BlueprintLibrary>) -> Self {
        Self {
            library,
            sides: PlayerMap::new(|p| if p.index() == 0 { Side::Dark } else { Side::Light }),
            current_player: PlayerId::new(0),
            turn_number: 1,
            cards: OrdMap::new(),
            next_entity_id: 1,
        }
    }

    // === Players and turns ===

    /// Side a player plays.
    #[must_use]
    pub fn side_of(&self, player: PlayerId) -> Side {
        self.sides[player]
    }

    /// Player playing the given side.
    #[must_use]
    pub fn player_on_side(&self, side: Side) -> PlayerId {
        self.sides
            .iter()
            .find(|(_, s)| **s == side)
            .map_or(PlayerId::new(0), |(p, _)| p)
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Turn number (starts at 1).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Pass the turn to the opponent.
    pub fn advance_turn(&mut self) {
        self.turn_number += 1;
        self.current_player = self.current_player.opponent();
    }

    // === Blueprints ===

    /// The blueprint library this game was created with.
    #[must_use]
    pub fn library(&self) -> &BlueprintLibrary {
        &self.library
    }

    /// Look up a blueprint.
    #[must_use]
    pub fn blueprint(&self, id: BlueprintId) -> Option<&CardBlueprint> {
        self.library.get(id)
    }

    /// Blueprint of a card on the table.
    #[must_use]
    pub fn blueprint_of(&self, card: EntityId) -> Option<&CardBlueprint> {
        self.cards.get(&card).and_then(|c| self.library.get(c.blueprint))
    }

    // === Cards ===

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Add a card instance, replacing any card with the same ID.
    pub fn add_card(&mut self, card: PhysicalCard) {
        if card.id.0 >= self.next_entity_id {
            self.next_entity_id = card.id.0 + 1;
        }
        self.cards.insert(card.id, card);
    }

    /// Put a new copy of a blueprint on the table.
    pub fn deploy(&mut self, blueprint: BlueprintId, owner: PlayerId, location: Option<EntityId>) -> EntityId {
        let id = self.alloc_entity();
        let mut card = PhysicalCard::new(id, blueprint, owner);
        card.location = location;
        self.cards.insert(id, card);
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn card(&self, id: EntityId) -> Option<&PhysicalCard> {
        self.cards.get(&id)
    }

    /// Get a card instance or fail with `UnknownCard`.
    pub fn try_card(&self, id: EntityId) -> Result<&PhysicalCard, ProtocolError> {
        self.cards.get(&id).ok_or(ProtocolError::UnknownCard(id))
    }

    /// Iterate over all cards in entity-ID order.
    pub fn cards(&self) -> impl Iterator<Item = &PhysicalCard> {
        self.cards.values()
    }

    /// Location card a card is at.
    #[must_use]
    pub fn location_of(&self, card: EntityId) -> Option<EntityId> {
        self.cards.get(&card).and_then(|c| c.location)
    }

    /// Cards at a location, in entity-ID order.
    pub fn cards_at(&self, location: EntityId) -> impl Iterator<Item = &PhysicalCard> {
        self.cards.values().filter(move |c| c.is_at(location))
    }

    /// Cards aboard a starship or vehicle, in entity-ID order.
    pub fn cards_aboard(&self, transport: EntityId) -> impl Iterator<Item = &PhysicalCard> {
        self.cards.values().filter(move |c| c.is_aboard(transport))
    }

    /// Put a card aboard a transport; it takes the transport's location.
    pub fn board(&mut self, card: EntityId, transport: EntityId) -> Result<(), ProtocolError> {
        let location = self.try_card(transport)?.location;
        let entry = self.cards.get_mut(&card).ok_or(ProtocolError::UnknownCard(card))?;
        entry.aboard = Some(transport);
        entry.location = location;
        Ok(())
    }

    /// Take a card off its transport. It stays where it is.
    pub fn disembark(&mut self, card: EntityId) -> Result<Option<EntityId>, ProtocolError> {
        let entry = self.cards.get_mut(&card).ok_or(ProtocolError::UnknownCard(card))?;
        Ok(entry.aboard.take())
    }

    /// Move a card to a location. Returns the location it left.
    ///
    /// Only the card itself moves; callers relocate anything aboard it.
    pub fn relocate(&mut self, card: EntityId, to: EntityId) -> Result<Option<EntityId>, ProtocolError> {
        let entry = self.cards.get_mut(&card).ok_or(ProtocolError::UnknownCard(card))?;
        Ok(entry.location.replace(to))
    }
}
