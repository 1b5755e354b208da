//! Blueprint library.
//!
//! The `BlueprintLibrary` stores every blueprint loaded for a game and
//! provides lookup by `BlueprintId`. Loading isolates failures per card: a
//! bad definition is reported and skipped, the rest still load.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::blueprint::{BlueprintId, CardBlueprint, CardCategory};
use crate::core::ContentError;

/// Outcome of a bulk load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    /// IDs of the blueprints that were registered.
    pub loaded: Vec<BlueprintId>,
    /// Definitions that were rejected.
    pub failures: Vec<ContentError>,
}

impl LoadReport {
    /// Whether every definition loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Registry of card blueprints.
///
/// ## Example
///
/// ```
/// use swccg_engine::cards::{BlueprintBuilder, BlueprintId, BlueprintLibrary, CardStats};
/// use swccg_engine::core::Side;
///
/// let mut library = BlueprintLibrary::new();
///
/// let speeder = BlueprintBuilder::vehicle(BlueprintId::new(1), Side::Light, "Speeder Bike", CardStats::default())
///     .build()
///     .unwrap();
/// library.register(speeder).unwrap();
///
/// let found = library.get(BlueprintId::new(1)).unwrap();
/// assert_eq!(found.title(), "Speeder Bike");
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlueprintLibrary {
    blueprints: FxHashMap<BlueprintId, CardBlueprint>,
}

impl BlueprintLibrary {
    /// Create a new empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blueprint.
    ///
    /// Fails if a blueprint with the same ID already exists.
    pub fn register(&mut self, blueprint: CardBlueprint) -> Result<(), ContentError> {
        if self.blueprints.contains_key(&blueprint.id()) {
            return Err(ContentError::DuplicateBlueprint(blueprint.id()));
        }
        self.blueprints.insert(blueprint.id(), blueprint);
        Ok(())
    }

    /// Register a batch of built (or failed) definitions.
    ///
    /// Each failure is logged and collected; it never stops the load.
    pub fn load<I>(&mut self, definitions: I) -> LoadReport
    where
        I: IntoIterator<Item = Result<CardBlueprint, ContentError>>,
    {
        let mut report = LoadReport::default();

        for definition in definitions {
            let result = definition.and_then(|bp| {
                let id = bp.id();
                self.register(bp).map(|()| id)
            });

            match result {
                Ok(id) => report.loaded.push(id),
                Err(error) => {
                    warn!(%error, "rejected card definition");
                    report.failures.push(error);
                }
            }
        }

        report
    }

    /// Get a blueprint by ID.
    #[must_use]
    pub fn get(&self, id: BlueprintId) -> Option<&CardBlueprint> {
        self.blueprints.get(&id)
    }

    /// Check if a blueprint ID is registered.
    #[must_use]
    pub fn contains(&self, id: BlueprintId) -> bool {
        self.blueprints.contains_key(&id)
    }

    /// Get the number of registered blueprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Check if the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Iterate over all blueprints.
    pub fn iter(&self) -> impl Iterator<Item = &CardBlueprint> {
        self.blueprints.values()
    }

    /// Find blueprints by category.
    pub fn find_by_category(&self, category: CardCategory) -> impl Iterator<Item = &CardBlueprint> {
        self.blueprints.values().filter(move |bp| bp.category() == category)
    }

    /// Find blueprints matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardBlueprint>
    where
        F: Fn(&CardBlueprint) -> bool,
    {
        self.blueprints.values().filter(move |bp| predicate(bp))
    }
}
