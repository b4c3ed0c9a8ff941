//! Character registry for definition lookup.
//!
//! The `CharacterRegistry` stores every character definition of a script.
//! It provides fast lookup by `CharacterId` or by name.

use rustc_hash::FxHashMap;

use super::definition::{CharacterCategory, CharacterDefinition, CharacterId};
use crate::error::NightSheetError;

/// Registry of character definitions.
///
/// ## Example
///
/// ```
/// use grimoire::characters::{CharacterCategory, CharacterDefinition, CharacterId, CharacterRegistry};
///
/// let mut registry = CharacterRegistry::new();
///
/// let imp = CharacterDefinition::new(CharacterId::new(1), "Imp", CharacterCategory::Demon)
///     .with_night_numbers(Some(0), Some(24));
///
/// registry.register(imp);
///
/// let found = registry.get_by_name("Imp").unwrap();
/// assert_eq!(found.other_nights_priority(), Some(24));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    characters: FxHashMap<CharacterId, CharacterDefinition>,
    by_name: FxHashMap<String, CharacterId>,
    next_id: u16,
}

impl CharacterRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Returns the definition previously registered under the same ID.
    pub fn register(&mut self, character: CharacterDefinition) -> Option<CharacterDefinition> {
        let id = character.id;
        self.next_id = self.next_id.max(id.raw().saturating_add(1));

        if let Some(previous) = self.characters.get(&id) {
            if self.by_name.get(&previous.name) == Some(&id) {
                self.by_name.remove(&previous.name);
            }
        }
        self.by_name.insert(character.name.clone(), id);
        self.characters.insert(id, character)
    }

    /// Register a character with an auto-assigned ID.
    ///
    /// Returns the assigned ID.
    pub fn register_auto(&mut self, name: impl Into<String>, category: CharacterCategory) -> CharacterId {
        let id = CharacterId::new(self.next_id);
        self.register(CharacterDefinition::new(id, name, category));
        id
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&CharacterDefinition> {
        self.characters.get(&id)
    }

    /// Get a definition by ID, failing with `UnknownCharacter`.
    pub fn require(&self, id: CharacterId) -> Result<&CharacterDefinition, NightSheetError> {
        self.get(id)
            .ok_or(NightSheetError::UnknownCharacter { character: id })
    }

    /// Get a mutable definition by ID.
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut CharacterDefinition> {
        self.characters.get_mut(&id)
    }

    /// Get a definition by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CharacterDefinition> {
        self.by_name.get(name).and_then(|id| self.characters.get(id))
    }

    /// Number of registered characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Iterate over all definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterDefinition> {
        self.characters.values()
    }

    /// Definitions of one category, sorted by ID.
    pub fn of_category(&self, category: CharacterCategory) -> Vec<&CharacterDefinition> {
        let mut found: Vec<_> = self.iter().filter(|c| c.category == category).collect();
        found.sort_by_key(|c| c.id);
        found
    }
}

impl FromIterator<CharacterDefinition> for CharacterRegistry {
    fn from_iter<I: IntoIterator<Item = CharacterDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for character in iter {
            registry.register(character);
        }
        registry
    }
}
