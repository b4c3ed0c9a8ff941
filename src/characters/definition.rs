//! Character definitions - static character data.
//!
//! `CharacterDefinition` holds what the night sheet and ability code need
//! to know about a character type: its name, its category and when it acts
//! at night. Which player holds the character and what has happened to them
//! is game state, kept elsewhere.

use serde::{Deserialize, Serialize};

/// Unique identifier for a character definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub u16);

impl CharacterId {
    /// Create a new character ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character({})", self.0)
    }
}

/// Character category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterCategory {
    #[default]
    Townsfolk,
    Outsider,
    Minion,
    Demon,
    Traveller,
    Fabled,
}

impl CharacterCategory {
    /// Alignment a character of this category starts with, if fixed.
    ///
    /// Travellers choose and fabled characters belong to the storyteller.
    #[must_use]
    pub const fn default_alignment(self) -> Option<Alignment> {
        match self {
            CharacterCategory::Townsfolk | CharacterCategory::Outsider => Some(Alignment::Good),
            CharacterCategory::Minion | CharacterCategory::Demon => Some(Alignment::Evil),
            CharacterCategory::Traveller | CharacterCategory::Fabled => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
}

/// When a character acts in one category of night.
///
/// Lower numbers act earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NightOrder {
    /// Acts at this position on the night sheet.
    Acts(u32),
    /// Never acts in this category.
    Idle,
    /// The definition does not say.
    #[default]
    Undefined,
}

impl NightOrder {
    /// From a raw sheet number, where `0` means not acting.
    #[must_use]
    pub const fn from_raw(raw: Option<u32>) -> Self {
        match raw {
            None => NightOrder::Undefined,
            Some(0) => NightOrder::Idle,
            Some(n) => NightOrder::Acts(n),
        }
    }

    /// The position on the sheet when acting.
    #[must_use]
    pub const fn number(self) -> Option<u32> {
        match self {
            NightOrder::Acts(n) => Some(n),
            NightOrder::Idle | NightOrder::Undefined => None,
        }
    }

    #[must_use]
    pub const fn is_defined(self) -> bool {
        !matches!(self, NightOrder::Undefined)
    }
}

/// Static definition of a character type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    /// Unique identifier.
    pub id: CharacterId,

    /// Display name.
    pub name: String,

    pub category: CharacterCategory,

    /// Position on the first night side of the sheet.
    #[serde(default)]
    pub first_night: NightOrder,

    /// Position on the other nights side of the sheet.
    #[serde(default)]
    pub other_nights: NightOrder,

    /// Ability text. Never interpreted.
    #[serde(default)]
    pub ability: String,
}

impl CharacterDefinition {
    /// Create a new definition with undefined night orders.
    pub fn new(id: CharacterId, name: impl Into<String>, category: CharacterCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            first_night: NightOrder::Undefined,
            other_nights: NightOrder::Undefined,
            ability: String::new(),
        }
    }

    /// Set the first night order (builder pattern).
    #[must_use]
    pub fn with_first_night(mut self, order: NightOrder) -> Self {
        self.first_night = order;
        self
    }

    /// Set the other nights order (builder pattern).
    #[must_use]
    pub fn with_other_nights(mut self, order: NightOrder) -> Self {
        self.other_nights = order;
        self
    }

    /// Set both night orders from raw sheet numbers (builder pattern).
    ///
    /// `0` means not acting, `None` leaves the order undefined.
    #[must_use]
    pub fn with_night_numbers(mut self, first: Option<u32>, other: Option<u32>) -> Self {
        self.first_night = NightOrder::from_raw(first);
        self.other_nights = NightOrder::from_raw(other);
        self
    }

    /// Set the ability text (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.ability = text.into();
        self
    }

    /// Night order for a category of night.
    #[must_use]
    pub fn night_order(&self, is_first_night: bool) -> NightOrder {
        if is_first_night {
            self.first_night
        } else {
            self.other_nights
        }
    }

    #[must_use]
    pub fn first_night_priority(&self) -> Option<u32> {
        self.first_night.number()
    }

    #[must_use]
    pub fn other_nights_priority(&self) -> Option<u32> {
        self.other_nights.number()
    }
}

impl std::fmt::Display for CharacterDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
