//! Night act ordering.
//!
//! Each night the storyteller wakes characters in a fixed order printed on
//! the night sheet: one side for the first night, one for every other
//! night. Lower numbers act earlier. This is the opposite sense of effect
//! priority, where higher resolves first; [`NightActOrdering::priority`]
//! converts one into the other.
//!
//! ## Example Usage
//!
//! ```
//! use grimoire::characters::{CharacterCategory, CharacterDefinition, CharacterId};
//! use grimoire::night::night_act_ordering;
//!
//! let characters = [
//!     CharacterDefinition::new(CharacterId::new(1), "Empath", CharacterCategory::Townsfolk)
//!         .with_night_numbers(Some(36), Some(53)),
//!     CharacterDefinition::new(CharacterId::new(2), "Poisoner", CharacterCategory::Minion)
//!         .with_night_numbers(Some(17), Some(8)),
//!     CharacterDefinition::new(CharacterId::new(3), "Soldier", CharacterCategory::Townsfolk)
//!         .with_night_numbers(Some(0), Some(0)),
//! ];
//!
//! let first = night_act_ordering(&characters, true);
//! assert_eq!(first.order(), [CharacterId::new(2), CharacterId::new(1)]);
//! assert!(first.not_acting().contains(&CharacterId::new(3)));
//! ```

mod ordering;
mod sheet;

pub use ordering::{night_act_ordering, NightActOrdering, ACTING_ADJUSTMENT, NOT_ACTING_PRIORITY};
pub use sheet::NightSheet;
