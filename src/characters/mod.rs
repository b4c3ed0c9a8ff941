//! Character definitions and abilities.
//!
//! Characters come in two layers:
//! - `CharacterDefinition`: Static data (name, category, night sheet numbers)
//! - `AbilityFactory`: Produces the effects a character places when active
//!
//! The `CharacterRegistry` holds every definition of a script and is the
//! input to the night sheet.

mod ability;
mod definition;
mod registry;

pub use ability::{activate, AbilityContext, AbilityFactory};
pub use definition::{Alignment, CharacterCategory, CharacterDefinition, CharacterId, NightOrder};
pub use registry::CharacterRegistry;
