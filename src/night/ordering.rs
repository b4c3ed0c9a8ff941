//! Night act orderings.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::characters::{CharacterDefinition, CharacterId};
use crate::error::NightSheetError;

/// Resolution priority offset for acting characters.
///
/// An acting character's priority is this minus its act order, so earlier
/// actors resolve first in an effect chain.
pub const ACTING_ADJUSTMENT: i64 = 10_000_000_000;

/// Resolution priority of a character that does not act.
pub const NOT_ACTING_PRIORITY: i64 = i64::MIN;

/// Which characters act in one category of night, and in what order.
///
/// Built only through [`NightActOrdering::from_numbers`],
/// [`night_act_ordering`] or [`NightActOrdering::subset`], so the order,
/// the sequence numbers and the raw numbers always agree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightActOrdering {
    is_first_night: bool,

    /// Acting characters, first to act first.
    order: Vec<CharacterId>,

    /// Sequence number (0 = acts first) of each acting character.
    acting: FxHashMap<CharacterId, usize>,

    not_acting: FxHashSet<CharacterId>,

    /// Raw night sheet number of every character, `0` for not acting.
    act_orders: FxHashMap<CharacterId, u32>,
}

impl NightActOrdering {
    /// Build an ordering from raw sheet numbers, `0` meaning not acting.
    ///
    /// Acting characters are sorted ascending by number; equal numbers keep
    /// their input order. A character listed twice keeps its first entry.
    pub fn from_numbers(
        is_first_night: bool,
        numbers: impl IntoIterator<Item = (CharacterId, u32)>,
    ) -> Self {
        let mut ordering = Self {
            is_first_night,
            ..Self::default()
        };

        let mut queue = Vec::new();
        for (character, number) in numbers {
            if ordering.act_orders.contains_key(&character) {
                continue;
            }
            ordering.act_orders.insert(character, number);

            if number == 0 {
                ordering.not_acting.insert(character);
            } else {
                queue.push((number, character));
            }
        }

        queue.sort_by_key(|&(number, _)| number);
        ordering.fill(queue.into_iter().map(|(_, character)| character));
        ordering
    }

    fn fill(&mut self, order: impl IntoIterator<Item = CharacterId>) {
        for character in order {
            self.acting.insert(character, self.order.len());
            self.order.push(character);
        }
    }

    /// Restrict to a subset of the characters.
    ///
    /// The subset keeps the relative order of this ordering. Fails with
    /// [`NightSheetError::CharacterNotInOrdering`] for a character this
    /// ordering has never seen.
    pub fn subset(
        &self,
        characters: impl IntoIterator<Item = CharacterId>,
    ) -> Result<NightActOrdering, NightSheetError> {
        let mut subset = Self {
            is_first_night: self.is_first_night,
            ..Self::default()
        };

        let mut queue = Vec::new();
        for character in characters {
            let number = self.act_order(character)?;
            if subset.act_orders.insert(character, number).is_some() {
                continue;
            }

            match self.acting.get(&character) {
                Some(&sequence) => queue.push((sequence, character)),
                None => {
                    subset.not_acting.insert(character);
                }
            }
        }

        queue.sort_unstable_by_key(|&(sequence, _)| sequence);
        subset.fill(queue.into_iter().map(|(_, character)| character));
        Ok(subset)
    }

    /// First night or other nights.
    #[must_use]
    pub fn is_first_night(&self) -> bool {
        self.is_first_night
    }

    /// Acting characters, first to act first.
    #[must_use]
    pub fn order(&self) -> &[CharacterId] {
        &self.order
    }

    /// Characters that do not act.
    #[must_use]
    pub fn not_acting(&self) -> &FxHashSet<CharacterId> {
        &self.not_acting
    }

    /// Sequence number of an acting character, `None` when not acting.
    #[must_use]
    pub fn sequence_number(&self, character: CharacterId) -> Option<usize> {
        self.acting.get(&character).copied()
    }

    /// Raw night sheet number, `0` when not acting.
    pub fn act_order(&self, character: CharacterId) -> Result<u32, NightSheetError> {
        self.act_orders
            .get(&character)
            .copied()
            .ok_or(NightSheetError::CharacterNotInOrdering { character })
    }

    /// Effect resolution priority of a character: the earlier it acts, the
    /// higher. Characters that do not act get [`NOT_ACTING_PRIORITY`].
    pub fn priority(&self, character: CharacterId) -> Result<i64, NightSheetError> {
        Ok(match self.act_order(character)? {
            0 => NOT_ACTING_PRIORITY,
            order => ACTING_ADJUSTMENT - i64::from(order),
        })
    }

    #[must_use]
    pub fn is_acting(&self, character: CharacterId) -> bool {
        self.acting.contains_key(&character)
    }

    #[must_use]
    pub fn contains(&self, character: CharacterId) -> bool {
        self.act_orders.contains_key(&character)
    }

    /// Number of characters covered, acting or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.act_orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.act_orders.is_empty()
    }
}

impl std::fmt::Display for NightActOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = if self.is_first_night {
            "First Night"
        } else {
            "Other Nights"
        };
        writeln!(f, "Night Act Order ({side})")?;

        for (i, character) in self.order.iter().enumerate() {
            writeln!(f, "{} => {}", i + 1, character)?;
        }

        let mut idle: Vec<_> = self.not_acting.iter().copied().collect();
        idle.sort_unstable();
        let idle: Vec<String> = idle.iter().map(ToString::to_string).collect();
        write!(f, "Characters not acting: {}", idle.join(", "))
    }
}

/// Compute the night act ordering of `characters` for one category of night.
///
/// Characters whose order is idle or undefined do not act.
pub fn night_act_ordering<'c>(
    characters: impl IntoIterator<Item = &'c CharacterDefinition>,
    is_first_night: bool,
) -> NightActOrdering {
    NightActOrdering::from_numbers(
        is_first_night,
        characters.into_iter().map(|c| {
            let number = c.night_order(is_first_night).number().unwrap_or(0);
            (c.id, number)
        }),
    )
}
