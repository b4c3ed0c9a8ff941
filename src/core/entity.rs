//! Entity identification.
//!
//! Every participant that can initiate an interaction (a player, a
//! character's ability, the storyteller) is named by an `EntityId`.
//! The engine never interprets the number; games allocate them.
//!
//! ```
//! use grimoire::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::new();
//! let alice = ids.allocate();
//! let bob = ids.allocate();
//!
//! assert_ne!(alice, bob);
//! assert_eq!(alice, EntityId::new(1));
//! assert!(EntityId::STORYTELLER.is_storyteller());
//! ```

use serde::{Deserialize, Serialize};

/// Opaque identity of an interaction initiator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identity for the storyteller.
    pub const STORYTELLER: EntityId = EntityId(0);

    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_storyteller(self) -> bool {
        self.0 == Self::STORYTELLER.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_storyteller() {
            write!(f, "Storyteller")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

/// Hands out fresh entity IDs, skipping the storyteller's.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityAllocator {
    next_id: u32,
}

impl EntityAllocator {
    #[must_use]
    pub const fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate the next ID.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Entity(5)");
        assert_eq!(format!("{}", EntityId::STORYTELLER), "Storyteller");
    }

    #[test]
    fn test_allocator_never_yields_storyteller() {
        let mut ids = EntityAllocator::default();
        let allocated: Vec<_> = (0..10).map(|_| ids.allocate()).collect();

        assert!(allocated.iter().all(|id| !id.is_storyteller()));
        assert_eq!(allocated[9], EntityId::new(10));
    }
}
