//! Abilities as effect factories.
//!
//! When a character becomes active (assigned at setup, gained mid-game,
//! restored after losing its ability), its ability produces the effects it
//! places on entities. The engine never parses ability text; games
//! implement [`AbilityFactory`] per character.

use tracing::debug;

use super::definition::CharacterId;
use crate::core::{EntityId, GamePhase};
use crate::effects::{EffectRef, EffectTarget, Interceptable};

/// Where and when an ability is being activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityContext {
    /// The character whose ability this is.
    pub character: CharacterId,
    /// The entity holding the character.
    pub holder: EntityId,
    /// When the ability became active.
    pub phase: GamePhase,
}

impl AbilityContext {
    #[must_use]
    pub const fn new(character: CharacterId, holder: EntityId, phase: GamePhase) -> Self {
        Self {
            character,
            holder,
            phase,
        }
    }
}

/// Produces the effects a character's ability places on entities of type `T`.
pub trait AbilityFactory<T: Interceptable>: Send + Sync {
    /// The character this factory belongs to.
    fn character(&self) -> CharacterId;

    /// Effects to attach when the ability becomes active. May be empty.
    fn effects(&self, ctx: &AbilityContext) -> Vec<EffectRef<T>>;
}

impl<T, F> AbilityFactory<T> for (CharacterId, F)
where
    T: Interceptable,
    F: Fn(&AbilityContext) -> Vec<EffectRef<T>> + Send + Sync,
{
    fn character(&self) -> CharacterId {
        self.0
    }

    fn effects(&self, ctx: &AbilityContext) -> Vec<EffectRef<T>> {
        (self.1)(ctx)
    }
}

/// Activate an ability and attach what it produces to `target`.
///
/// Returns the number of effects newly attached.
pub fn activate<T, A>(ability: &A, ctx: &AbilityContext, target: &mut EffectTarget<T>) -> usize
where
    T: Interceptable,
    A: AbilityFactory<T> + ?Sized,
{
    let mut attached = 0;
    for effect in ability.effects(ctx) {
        if target.attach(effect) {
            attached += 1;
        }
    }

    debug!(
        character = %ctx.character,
        holder = %ctx.holder,
        phase = %ctx.phase,
        attached,
        "ability activated"
    );
    attached
}
