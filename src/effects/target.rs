//! Entities wrapped for interception.
//!
//! An [`EffectTarget`] owns an entity and the effects attached to it. All
//! game logic goes through a view: [`EffectTarget::view`] for the
//! canonical perspective, [`EffectTarget::from`] for what a particular
//! initiator perceives.

use tracing::trace;

use crate::core::{EntityId, GamePhase};
use crate::error::EffectError;

use super::context::{unsupported, Access, AccessContext, AccessKind, AccessOf, Interceptable};
use super::effect::EffectRef;
use super::registry::Effects;

/// An entity together with the effects that modify it.
pub struct EffectTarget<T: Interceptable> {
    entity: T,
    effects: Effects<T>,
}

impl<T: Interceptable> EffectTarget<T> {
    /// Wrap an entity with no effects.
    pub fn new(entity: T) -> Self {
        Self {
            entity,
            effects: Effects::new(),
        }
    }

    /// Wrap an entity and attach its innate effects.
    ///
    /// `init` sees the bare entity, so it can pick effects based on its state.
    pub fn with_effects(entity: T, init: impl FnOnce(&T, &mut Effects<T>)) -> Self {
        let mut effects = Effects::new();
        init(&entity, &mut effects);
        Self { entity, effects }
    }

    /// Attach an effect. Returns `false` if it was already attached.
    pub fn attach(&mut self, effect: EffectRef<T>) -> bool {
        self.effects.add(effect)
    }

    /// Detach an effect. Returns `false` if it was not attached.
    pub fn detach(&mut self, effect: &EffectRef<T>) -> bool {
        self.effects.remove(effect)
    }

    #[must_use]
    pub fn has_effect(&self, effect: &EffectRef<T>) -> bool {
        self.effects.contains(effect)
    }

    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    /// Drop effects that have run out by `now`.
    pub fn prune_expired(&mut self, now: GamePhase) -> usize {
        self.effects.prune_expired(now)
    }

    /// The bare entity, bypassing every effect.
    ///
    /// Reserved for the storyteller and for effects inspecting the truth.
    #[must_use]
    pub fn raw(&self) -> &T {
        &self.entity
    }

    pub fn into_inner(self) -> T {
        self.entity
    }

    /// The canonical view: no initiator.
    #[must_use]
    pub fn view(&self) -> View<'_, T> {
        self.from(None)
    }

    /// The entity as perceived by `initiator`.
    #[must_use]
    pub fn from(&self, initiator: Option<EntityId>) -> View<'_, T> {
        View {
            target: self,
            initiator,
        }
    }

    /// Canonical mutable view.
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        self.from_mut(None)
    }

    /// Mutable view on behalf of `initiator`.
    pub fn from_mut(&mut self, initiator: Option<EntityId>) -> ViewMut<'_, T> {
        ViewMut {
            target: self,
            initiator,
        }
    }

    fn resolve(
        &self,
        access: AccessOf<T>,
        initiator: Option<EntityId>,
        now: GamePhase,
    ) -> Result<(AccessOf<T>, Option<T::Value>), EffectError> {
        let ctx = AccessContext::new(access, &self.entity, initiator, now);
        Ok(self.effects.apply(ctx)?.into_outcome())
    }

    fn read_as(
        &self,
        initiator: Option<EntityId>,
        now: GamePhase,
        member: T::Member,
    ) -> Result<T::Value, EffectError> {
        match self.resolve(Access::read(member), initiator, now)? {
            (_, Some(value)) => Ok(value),
            (_, None) => self.entity.read(member),
        }
    }

    fn write_as(
        &mut self,
        initiator: Option<EntityId>,
        now: GamePhase,
        member: T::Member,
        value: T::Value,
    ) -> Result<(), EffectError> {
        let (access, result) = self.resolve(Access::write(member, value), initiator, now)?;
        if result.is_some() {
            trace!(?member, ?initiator, "write handled by effects");
            return Ok(());
        }

        let value = access
            .args
            .into_iter()
            .next()
            .ok_or_else(|| unsupported(AccessKind::Write, member))?;
        self.entity.write(member, value)
    }

    fn invoke_as(
        &mut self,
        initiator: Option<EntityId>,
        now: GamePhase,
        member: T::Member,
        args: Vec<T::Value>,
    ) -> Result<T::Value, EffectError> {
        let (access, result) = self.resolve(Access::invoke(member, args), initiator, now)?;
        match result {
            Some(value) => {
                trace!(?member, ?initiator, "invocation handled by effects");
                Ok(value)
            }
            None => self.entity.invoke(member, &access.args),
        }
    }
}

impl<T: Interceptable + std::fmt::Debug> std::fmt::Debug for EffectTarget<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectTarget")
            .field("entity", &self.entity)
            .field("effects", &self.effects)
            .finish()
    }
}

/// Read-only perspective on an [`EffectTarget`].
///
/// Views compare equal when they look at the same target on behalf of the
/// same initiator.
pub struct View<'t, T: Interceptable> {
    target: &'t EffectTarget<T>,
    initiator: Option<EntityId>,
}

impl<'t, T: Interceptable> View<'t, T> {
    #[must_use]
    pub fn initiator(&self) -> Option<EntityId> {
        self.initiator
    }

    /// Same target, different initiator. Perspectives replace, not stack.
    #[must_use]
    pub fn from(self, initiator: Option<EntityId>) -> View<'t, T> {
        self.target.from(initiator)
    }

    /// The canonical view of the same target.
    #[must_use]
    pub fn canonical(self) -> View<'t, T> {
        self.target.view()
    }

    #[must_use]
    pub fn target(&self) -> &'t EffectTarget<T> {
        self.target
    }

    /// Read `member` as this view's initiator perceives it at `now`.
    pub fn read(&self, now: GamePhase, member: T::Member) -> Result<T::Value, EffectError> {
        self.target.read_as(self.initiator, now, member)
    }
}

impl<T: Interceptable> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Interceptable> Copy for View<'_, T> {}

impl<T: Interceptable> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.target, other.target) && self.initiator == other.initiator
    }
}

impl<T: Interceptable> Eq for View<'_, T> {}

impl<T: Interceptable> std::fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("target", &(self.target as *const EffectTarget<T>))
            .field("initiator", &self.initiator)
            .finish()
    }
}

/// Mutable perspective: reads, writes and invocations.
pub struct ViewMut<'t, T: Interceptable> {
    target: &'t mut EffectTarget<T>,
    initiator: Option<EntityId>,
}

impl<'t, T: Interceptable> ViewMut<'t, T> {
    #[must_use]
    pub fn initiator(&self) -> Option<EntityId> {
        self.initiator
    }

    /// Same target, different initiator.
    #[must_use]
    pub fn from(self, initiator: Option<EntityId>) -> ViewMut<'t, T> {
        ViewMut {
            target: self.target,
            initiator,
        }
    }

    /// Borrow as a read-only view with the same initiator.
    #[must_use]
    pub fn as_view(&self) -> View<'_, T> {
        self.target.from(self.initiator)
    }

    pub fn read(&self, now: GamePhase, member: T::Member) -> Result<T::Value, EffectError> {
        self.target.read_as(self.initiator, now, member)
    }

    /// Write `member`. Effects may rewrite the value or absorb the write.
    pub fn write(
        &mut self,
        now: GamePhase,
        member: T::Member,
        value: T::Value,
    ) -> Result<(), EffectError> {
        self.target.write_as(self.initiator, now, member, value)
    }

    /// Invoke `member`. Effects may rewrite the arguments or answer in its place.
    pub fn invoke(
        &mut self,
        now: GamePhase,
        member: T::Member,
        args: impl IntoIterator<Item = T::Value>,
    ) -> Result<T::Value, EffectError> {
        let args = args.into_iter().collect();
        self.target.invoke_as(self.initiator, now, member, args)
    }
}
