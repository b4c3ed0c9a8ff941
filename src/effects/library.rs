//! Reusable effects.
//!
//! Most character abilities boil down to one of two shapes: report a
//! different value for some attribute to some observers ([`Override`]), or
//! stop an action from going through ([`Suppress`]). Both are generic over
//! the entity type and carry a per-kind priority, an optional duration and
//! a storyteller switch.

use serde::{Deserialize, Serialize};

use crate::core::{Duration, EntityId, GamePhaseKind};

use super::context::{AccessContext, AccessKind, Interceptable};
use super::effect::{Activation, Effect, EffectNext, EffectResult};

/// Which initiators an effect applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    /// Every access, with or without initiator.
    #[default]
    Anyone,
    /// Only accesses made by this entity.
    Only(EntityId),
    /// Every access except those made by this entity.
    Except(EntityId),
}

impl Audience {
    #[must_use]
    pub fn admits(self, initiator: Option<EntityId>) -> bool {
        match self {
            Audience::Anyone => true,
            Audience::Only(id) => initiator == Some(id),
            Audience::Except(id) => initiator != Some(id),
        }
    }
}

/// Per-kind priority table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Priorities([i64; 3]);

impl Priorities {
    /// Same priority in every kind of phase.
    #[must_use]
    pub const fn uniform(priority: i64) -> Self {
        Self([priority; 3])
    }

    #[must_use]
    pub fn with(mut self, kind: GamePhaseKind, priority: i64) -> Self {
        self.0[kind.index()] = priority;
        self
    }

    #[must_use]
    pub fn get(&self, kind: GamePhaseKind) -> i64 {
        self.0[kind.index()]
    }
}

/// Makes reads of one member report a fixed value.
///
/// Lower-priority effects still run first, so the override has the final
/// word for the audience it targets. Poisoning (the poisoned flag reads
/// true) and mistaken identity (the character reads as another) are both
/// overrides.
pub struct Override<T: Interceptable> {
    name: String,
    member: T::Member,
    value: T::Value,
    audience: Audience,
    priorities: Priorities,
    duration: Option<Duration>,
    activation: Activation,
}

impl<T: Interceptable> Override<T> {
    pub fn new(name: impl Into<String>, member: T::Member, value: T::Value) -> Self {
        Self {
            name: name.into(),
            member,
            value,
            audience: Audience::Anyone,
            priorities: Priorities::default(),
            duration: None,
            activation: Activation::new(),
        }
    }

    #[must_use]
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priorities = Priorities::uniform(priority);
        self
    }

    #[must_use]
    pub fn with_priorities(mut self, priorities: Priorities) -> Self {
        self.priorities = priorities;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn audience(&self) -> Audience {
        self.audience
    }
}

impl<T: Interceptable> Effect<T> for Override<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self, kind: GamePhaseKind) -> i64 {
        self.priorities.get(kind)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn activation(&self) -> Option<&Activation> {
        Some(&self.activation)
    }

    fn is_applicable(&self, ctx: &AccessContext<'_, T>) -> bool {
        self.is_in_effect(ctx.phase())
            && ctx.is_read(self.member)
            && self.audience.admits(ctx.initiator())
    }

    fn apply<'a>(&self, ctx: AccessContext<'a, T>, next: EffectNext<'_, 'a, T>) -> EffectResult<'a, T> {
        let mut ctx = next.run(ctx)?;
        ctx.set_result(self.value.clone());
        Ok(ctx)
    }
}

/// Stops writes or invocations of one member, answering with a fixed value.
///
/// Lower-priority effects never see a suppressed access. Protection from
/// being killed is a suppression of the kill invocation.
pub struct Suppress<T: Interceptable> {
    name: String,
    kind: AccessKind,
    member: T::Member,
    outcome: T::Value,
    audience: Audience,
    priorities: Priorities,
    duration: Option<Duration>,
    activation: Activation,
}

impl<T: Interceptable> Suppress<T> {
    /// Suppress invocations of `member`, answering `outcome` instead.
    pub fn invocation(name: impl Into<String>, member: T::Member, outcome: T::Value) -> Self {
        Self::new(name, AccessKind::Invoke, member, outcome)
    }

    /// Suppress writes of `member`. `outcome` marks the write as absorbed.
    pub fn write(name: impl Into<String>, member: T::Member, outcome: T::Value) -> Self {
        Self::new(name, AccessKind::Write, member, outcome)
    }

    fn new(name: impl Into<String>, kind: AccessKind, member: T::Member, outcome: T::Value) -> Self {
        Self {
            name: name.into(),
            kind,
            member,
            outcome,
            audience: Audience::Anyone,
            priorities: Priorities::default(),
            duration: None,
            activation: Activation::new(),
        }
    }

    #[must_use]
    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priorities = Priorities::uniform(priority);
        self
    }

    #[must_use]
    pub fn with_priorities(mut self, priorities: Priorities) -> Self {
        self.priorities = priorities;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

impl<T: Interceptable> Effect<T> for Suppress<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self, kind: GamePhaseKind) -> i64 {
        self.priorities.get(kind)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn activation(&self) -> Option<&Activation> {
        Some(&self.activation)
    }

    fn is_applicable(&self, ctx: &AccessContext<'_, T>) -> bool {
        self.is_in_effect(ctx.phase())
            && ctx.kind() == self.kind
            && ctx.member() == self.member
            && self.audience.admits(ctx.initiator())
    }

    fn apply<'a>(&self, mut ctx: AccessContext<'a, T>, _next: EffectNext<'_, 'a, T>) -> EffectResult<'a, T> {
        ctx.set_result(self.outcome.clone());
        Ok(ctx)
    }
}
