//! Access contexts: every interaction with a wrapped entity as a value.
//!
//! Instead of trapping attribute lookups at runtime, an entity declares
//! which members can be read, written or invoked (its [`Interceptable`]
//! impl), and each access is described by an [`Access`]. The access travels
//! through the effect chain inside an [`AccessContext`] together with the
//! entity, the initiator and the current game phase.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, GamePhase, GamePhaseKind};
use crate::error::EffectError;

/// An entity whose accesses can be intercepted by effects.
///
/// `Member` names the attributes and methods the entity exposes, `Value`
/// is what they read, accept and return. Only `read` is required.
pub trait Interceptable: 'static {
    type Member: Copy + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;
    type Value: Clone + PartialEq + std::fmt::Debug + Send + Sync;

    /// Read an attribute.
    fn read(&self, member: Self::Member) -> Result<Self::Value, EffectError>;

    /// Write an attribute.
    fn write(&mut self, member: Self::Member, _value: Self::Value) -> Result<(), EffectError> {
        Err(unsupported(AccessKind::Write, member))
    }

    /// Invoke a method.
    fn invoke(
        &mut self,
        member: Self::Member,
        _args: &[Self::Value],
    ) -> Result<Self::Value, EffectError> {
        Err(unsupported(AccessKind::Invoke, member))
    }
}

/// Error for an access an entity does not support.
pub fn unsupported<M: std::fmt::Debug>(kind: AccessKind, member: M) -> EffectError {
    EffectError::UnsupportedAccess {
        kind,
        member: format!("{member:?}"),
    }
}

/// What kind of access is being made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    Read,
    Write,
    Invoke,
}

/// A single access: kind, member, arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Access<M, V> {
    pub kind: AccessKind,
    pub member: M,
    pub args: SmallVec<[V; 2]>,
}

impl<M, V> Access<M, V> {
    pub fn read(member: M) -> Self {
        Self {
            kind: AccessKind::Read,
            member,
            args: SmallVec::new(),
        }
    }

    pub fn write(member: M, value: V) -> Self {
        let mut args = SmallVec::new();
        args.push(value);
        Self {
            kind: AccessKind::Write,
            member,
            args,
        }
    }

    pub fn invoke(member: M, args: impl IntoIterator<Item = V>) -> Self {
        Self {
            kind: AccessKind::Invoke,
            member,
            args: args.into_iter().collect(),
        }
    }
}

/// Access type for an entity.
pub type AccessOf<T> = Access<<T as Interceptable>::Member, <T as Interceptable>::Value>;

/// An access in flight through an effect chain.
///
/// `result` starts empty. An effect that sets it decides what the access
/// yields; for writes and invocations a result also means the real
/// operation is skipped.
pub struct AccessContext<'a, T: Interceptable> {
    access: AccessOf<T>,
    target: &'a T,
    initiator: Option<EntityId>,
    phase: GamePhase,
    result: Option<T::Value>,
}

impl<'a, T: Interceptable> AccessContext<'a, T> {
    pub fn new(
        access: AccessOf<T>,
        target: &'a T,
        initiator: Option<EntityId>,
        phase: GamePhase,
    ) -> Self {
        Self {
            access,
            target,
            initiator,
            phase,
            result: None,
        }
    }

    #[must_use]
    pub fn access(&self) -> &AccessOf<T> {
        &self.access
    }

    #[must_use]
    pub fn kind(&self) -> AccessKind {
        self.access.kind
    }

    #[must_use]
    pub fn member(&self) -> T::Member {
        self.access.member
    }

    #[must_use]
    pub fn args(&self) -> &[T::Value] {
        &self.access.args
    }

    /// Arguments, for effects that rewrite what is written or passed.
    pub fn args_mut(&mut self) -> &mut SmallVec<[T::Value; 2]> {
        &mut self.access.args
    }

    /// The entity being accessed, without interception.
    #[must_use]
    pub fn target(&self) -> &'a T {
        self.target
    }

    #[must_use]
    pub fn initiator(&self) -> Option<EntityId> {
        self.initiator
    }

    /// The clock's current phase at the time of access.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn phase_kind(&self) -> GamePhaseKind {
        self.phase.kind()
    }

    #[must_use]
    pub fn result(&self) -> Option<&T::Value> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn set_result(&mut self, value: T::Value) {
        self.result = Some(value);
    }

    pub fn take_result(&mut self) -> Option<T::Value> {
        self.result.take()
    }

    /// Check for a read of `member`.
    #[must_use]
    pub fn is_read(&self, member: T::Member) -> bool {
        self.access.kind == AccessKind::Read && self.access.member == member
    }

    /// Check for a write of `member`.
    #[must_use]
    pub fn is_write(&self, member: T::Member) -> bool {
        self.access.kind == AccessKind::Write && self.access.member == member
    }

    /// Check for an invocation of `member`.
    #[must_use]
    pub fn is_invoke(&self, member: T::Member) -> bool {
        self.access.kind == AccessKind::Invoke && self.access.member == member
    }

    /// Check if `id` initiated this access.
    #[must_use]
    pub fn initiated_by(&self, id: EntityId) -> bool {
        self.initiator == Some(id)
    }

    /// Test the initiator. `false` when there is none.
    pub fn initiator_matches(&self, predicate: impl FnOnce(EntityId) -> bool) -> bool {
        self.initiator.is_some_and(predicate)
    }

    /// Read the accessed member straight from the entity.
    ///
    /// Lets an effect look at the real value before deciding what to report.
    pub fn forward(&self) -> Result<T::Value, EffectError> {
        self.target.read(self.access.member)
    }

    /// Split into the (possibly rewritten) access and the result.
    #[must_use]
    pub fn into_outcome(self) -> (AccessOf<T>, Option<T::Value>) {
        (self.access, self.result)
    }
}

impl<T: Interceptable> std::fmt::Debug for AccessContext<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessContext")
            .field("access", &self.access)
            .field("initiator", &self.initiator)
            .field("phase", &self.phase)
            .field("result", &self.result)
            .finish()
    }
}
