//! Per-entity effect registry.

use std::cmp::Reverse;
use std::sync::{Arc, OnceLock};

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{GamePhase, GamePhaseKind};
use crate::error::EffectError;
use crate::pipeline::Next;

use super::context::{AccessContext, Interceptable};
use super::effect::EffectRef;

/// Effects active for a single access, outermost first.
pub type Chain<T> = SmallVec<[EffectRef<T>; 8]>;

struct Attached<T: Interceptable> {
    effect: EffectRef<T>,
    sequence: u64,
}

/// The effects attached to one entity.
///
/// Resolution order is priority descending; effects with equal priority
/// keep the order they were attached in. The order is computed lazily per
/// [`GamePhaseKind`] and discarded whenever the set changes.
pub struct Effects<T: Interceptable> {
    attached: Vec<Attached<T>>,
    next_sequence: u64,
    order: [OnceLock<Vec<usize>>; 3],
}

impl<T: Interceptable> Effects<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: Vec::new(),
            next_sequence: 0,
            order: Default::default(),
        }
    }

    /// Attach an effect. Attaching the same effect twice is a no-op.
    ///
    /// Returns `true` if the effect was newly attached.
    pub fn add(&mut self, effect: EffectRef<T>) -> bool {
        if self.contains(&effect) {
            return false;
        }
        trace!(effect = effect.name(), sequence = self.next_sequence, "effect attached");
        self.attached.push(Attached {
            effect,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.invalidate();
        true
    }

    /// Detach an effect. Returns `true` if it was attached.
    pub fn remove(&mut self, effect: &EffectRef<T>) -> bool {
        let Some(index) = self.position(effect) else {
            return false;
        };
        self.attached.remove(index);
        self.invalidate();
        true
    }

    #[must_use]
    pub fn contains(&self, effect: &EffectRef<T>) -> bool {
        self.position(effect).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Effects in resolution order for a kind of phase.
    pub fn ordered(&self, kind: GamePhaseKind) -> impl Iterator<Item = &EffectRef<T>> {
        self.order(kind).iter().map(|&i| &self.attached[i].effect)
    }

    /// The effects that take part in resolving `ctx`, in resolution order.
    #[must_use]
    pub fn applicable(&self, ctx: &AccessContext<'_, T>) -> Chain<T> {
        self.ordered(ctx.phase_kind())
            .filter(|effect| effect.is_applicable(ctx))
            .cloned()
            .collect()
    }

    /// Run an access through every applicable effect.
    ///
    /// With nothing applicable the context comes back untouched.
    pub fn apply<'a>(&self, ctx: AccessContext<'a, T>) -> Result<AccessContext<'a, T>, EffectError> {
        let chain = self.applicable(&ctx);
        if chain.is_empty() {
            return Ok(ctx);
        }

        trace!(
            kind = ?ctx.kind(),
            member = ?ctx.member(),
            initiator = ?ctx.initiator(),
            phase = %ctx.phase(),
            active = chain.len(),
            "resolving access through effects"
        );
        Next::new(chain.as_slice()).run(ctx)
    }

    /// Detach every effect whose duration has ended by `now`.
    ///
    /// Returns the number of effects removed.
    pub fn prune_expired(&mut self, now: GamePhase) -> usize {
        let before = self.attached.len();
        self.attached.retain(|a| {
            let expired = a.effect.duration().is_some_and(|d| d.has_ended_at(now));
            if expired {
                trace!(effect = a.effect.name(), %now, "effect expired");
            }
            !expired
        });

        let removed = before - self.attached.len();
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    fn position(&self, effect: &EffectRef<T>) -> Option<usize> {
        let wanted = Arc::as_ptr(effect).cast::<()>();
        self.attached
            .iter()
            .position(|a| Arc::as_ptr(&a.effect).cast::<()>() == wanted)
    }

    fn order(&self, kind: GamePhaseKind) -> &[usize] {
        self.order[kind.index()].get_or_init(|| {
            let mut order: Vec<usize> = (0..self.attached.len()).collect();
            order.sort_by_cached_key(|&i| {
                let attached = &self.attached[i];
                (Reverse(attached.effect.priority(kind)), attached.sequence)
            });
            order
        })
    }

    fn invalidate(&mut self) {
        self.order = Default::default();
    }
}

impl<T: Interceptable> Default for Effects<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interceptable> std::fmt::Debug for Effects<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.attached.iter().map(|a| a.effect.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Duration;
    use crate::effects::{Access, Effect, EffectNext, EffectResult};

    #[derive(Debug, Default)]
    struct Counter {
        base: i64,
    }

    impl Interceptable for Counter {
        type Member = ();
        type Value = i64;

        fn read(&self, _member: ()) -> Result<i64, EffectError> {
            Ok(self.base)
        }
    }

    /// Appends its tag digit to the result: outer effects append last.
    struct Tag {
        tag: i64,
        priority: i64,
        duration: Option<Duration>,
    }

    impl Tag {
        fn new(tag: i64, priority: i64) -> EffectRef<Counter> {
            Arc::new(Self {
                tag,
                priority,
                duration: None,
            })
        }
    }

    impl Effect<Counter> for Tag {
        fn name(&self) -> &str {
            "Tag"
        }

        fn priority(&self, _kind: GamePhaseKind) -> i64 {
            self.priority
        }

        fn duration(&self) -> Option<Duration> {
            self.duration
        }

        fn apply<'a>(
            &self,
            ctx: AccessContext<'a, Counter>,
            next: EffectNext<'_, 'a, Counter>,
        ) -> EffectResult<'a, Counter> {
            let mut ctx = next.run(ctx)?;
            let so_far = ctx.result().copied().unwrap_or(0);
            ctx.set_result(so_far * 10 + self.tag);
            Ok(ctx)
        }
    }

    fn resolve(effects: &Effects<Counter>, counter: &Counter, now: GamePhase) -> Option<i64> {
        let ctx = AccessContext::new(Access::read(()), counter, None, now);
        effects.apply(ctx).unwrap().into_outcome().1
    }

    #[test]
    fn test_priority_then_attachment_order() {
        let mut effects = Effects::new();
        for (tag, priority) in [(1, 1), (2, 1), (3, 3), (4, 2), (5, 2), (6, 1)] {
            assert!(effects.add(Tag::new(tag, priority)));
        }

        let order: Vec<i64> = effects
            .ordered(GamePhaseKind::Other)
            .map(|e| e.priority(GamePhaseKind::Other))
            .collect();
        assert_eq!(order, vec![3, 2, 2, 1, 1, 1]);

        // innermost (last) appends first
        let counter = Counter::default();
        assert_eq!(
            resolve(&effects, &counter, GamePhase::first_night()),
            Some(621_543)
        );
    }

    #[test]
    fn test_applicable_in_resolution_order() {
        let start = GamePhase::first_night();
        let mut effects: Effects<Counter> = Effects::new();
        for (tag, priority) in [(1, 1), (2, 5), (3, 3)] {
            effects.add(Tag::new(tag, priority));
        }
        effects.add(Arc::new(Tag {
            tag: 4,
            priority: 9,
            duration: Some(Duration::one_phase(start)),
        }));

        let counter = Counter::default();
        let priorities = |now: GamePhase| -> Vec<i64> {
            let ctx = AccessContext::new(Access::read(()), &counter, None, now);
            effects
                .applicable(&ctx)
                .iter()
                .map(|e| e.priority(now.kind()))
                .collect()
        };

        assert_eq!(priorities(start), vec![9, 5, 3, 1]);
        assert_eq!(priorities(start.next()), vec![5, 3, 1]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut effects = Effects::new();
        let tag = Tag::new(1, 0);
        assert!(effects.add(tag.clone()));
        assert!(!effects.add(tag.clone()));
        assert_eq!(effects.len(), 1);

        assert!(effects.remove(&tag));
        assert!(!effects.remove(&tag));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let effects = Effects::<Counter>::new();
        let counter = Counter { base: 7 };
        assert_eq!(resolve(&effects, &counter, GamePhase::setup()), None);
    }

    #[test]
    fn test_order_refreshes_after_mutation() {
        let mut effects = Effects::new();
        effects.add(Tag::new(1, 1));
        let _ = effects.ordered(GamePhaseKind::Other).count();

        effects.add(Tag::new(2, 5));
        let first = effects.ordered(GamePhaseKind::Other).next().unwrap();
        assert_eq!(first.priority(GamePhaseKind::Other), 5);
    }

    #[test]
    fn test_prune_expired() {
        let start = GamePhase::first_night();
        let mut effects: Effects<Counter> = Effects::new();
        effects.add(Arc::new(Tag {
            tag: 1,
            priority: 0,
            duration: Some(Duration::one_phase(start)),
        }));
        effects.add(Arc::new(Tag {
            tag: 2,
            priority: 0,
            duration: Some(Duration::indefinite(start)),
        }));

        assert_eq!(effects.prune_expired(start), 0);
        assert_eq!(effects.prune_expired(start.next()), 1);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_expired_effect_not_applicable() {
        let start = GamePhase::first_night();
        let mut effects: Effects<Counter> = Effects::new();
        effects.add(Arc::new(Tag {
            tag: 4,
            priority: 0,
            duration: Some(Duration::one_phase(start)),
        }));

        let counter = Counter::default();
        assert_eq!(resolve(&effects, &counter, start), Some(4));
        assert_eq!(resolve(&effects, &counter, start.next()), None);
        assert_eq!(resolve(&effects, &counter, GamePhase::setup()), None);
    }
}
