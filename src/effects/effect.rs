//! Effect definitions.
//!
//! An effect is the influence of a character's ability on one entity. It
//! decides whether it applies to an access (`is_applicable`) and how it
//! changes the access (`apply`), and it resolves in priority order with
//! every other effect attached to the same entity.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::core::{Duration, GamePhase, GamePhaseKind};
use crate::error::EffectError;
use crate::interaction::{Prompt, StorytellerGate};
use crate::pipeline::{Middleware, Next};

use super::context::{AccessContext, Interceptable};

/// Shared handle to an attached effect. Identity is the allocation.
pub type EffectRef<T> = Arc<dyn Effect<T>>;

/// The lower-priority remainder of an effect chain.
pub type EffectNext<'n, 'a, T> = Next<'n, EffectRef<T>, AccessContext<'a, T>, EffectError>;

/// Outcome of applying an effect.
pub type EffectResult<'a, T> = Result<AccessContext<'a, T>, EffectError>;

/// A prioritized, duration-scoped behavior modifier for entities of type `T`.
///
/// ## Priority
///
/// Higher priority resolves first and wraps every lower-priority effect.
/// Priority may depend on the kind of phase (first night, other nights,
/// other phases); it is read when the registry orders its effects, so it
/// must not change while the effect is attached.
///
/// ## Applying
///
/// `apply` receives the context and the rest of the chain. It may:
/// - call `next.run(ctx)` and then adjust the result (post-processing)
/// - set a result without calling `next` (replacement)
/// - return an error, which aborts the whole access
pub trait Effect<T: Interceptable>: Send + Sync {
    /// Name for logs and prompts.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Resolution priority for a kind of phase.
    fn priority(&self, kind: GamePhaseKind) -> i64;

    /// Validity window. `None` means always valid once attached.
    fn duration(&self) -> Option<Duration> {
        None
    }

    /// Storyteller-controlled on/off switch, if the effect has one.
    fn activation(&self) -> Option<&Activation> {
        None
    }

    /// Check if the effect is switched on and within its duration.
    fn is_in_effect(&self, phase: GamePhase) -> bool {
        self.activation().map_or(true, Activation::is_active)
            && self.duration().map_or(true, |d| d.is_active_at(phase))
    }

    /// Check if the effect takes part in resolving this access.
    fn is_applicable(&self, ctx: &AccessContext<'_, T>) -> bool {
        self.is_in_effect(ctx.phase())
    }

    /// Apply the effect to an access.
    fn apply<'a>(&self, ctx: AccessContext<'a, T>, next: EffectNext<'_, 'a, T>)
        -> EffectResult<'a, T>;
}

impl<'a, T: Interceptable> Middleware<AccessContext<'a, T>, EffectError> for EffectRef<T> {
    fn handle(
        &self,
        ctx: AccessContext<'a, T>,
        next: Next<'_, Self, AccessContext<'a, T>, EffectError>,
    ) -> EffectResult<'a, T> {
        self.apply(ctx, next)
    }
}

/// On/off switch for an effect, flipped only with storyteller consent.
#[derive(Debug)]
pub struct Activation {
    active: AtomicBool,
}

impl Activation {
    /// A switch that starts on.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Switch off if the storyteller confirms. Returns whether it happened.
    pub async fn deactivate<G>(&self, gate: &G, effect: &str, reason: Option<&str>) -> bool
    where
        G: StorytellerGate + ?Sized,
    {
        self.toggle(gate, false, effect, reason).await
    }

    /// Switch back on if the storyteller confirms. Returns whether it happened.
    pub async fn reactivate<G>(&self, gate: &G, effect: &str, reason: Option<&str>) -> bool
    where
        G: StorytellerGate + ?Sized,
    {
        self.toggle(gate, true, effect, reason).await
    }

    async fn toggle<G>(&self, gate: &G, active: bool, effect: &str, reason: Option<&str>) -> bool
    where
        G: StorytellerGate + ?Sized,
    {
        let verb = if active { "reactivate" } else { "deactivate" };
        let prompt = Prompt::new(format!("should {verb} {effect}")).because(reason);

        let answer = gate.confirm(&prompt).await;
        if !answer.is_confirmed() {
            debug!(effect, verb, ?answer, "effect toggle not confirmed");
            return false;
        }

        self.active.store(active, Ordering::Release);
        debug!(effect, verb, "effect toggled");
        true
    }
}

impl Default for Activation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{AutoConfirm, Confirmation, ScriptedGate};

    #[tokio::test]
    async fn test_activation_requires_confirmation() {
        let activation = Activation::new();
        let gate = ScriptedGate::new()
            .with_confirmations([Confirmation::Rejected, Confirmation::Confirmed]);

        assert!(activation.is_active());
        assert!(!activation.deactivate(&gate, "Poison", Some("poisoner died")).await);
        assert!(activation.is_active());
        assert!(activation.deactivate(&gate, "Poison", None).await);
        assert!(!activation.is_active());

        assert_eq!(
            gate.asked()[0].to_string(),
            "should deactivate Poison because poisoner died?"
        );
    }

    #[tokio::test]
    async fn test_reactivate() {
        let activation = Activation::new();
        assert!(activation.deactivate(&AutoConfirm, "Drunk", None).await);
        assert!(activation.reactivate(&AutoConfirm, "Drunk", None).await);
        assert!(activation.is_active());
    }
}
