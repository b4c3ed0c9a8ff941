//! The session clock.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ClockConfig, GamePhase, Phase};
use crate::error::TemporalError;
use crate::interaction::{Confirmation, Prompt, StorytellerGate};

use super::moment::{DateRecord, Moment, Rewind};

/// Result of an attempted phase transition.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// The clock moved to this phase.
    Advanced(GamePhase),

    /// The storyteller did not confirm; nothing changed. Safe to retry.
    NotAdvanced(Confirmation),
}

impl Advance {
    #[must_use]
    pub const fn is_advanced(self) -> bool {
        matches!(self, Advance::Advanced(_))
    }
}

/// The time authority of a session.
///
/// Starts at setup and only moves forward through [`Clock::advance`].
/// Every phase reached is recorded once in an append-only history that
/// can be looked up by `GamePhase`, grouped by date, or walked backwards.
///
/// History uses `im::Vector`, so cloning a clock to keep a snapshot is cheap.
/// Each phase sits at the history position equal to its counter, so no
/// separate index is kept.
#[derive(Clone, Debug)]
pub struct Clock {
    config: ClockConfig,
    current: GamePhase,
    history: Vector<Moment>,
}

impl Clock {
    /// Create a clock at setup with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClockConfig::default())
    }

    /// Create a clock at setup.
    #[must_use]
    pub fn with_config(config: ClockConfig) -> Self {
        let setup = GamePhase::setup();

        Self {
            config,
            current: setup,
            history: Vector::unit(Moment {
                when: setup,
                ordinal: 0,
                reason: None,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The phase the session is in.
    #[must_use]
    pub fn current(&self) -> GamePhase {
        self.current
    }

    /// The moment the current phase was reached.
    #[must_use]
    pub fn current_moment(&self) -> Option<&Moment> {
        self.history.last()
    }

    /// Moments of the current date.
    #[must_use]
    pub fn today(&self) -> DateRecord<'_> {
        self.date_record(self.current.date_index())
    }

    /// Moment for `phase` within today, or `None` if not reached yet.
    #[must_use]
    pub fn get_moment(&self, phase: Phase) -> Option<&Moment> {
        self.today().get_moment(phase)
    }

    /// Moment at which `when` was reached, anywhere in history.
    #[must_use]
    pub fn moment_of(&self, when: GamePhase) -> Option<&Moment> {
        self.history.get(position(when))
    }

    /// All recorded moments, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Moment> {
        self.history.iter()
    }

    /// Number of recorded moments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always `false`: setup is recorded at creation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Moments of a past date.
    ///
    /// Recall only inspects the past: fails with
    /// [`TemporalError::RecallFutureDate`] when `date_index` is today or later.
    pub fn recall(&self, date_index: u32) -> Result<DateRecord<'_>, TemporalError> {
        let current = self.current.date_index();
        if date_index >= current {
            return Err(TemporalError::RecallFutureDate {
                requested: date_index,
                current,
            });
        }
        Ok(self.date_record(date_index))
    }

    /// Walk backwards from the current moment to `target`.
    ///
    /// Yields the recorded moments strictly between `target` and the current
    /// moment, newest first. Empty if `target` is not before the current phase.
    pub fn rewind(&self, target: impl Into<GamePhase>) -> Rewind<'_> {
        let target = target.into();
        let high = self.history.len().saturating_sub(1);

        if target >= self.current {
            return Rewind::new(&self.history, high, high);
        }

        Rewind::new(&self.history, position(target) + 1, high)
    }

    /// Move to the next phase.
    ///
    /// When transitions are confirmed (the default), the storyteller is asked
    /// first and nothing changes until the answer arrives. Anything but an
    /// explicit confirmation leaves the clock untouched and returns
    /// [`Advance::NotAdvanced`].
    pub async fn advance<G>(&mut self, gate: &G, reason: Option<&str>) -> Advance
    where
        G: StorytellerGate + ?Sized,
    {
        let from = self.current;
        let to = from.next();

        if self.config.confirm_transitions {
            let prompt = Prompt::new(format!("Should transition from {from} to next phase"))
                .because(reason);
            let answer = gate.confirm(&prompt).await;

            if !answer.is_confirmed() {
                debug!(%from, ?answer, "phase transition not confirmed");
                return Advance::NotAdvanced(answer);
            }
        }

        self.commit(to, reason);
        info!(%from, %to, date = to.date_index(), "phase advanced");
        Advance::Advanced(to)
    }

    fn commit(&mut self, when: GamePhase, reason: Option<&str>) {
        let ordinal = self.history.len();
        debug_assert_eq!(ordinal, position(when));

        self.history.push_back(Moment {
            when,
            ordinal,
            reason: reason.map(str::to_owned),
        });
        self.current = when;
    }

    fn date_record(&self, date_index: u32) -> DateRecord<'_> {
        let len = self.history.len();
        let start_of = |date: u32| {
            let opening = if date == 0 { Phase::Setup } else { Phase::Dawn };
            GamePhase::at(date, opening).map_or(len, |first| position(first).min(len))
        };

        let start = start_of(date_index);
        let end = date_index.checked_add(1).map_or(len, start_of);
        DateRecord::new(date_index, &self.history, start..end)
    }
}

/// History position of a phase.
fn position(when: GamePhase) -> usize {
    when.counter() as usize
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Date {} {}",
            self.current.date_index(),
            self.current.phase()
        )
    }
}
