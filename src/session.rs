//! A running session.
//!
//! A `Session` owns the clock and the night sheet of one game, both built
//! from a single [`EngineConfig`]. Its queries span both subsystems, so
//! they report the crate-level [`Error`](crate::error::Error).

use tracing::debug;

use crate::characters::{CharacterId, CharacterRegistry};
use crate::clock::{Advance, Clock, DateRecord};
use crate::core::{Duration, EngineConfig, GamePhase};
use crate::error::Result;
use crate::interaction::StorytellerGate;
use crate::night::{NightActOrdering, NightSheet};

/// The clock and night sheet of one game.
#[derive(Clone, Debug)]
pub struct Session {
    config: EngineConfig,
    clock: Clock,
    night_sheet: NightSheet,
}

impl Session {
    /// Start a session at setup with an empty night sheet.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        debug!(?config, "session created");
        Self {
            clock: Clock::with_config(config.clock.clone()),
            night_sheet: NightSheet::new(config.night.clone()),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[must_use]
    pub fn night_sheet(&self) -> &NightSheet {
        &self.night_sheet
    }

    /// The phase the session is in.
    #[must_use]
    pub fn now(&self) -> GamePhase {
        self.clock.current()
    }

    /// Build the night sheet for the characters in play.
    pub async fn prepare_night_sheet<G>(
        &mut self,
        characters: &[CharacterId],
        registry: &CharacterRegistry,
        gate: &G,
    ) -> Result<()>
    where
        G: StorytellerGate + ?Sized,
    {
        self.night_sheet
            .init_from_registry(characters, registry, gate)
            .await?;
        Ok(())
    }

    /// Move the clock to the next phase. See [`Clock::advance`].
    pub async fn advance<G>(&mut self, gate: &G, reason: Option<&str>) -> Advance
    where
        G: StorytellerGate + ?Sized,
    {
        self.clock.advance(gate, reason).await
    }

    /// Tonight's ordering, `None` outside the night.
    pub fn tonight(&self) -> Result<Option<&NightActOrdering>> {
        Ok(self.night_sheet.tonight(self.now())?)
    }

    /// Resolution priority of a character tonight, `None` outside the night.
    pub fn night_priority(&self, character: CharacterId) -> Result<Option<i64>> {
        match self.tonight()? {
            Some(ordering) => Ok(Some(ordering.priority(character)?)),
            None => Ok(None),
        }
    }

    /// Moments of a past date. See [`Clock::recall`].
    pub fn recall(&self, date_index: u32) -> Result<DateRecord<'_>> {
        Ok(self.clock.recall(date_index)?)
    }

    /// A duration starting now and ending at `end`.
    ///
    /// Fails with [`Error::Temporal`](crate::error::Error::Temporal) when
    /// `end` is not in the future.
    pub fn until(&self, end: GamePhase) -> Result<Duration> {
        Ok(Duration::until(self.now(), end)?)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
