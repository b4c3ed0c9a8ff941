//! Engine configuration.
//!
//! Sessions configure the engine at startup by providing:
//! - `ClockConfig`: How phase transitions are confirmed
//! - `NightSheetConfig`: What to do with characters whose night order is unknown
//! - `EngineConfig`: Combines all configuration
//!
//! All configuration is serializable so a host can load it from a file.

use serde::{Deserialize, Serialize};

/// Clock behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Ask the storyteller before every phase transition.
    ///
    /// When disabled, `advance` commits without consulting the gate.
    pub confirm_transitions: bool,
}

impl ClockConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit transitions without asking (builder pattern).
    #[must_use]
    pub fn unconfirmed(mut self) -> Self {
        self.confirm_transitions = false;
        self
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            confirm_transitions: true,
        }
    }
}

/// How to treat a character whose night act order is not defined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndefinedNightOrder {
    /// The character does not act.
    NotAct,
    /// Ask the storyteller for an order; `0` means the character does not act.
    #[default]
    StorytellerDecide,
}

/// Night sheet behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightSheetConfig {
    pub undefined_order: UndefinedNightOrder,
}

impl NightSheetConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for undefined night orders (builder pattern).
    #[must_use]
    pub fn with_undefined_order(mut self, strategy: UndefinedNightOrder) -> Self {
        self.undefined_order = strategy;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub clock: ClockConfig,
    pub night: NightSheetConfig,
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clock configuration.
    #[must_use]
    pub fn with_clock(mut self, clock: ClockConfig) -> Self {
        self.clock = clock;
        self
    }

    /// Set the night sheet configuration.
    #[must_use]
    pub fn with_night(mut self, night: NightSheetConfig) -> Self {
        self.night = night;
        self
    }
}
