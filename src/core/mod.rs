//! Core engine types: entities, phases, durations, configuration.
//!
//! This module contains the value types every other module builds on.
//! None of them hold references to a session; they are plain data.

pub mod entity;
pub mod phase;
pub mod duration;
pub mod config;

pub use entity::{EntityAllocator, EntityId};
pub use phase::{GamePhase, GamePhaseKind, Phase, PhaseScope, PHASES_PER_DATE};
pub use duration::Duration;
pub use config::{ClockConfig, EngineConfig, NightSheetConfig, UndefinedNightOrder};
