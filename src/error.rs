//! Error types.
//!
//! Each subsystem has its own error enum with precise variants. Misuse of
//! the temporal model is reported immediately and never approximated.
//!
//! A storyteller refusing to confirm something is not an error: those
//! outcomes are ordinary return values (see [`crate::clock::Advance`]).

use thiserror::Error;

use crate::characters::CharacterId;
use crate::core::{GamePhase, Phase};
use crate::effects::AccessKind;

/// Misuse of the clock or duration model.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TemporalError {
    #[error("{operation} is unsupported for an indefinite duration")]
    UnsupportedForIndefinite { operation: &'static str },

    #[error("cannot recall date {requested}: current date is {current}")]
    RecallFutureDate { requested: u32, current: u32 },

    #[error("duration end {end} is not after start {start}")]
    InvalidDuration { start: GamePhase, end: GamePhase },

    #[error("date {date_index} has no {phase} phase")]
    PhaseNotInDate { date_index: u32, phase: Phase },
}

/// Failure raised while resolving an access through an effect chain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("{kind:?} access to {member} is not supported")]
    UnsupportedAccess { kind: AccessKind, member: String },

    #[error("effect {effect} aborted the access: {reason}")]
    Aborted { effect: String, reason: String },
}

/// Misuse of the night sheet.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NightSheetError {
    #[error("night sheet has not been initialized")]
    NotInitialized,

    #[error("{character} is not part of the night act ordering")]
    CharacterNotInOrdering { character: CharacterId },

    #[error("{character} is not registered")]
    UnknownCharacter { character: CharacterId },
}

/// Any error raised by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error(transparent)]
    Effect(#[from] EffectError),

    #[error(transparent)]
    NightSheet(#[from] NightSheetError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
