//! # grimoire
//!
//! A temporal effect-resolution engine for storyteller-run social deduction
//! games.
//!
//! ## Design Principles
//!
//! 1. **One Clock**: The game advances through a fixed cycle of phases.
//!    Every transition is confirmed by the storyteller and recorded, so any
//!    past phase can be recalled or rewound to.
//!
//! 2. **Effects, Not Flags**: Abilities never mutate entities directly.
//!    They attach prioritized, duration-scoped effects that intercept how
//!    an entity is read, written and invoked.
//!
//! 3. **Perspective Matters**: The same entity can look different to
//!    different observers. Every access names its initiator.
//!
//! ## Architecture
//!
//! - **Explicit Access Contexts**: Interception works on an explicit
//!   [`effects::AccessContext`] rather than runtime attribute trapping.
//!
//! - **Explicit Time**: Accesses carry the current [`core::GamePhase`];
//!   there is no global clock.
//!
//! - **Two Orderings**: Effect priority (higher resolves first) and night
//!   act order (lower acts first) are distinct and meet only in
//!   [`night::NightActOrdering::priority`].
//!
//! ## Modules
//!
//! - `core`: Entity IDs, game phases, durations, configuration
//! - `clock`: Phase progression, history, recall and rewind
//! - `pipeline`: Generic middleware chain
//! - `effects`: Effects, their registry and intercepted targets
//! - `interaction`: The storyteller gate
//! - `characters`: Character definitions and ability factories
//! - `night`: Night act ordering and the night sheet
//! - `session`: A clock and night sheet built from one configuration
//! - `error`: Error types

pub mod core;
pub mod clock;
pub mod pipeline;
pub mod effects;
pub mod interaction;
pub mod characters;
pub mod night;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Duration, EngineConfig, EntityId, GamePhase, GamePhaseKind, Phase, PhaseScope,
};

pub use crate::clock::{Advance, Clock, DateRecord, Moment};

pub use crate::effects::{
    AccessContext, Effect, EffectRef, EffectTarget, Effects, Interceptable, View, ViewMut,
};

pub use crate::interaction::{Confirmation, Prompt, StorytellerGate};

pub use crate::characters::{CharacterDefinition, CharacterId, CharacterRegistry, NightOrder};

pub use crate::night::{night_act_ordering, NightActOrdering, NightSheet};

pub use crate::session::Session;

pub use crate::error::{EffectError, Error, NightSheetError, Result, TemporalError};
