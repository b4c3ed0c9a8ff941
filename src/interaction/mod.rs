//! Storyteller interaction gate.
//!
//! The engine occasionally needs a human (or scripted) decision: whether a
//! phase transition should happen, whether an effect should be switched
//! off, which night order an undocumented character gets. It asks through
//! the narrow [`StorytellerGate`] contract and never knows how prompts are
//! rendered.
//!
//! ## Provided Gates
//!
//! - [`AutoConfirm`]: Confirms everything, never decides
//! - [`ScriptedGate`]: Replays queued answers, for tests and replays

mod gate;

pub use gate::{
    AutoConfirm, Confirmation, Decision, DecisionOptions, Prompt, ScriptedGate,
    StorytellerGate,
};
