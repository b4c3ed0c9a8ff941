//! The gate contract and its stock implementations.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A question put to the storyteller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// What is being asked.
    pub subject: String,

    /// Why it is being asked, if known.
    pub reason: Option<String>,
}

impl Prompt {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            reason: None,
        }
    }

    /// Attach a reason (builder pattern).
    #[must_use]
    pub fn because(mut self, reason: Option<impl Into<String>>) -> Self {
        self.reason = reason.map(Into::into);
        self
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} because {}?", self.subject, reason),
            None => write!(f, "{}?", self.subject),
        }
    }
}

/// Answer to a yes/no prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    Confirmed,
    Rejected,
    /// The storyteller did not answer in time.
    NoResponse,
}

impl Confirmation {
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Rejected
        }
    }
}

/// What the storyteller may choose from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionOptions {
    /// Pick one of the listed options by index.
    Pick(Vec<String>),
    /// Enter a number in `min..=max`.
    Number { min: i64, max: i64 },
}

/// A storyteller decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Picked(usize),
    Number(i64),
}

impl Decision {
    /// Numeric value of the decision, whichever form it took.
    #[must_use]
    pub fn as_number(self) -> i64 {
        match self {
            Decision::Picked(index) => index as i64,
            Decision::Number(value) => value,
        }
    }
}

/// Source of storyteller confirmations and decisions.
#[async_trait]
pub trait StorytellerGate: Send + Sync {
    /// Ask a yes/no question.
    async fn confirm(&self, prompt: &Prompt) -> Confirmation;

    /// Ask for a decision. `None` means no response.
    async fn decide(&self, prompt: &Prompt, options: &DecisionOptions) -> Option<Decision>;
}

/// Confirms every prompt and never makes decisions.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoConfirm;

#[async_trait]
impl StorytellerGate for AutoConfirm {
    async fn confirm(&self, _prompt: &Prompt) -> Confirmation {
        Confirmation::Confirmed
    }

    async fn decide(&self, _prompt: &Prompt, _options: &DecisionOptions) -> Option<Decision> {
        None
    }
}

/// Replays queued answers in order.
///
/// Once a queue is exhausted, confirmations answer `NoResponse` and
/// decisions answer `None`. Every prompt seen is kept for inspection.
#[derive(Debug, Default)]
pub struct ScriptedGate {
    confirmations: Mutex<VecDeque<Confirmation>>,
    decisions: Mutex<VecDeque<Decision>>,
    asked: Mutex<Vec<Prompt>>,
}

impl ScriptedGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue confirmation answers (builder pattern).
    #[must_use]
    pub fn with_confirmations(self, answers: impl IntoIterator<Item = Confirmation>) -> Self {
        if let Ok(mut queue) = self.confirmations.lock() {
            queue.extend(answers);
        }
        self
    }

    /// Queue decision answers (builder pattern).
    #[must_use]
    pub fn with_decisions(self, answers: impl IntoIterator<Item = Decision>) -> Self {
        if let Ok(mut queue) = self.decisions.lock() {
            queue.extend(answers);
        }
        self
    }

    /// Prompts asked so far, oldest first.
    #[must_use]
    pub fn asked(&self) -> Vec<Prompt> {
        self.asked.lock().map(|asked| asked.clone()).unwrap_or_default()
    }

    fn remember(&self, prompt: &Prompt) {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt.clone());
        }
    }
}

#[async_trait]
impl StorytellerGate for ScriptedGate {
    async fn confirm(&self, prompt: &Prompt) -> Confirmation {
        self.remember(prompt);
        self.confirmations
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or(Confirmation::NoResponse)
    }

    async fn decide(&self, prompt: &Prompt, _options: &DecisionOptions) -> Option<Decision> {
        self.remember(prompt);
        self.decisions
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
    }
}
