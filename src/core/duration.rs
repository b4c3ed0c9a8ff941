//! Phase-relative validity windows.
//!
//! A `Duration` is half-open: active from `start` (inclusive) up to `end`
//! (exclusive). Without an end it never expires.

use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::error::TemporalError;

/// An interval of game phases, optionally open-ended.
///
/// Deserializing goes through [`Duration::new`], so a stored window whose
/// end does not follow its start is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDuration")]
pub struct Duration {
    start: GamePhase,
    end: Option<GamePhase>,
}

/// Unchecked wire form of a [`Duration`].
#[derive(Deserialize)]
struct RawDuration {
    start: GamePhase,
    #[serde(default)]
    end: Option<GamePhase>,
}

impl TryFrom<RawDuration> for Duration {
    type Error = TemporalError;

    fn try_from(raw: RawDuration) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl Duration {
    /// Create a duration.
    ///
    /// Fails with [`TemporalError::InvalidDuration`] unless `end` is strictly
    /// after `start`.
    pub fn new(start: GamePhase, end: Option<GamePhase>) -> Result<Self, TemporalError> {
        match end {
            Some(end) if end <= start => Err(TemporalError::InvalidDuration { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// Bounded duration from `start` up to (excluding) `end`.
    pub fn until(start: GamePhase, end: GamePhase) -> Result<Self, TemporalError> {
        Self::new(start, Some(end))
    }

    /// Open-ended duration that never expires.
    #[must_use]
    pub const fn indefinite(start: GamePhase) -> Self {
        Self { start, end: None }
    }

    /// Duration covering exactly one phase.
    #[must_use]
    pub const fn one_phase(start: GamePhase) -> Self {
        Self {
            start,
            end: Some(start.next()),
        }
    }

    #[must_use]
    pub const fn start(&self) -> GamePhase {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<GamePhase> {
        self.end
    }

    #[must_use]
    pub const fn is_indefinite(&self) -> bool {
        self.end.is_none()
    }

    /// Check if the duration covers `phase`.
    #[must_use]
    pub fn is_active_at(&self, phase: GamePhase) -> bool {
        self.has_started_at(phase) && !self.has_ended_at(phase)
    }

    #[must_use]
    pub fn has_started_at(&self, phase: GamePhase) -> bool {
        phase >= self.start
    }

    /// Always `false` for an indefinite duration.
    #[must_use]
    pub fn has_ended_at(&self, phase: GamePhase) -> bool {
        self.end.is_some_and(|end| phase >= end)
    }

    /// Number of phases covered.
    pub fn phase_elapsed(&self) -> Result<u32, TemporalError> {
        let end = self.bounded_end("phase_elapsed")?;
        Ok(end.counter() - self.start.counter())
    }

    /// Number of dates crossed between start and end.
    pub fn date_elapsed(&self) -> Result<u32, TemporalError> {
        let end = self.bounded_end("date_elapsed")?;
        Ok(end.date_index() - self.start.date_index())
    }

    /// Check if start and end fall on the same date.
    pub fn at_same_date(&self) -> Result<bool, TemporalError> {
        let end = self.bounded_end("at_same_date")?;
        Ok(end.date_index() == self.start.date_index())
    }

    fn bounded_end(&self, operation: &'static str) -> Result<GamePhase, TemporalError> {
        self.end
            .ok_or(TemporalError::UnsupportedForIndefinite { operation })
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} -- {}", self.start, end),
            None => write!(f, "{} -- unbounded", self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Phase;

    #[test]
    fn test_one_phase_active_exactly_once() {
        let night = GamePhase::first_night();
        let duration = Duration::one_phase(night);

        assert!(duration.is_active_at(night));
        assert!(!duration.is_active_at(night.next()));
        assert!(!duration.is_active_at(GamePhase::setup()));
        assert_eq!(duration.phase_elapsed(), Ok(1));
    }

    #[test]
    fn test_has_ended_at_end_and_after() {
        let duration = Duration::one_phase(GamePhase::first_night());
        let end = GamePhase::first_night().next();

        assert!(!duration.has_ended_at(GamePhase::first_night()));
        assert!(duration.has_ended_at(end));
        assert!(duration.has_ended_at(GamePhase::of(40)));
    }

    #[test]
    fn test_has_started_at() {
        let start = GamePhase::of(3);
        let duration = Duration::indefinite(start);

        assert!(!duration.has_started_at(GamePhase::of(2)));
        assert!(duration.has_started_at(start));
        assert!(duration.has_started_at(GamePhase::of(100)));
    }

    #[test]
    fn test_indefinite_never_ends() {
        let duration = Duration::indefinite(GamePhase::first_night());

        assert!(duration.is_indefinite());
        for counter in 0..50 {
            assert!(!duration.has_ended_at(GamePhase::of(counter)));
        }
        assert!(duration.is_active_at(GamePhase::of(1000)));
    }

    #[test]
    fn test_indefinite_elapsed_is_unsupported() {
        let duration = Duration::indefinite(GamePhase::setup());

        assert_eq!(
            duration.phase_elapsed(),
            Err(TemporalError::UnsupportedForIndefinite { operation: "phase_elapsed" })
        );
        assert_eq!(
            duration.date_elapsed(),
            Err(TemporalError::UnsupportedForIndefinite { operation: "date_elapsed" })
        );
        assert!(duration.at_same_date().is_err());
    }

    #[test]
    fn test_date_elapsed() {
        let night = GamePhase::first_night();
        let day2 = GamePhase::at(2, Phase::Day).unwrap();
        let duration = Duration::until(night, day2).unwrap();

        assert_eq!(duration.date_elapsed(), Ok(2));
        assert_eq!(duration.at_same_date(), Ok(false));
        assert_eq!(duration.phase_elapsed(), Ok(day2.counter() - night.counter()));
    }

    #[test]
    fn test_end_must_follow_start() {
        let night = GamePhase::first_night();
        assert!(matches!(
            Duration::until(night, night),
            Err(TemporalError::InvalidDuration { .. })
        ));
        assert!(Duration::until(night, GamePhase::setup()).is_err());
    }

    #[test]
    fn test_deserialize_rejects_inverted_window() {
        let inverted = serde_json::from_str::<Duration>(r#"{"start":5,"end":2}"#);
        assert!(inverted.is_err());
        assert!(serde_json::from_str::<Duration>(r#"{"start":5,"end":5}"#).is_err());

        let open: Duration = serde_json::from_str(r#"{"start":5}"#).unwrap();
        assert!(open.is_indefinite());
    }

    #[test]
    fn test_serde_round_trip() {
        let duration = Duration::until(GamePhase::of(2), GamePhase::of(5)).unwrap();
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, r#"{"start":2,"end":5}"#);
        assert_eq!(serde_json::from_str::<Duration>(&json).unwrap(), duration);
        assert_eq!(serde_json::from_str::<Duration>(&json).unwrap().phase_elapsed(), Ok(3));
    }

    #[test]
    fn test_display() {
        let night = GamePhase::first_night();
        assert_eq!(Duration::one_phase(night).to_string(), "Night 0 -- Dawn 0");
        assert_eq!(Duration::indefinite(night).to_string(), "Night 0 -- unbounded");
    }
}
