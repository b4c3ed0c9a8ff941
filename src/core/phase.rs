//! Phases and game-phase coordinates.
//!
//! ## Phase Layout
//!
//! A session starts at `Setup` and then cycles through
//! `Night → Dawn → Day → Dusk → Night → ...` forever.
//!
//! Internally every reachable phase has a counter:
//! - `0`: Setup
//! - `1`: first Night
//! - `2, 3, 4, 5`: Dawn, Day, Dusk, Night of date 1
//! - and so on, four phases per date
//!
//! Setup and the first night belong to date 0. A date starts at dawn, so the
//! night that closes a day belongs to the same date as that day.
//!
//! ```
//! use grimoire::core::{GamePhase, Phase};
//!
//! let first_night = GamePhase::first_night();
//! assert_eq!(first_night.date_index(), 0);
//! assert!(first_night.is_first_night());
//!
//! let dawn = first_night.next();
//! assert_eq!(dawn.phase(), Phase::Dawn);
//! assert_eq!(dawn.date_index(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TemporalError;

/// Phases per date once the cycle has started.
pub const PHASES_PER_DATE: u32 = 4;

/// A stage of a game date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Before the game begins.
    Setup,
    /// Players close their eyes; characters wake to act.
    Night,
    /// The end of a night, just before the day.
    Dawn,
    /// Players talk, nominate and vote.
    Day,
    /// The start of a night, just after players close their eyes.
    Dusk,
}

impl Phase {
    /// The phases of the repeating cycle, in order.
    pub const CYCLE: [Phase; 4] = [Phase::Night, Phase::Dawn, Phase::Day, Phase::Dusk];

    /// Phase reached by a given counter value.
    #[must_use]
    pub const fn from_counter(counter: u32) -> Self {
        if counter == 0 {
            return Phase::Setup;
        }
        match (counter - 1) % PHASES_PER_DATE {
            0 => Phase::Night,
            1 => Phase::Dawn,
            2 => Phase::Day,
            _ => Phase::Dusk,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "Setup",
            Phase::Night => "Night",
            Phase::Dawn => "Dawn",
            Phase::Day => "Day",
            Phase::Dusk => "Dusk",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of game phase used for priority lookups.
///
/// Some characters act only on the first night, others on every night
/// except the first. Effects may resolve with a different priority in
/// each category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhaseKind {
    FirstNight,
    NonfirstNight,
    Other,
}

impl GamePhaseKind {
    /// Every basic kind.
    pub const ALL: [GamePhaseKind; 3] = [
        GamePhaseKind::FirstNight,
        GamePhaseKind::NonfirstNight,
        GamePhaseKind::Other,
    ];

    /// Dense index, for per-kind caches.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            GamePhaseKind::FirstNight => 0,
            GamePhaseKind::NonfirstNight => 1,
            GamePhaseKind::Other => 2,
        }
    }
}

/// A set of phase kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseScope {
    Only(GamePhaseKind),
    EveryNight,
    All,
}

impl PhaseScope {
    /// Check if a kind falls in this scope.
    #[must_use]
    pub fn contains(self, kind: GamePhaseKind) -> bool {
        match self {
            PhaseScope::Only(only) => only == kind,
            PhaseScope::EveryNight => kind != GamePhaseKind::Other,
            PhaseScope::All => true,
        }
    }
}

/// A `(date, phase)` coordinate on the session clock.
///
/// Ordered and compared structurally by position on the clock:
/// date first, then position within the date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamePhase {
    counter: u32,
}

impl GamePhase {
    /// The setup phase, where every session begins.
    #[must_use]
    pub const fn setup() -> Self {
        Self { counter: 0 }
    }

    /// The first night.
    #[must_use]
    pub const fn first_night() -> Self {
        Self { counter: 1 }
    }

    /// Build from a raw phase counter.
    #[must_use]
    pub const fn of(counter: u32) -> Self {
        Self { counter }
    }

    /// Build from a date index and a phase.
    ///
    /// Fails with [`TemporalError::PhaseNotInDate`] for coordinates the
    /// clock never reaches, such as a day on date 0.
    /// Dates whose phases do not fit in the counter fail the same way.
    pub fn at(date_index: u32, phase: Phase) -> Result<Self, TemporalError> {
        let dusk = u64::from(PHASES_PER_DATE) * u64::from(date_index);
        let counter = match (date_index, phase) {
            (0, Phase::Setup) => Some(0),
            (0, Phase::Night) => Some(1),
            (0, _) | (_, Phase::Setup) => None,
            (_, Phase::Dawn) => Some(dusk - 2),
            (_, Phase::Day) => Some(dusk - 1),
            (_, Phase::Dusk) => Some(dusk),
            (_, Phase::Night) => Some(dusk + 1),
        };

        counter
            .and_then(|c| u32::try_from(c).ok())
            .map(Self::of)
            .ok_or(TemporalError::PhaseNotInDate { date_index, phase })
    }

    /// Raw phase counter.
    #[must_use]
    pub const fn counter(self) -> u32 {
        self.counter
    }

    #[must_use]
    pub const fn phase(self) -> Phase {
        Phase::from_counter(self.counter)
    }

    /// Date this phase belongs to.
    #[must_use]
    pub const fn date_index(self) -> u32 {
        // (counter + 2) / 4 without overflowing near u32::MAX
        self.counter / PHASES_PER_DATE + (self.counter % PHASES_PER_DATE + 2) / PHASES_PER_DATE
    }

    /// Night cycle this phase belongs to (0 for setup and the first night).
    #[must_use]
    pub const fn cycle_index(self) -> u32 {
        self.counter.saturating_sub(1) / PHASES_PER_DATE
    }

    /// The phase that follows this one. Saturates at the last counter.
    #[must_use]
    pub const fn next(self) -> Self {
        Self { counter: self.counter.saturating_add(1) }
    }

    /// The phase before this one, or `None` at setup.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.counter.checked_sub(1) {
            Some(counter) => Some(Self { counter }),
            None => None,
        }
    }

    #[must_use]
    pub fn is_first_night(self) -> bool {
        self.phase() == Phase::Night && self.cycle_index() == 0
    }

    #[must_use]
    pub fn is_nonfirst_night(self) -> bool {
        self.phase() == Phase::Night && self.cycle_index() != 0
    }

    #[must_use]
    pub fn is_night(self) -> bool {
        self.phase() == Phase::Night
    }

    #[must_use]
    pub fn is_day(self) -> bool {
        self.phase() == Phase::Day
    }

    /// Category used for priority lookups.
    #[must_use]
    pub fn kind(self) -> GamePhaseKind {
        if self.is_first_night() {
            GamePhaseKind::FirstNight
        } else if self.is_nonfirst_night() {
            GamePhaseKind::NonfirstNight
        } else {
            GamePhaseKind::Other
        }
    }

    /// Number of phases from `self` to `later`, or `None` if `later` is earlier.
    #[must_use]
    pub fn phases_until(self, later: GamePhase) -> Option<u32> {
        later.counter.checked_sub(self.counter)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.phase(), self.cycle_index())
    }
}
