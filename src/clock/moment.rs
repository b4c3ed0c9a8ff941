//! Recorded history entries and read-only views over them.

use std::ops::Range;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GamePhase, Phase};

/// A phase the clock has reached, with its recording metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moment {
    /// The phase reached.
    pub when: GamePhase,

    /// Position in the clock history (0 = setup).
    pub ordinal: usize,

    /// Why the transition happened, if a reason was given.
    pub reason: Option<String>,
}

impl Moment {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.when.phase()
    }

    #[must_use]
    pub fn date_index(&self) -> u32 {
        self.when.date_index()
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        self.when.is_night()
    }

    #[must_use]
    pub fn is_day(&self) -> bool {
        self.when.is_day()
    }
}

impl From<&Moment> for GamePhase {
    fn from(moment: &Moment) -> Self {
        moment.when
    }
}

impl std::fmt::Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.ordinal, self.when)
    }
}

/// The moments recorded during one date.
#[derive(Clone, Debug)]
pub struct DateRecord<'a> {
    date_index: u32,
    history: &'a Vector<Moment>,
    range: Range<usize>,
}

impl<'a> DateRecord<'a> {
    pub(crate) fn new(date_index: u32, history: &'a Vector<Moment>, range: Range<usize>) -> Self {
        Self {
            date_index,
            history,
            range,
        }
    }

    #[must_use]
    pub fn date_index(&self) -> u32 {
        self.date_index
    }

    /// Moments of this date in chronological order.
    pub fn moments(&self) -> impl Iterator<Item = &'a Moment> + 'a {
        let history = self.history;
        self.range.clone().filter_map(move |i| history.get(i))
    }

    /// Moment at which `phase` was reached on this date, if it was.
    #[must_use]
    pub fn get_moment(&self, phase: Phase) -> Option<&'a Moment> {
        self.moments().find(|moment| moment.phase() == phase)
    }

    #[must_use]
    pub fn has_reached(&self, phase: Phase) -> bool {
        self.get_moment(phase).is_some()
    }

    /// Number of moments recorded on this date.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Most recent moment of this date.
    #[must_use]
    pub fn latest(&self) -> Option<&'a Moment> {
        let history = self.history;
        self.range
            .end
            .checked_sub(1)
            .filter(|&i| i >= self.range.start)
            .and_then(move |i| history.get(i))
    }
}

/// Walks recorded moments backwards in time.
///
/// Produced by [`Clock::rewind`](super::Clock::rewind). Newest moment first.
/// Calling `rewind` again yields the same sequence.
#[derive(Clone, Debug)]
pub struct Rewind<'a> {
    history: &'a Vector<Moment>,
    /// Lowest index still to be yielded.
    low: usize,
    /// Exclusive upper bound; the next yielded index is `high - 1`.
    high: usize,
}

impl<'a> Rewind<'a> {
    pub(crate) fn new(history: &'a Vector<Moment>, low: usize, high: usize) -> Self {
        Self {
            history,
            low,
            high: high.max(low),
        }
    }
}

impl<'a> Iterator for Rewind<'a> {
    type Item = &'a Moment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.high <= self.low {
            return None;
        }
        self.high -= 1;
        self.history.get(self.high)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.high - self.low;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rewind<'_> {}

impl std::iter::FusedIterator for Rewind<'_> {}
