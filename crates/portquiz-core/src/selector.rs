//! Question selection with a short no-repeat window.
//!
//! Every non-ignored question is a candidate. Once there are at least two
//! entries in the recent history, the last three picks are excluded. If that
//! leaves nothing, selection reports [`Selection::Exhausted`] instead of
//! falling back to the wider candidate set.

use std::collections::VecDeque;

use crate::mastery::MasteryTracker;
use crate::model::Direction;
use crate::traits::Chooser;

/// How many recent picks are remembered.
pub const HISTORY_CAPACITY: usize = 5;

/// How many of the remembered picks are excluded from the next selection.
pub const NO_REPEAT_WINDOW: usize = 3;

/// Bounded FIFO of the most recently selected question indices.
#[derive(Debug, Clone, Default)]
pub struct RecentHistory {
    entries: VecDeque<usize>,
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pick, evicting the oldest beyond [`HISTORY_CAPACITY`].
    pub fn push(&mut self, index: usize) {
        self.entries.push_back(index);
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// The most recent `n` picks (fewer if the history is shorter).
    pub fn last(&self, n: usize) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().rev().take(n).copied()
    }

    pub fn contains_recent(&self, index: usize) -> bool {
        self.last(NO_REPEAT_WINDOW).any(|i| i == index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<usize> {
        self.entries.iter().copied().collect()
    }
}

impl FromIterator<usize> for RecentHistory {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut history = RecentHistory::new();
        for index in iter {
            history.push(index);
        }
        history
    }
}

/// Outcome of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen { index: usize, direction: Direction },
    Exhausted,
}

/// Pick the next question out of `total` records.
///
/// Candidates are considered in ascending index order and the chooser picks a
/// position among them; a second, independent pick decides the direction.
/// On success the chosen index is appended to `history`.
pub fn select_next(
    total: usize,
    mastery: &MasteryTracker,
    history: &mut RecentHistory,
    chooser: &mut dyn Chooser,
) -> Selection {
    let mut candidates: Vec<usize> = (0..total).filter(|&i| mastery.is_eligible(i)).collect();

    if candidates.is_empty() {
        tracing::debug!("no eligible questions left");
        return Selection::Exhausted;
    }

    if history.len() > 1 {
        candidates.retain(|&i| !history.contains_recent(i));
        if candidates.is_empty() {
            tracing::debug!(
                "every eligible question is inside the no-repeat window {:?}",
                history.last(NO_REPEAT_WINDOW).collect::<Vec<_>>()
            );
            return Selection::Exhausted;
        }
    }

    let index = candidates[chooser.choose_index(candidates.len())];
    history.push(index);

    let direction = Direction::ALL[chooser.choose_index(Direction::ALL.len())];

    tracing::debug!(
        "selected question {index} ({direction}) from {} candidates",
        candidates.len()
    );
    Selection::Chosen { index, direction }
}
