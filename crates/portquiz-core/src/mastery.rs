//! Per-question streak counters and the ignore set.
//!
//! Streaks are tracked for display only; a long streak does not retire a
//! question. Only ignoring removes a question from rotation.

use std::collections::BTreeSet;

/// Tracks correct-answer streaks and which questions the learner ignored.
#[derive(Debug, Clone)]
pub struct MasteryTracker {
    streaks: Vec<u32>,
    ignored: BTreeSet<usize>,
}

impl MasteryTracker {
    /// Create a tracker for `len` questions, all streaks at zero.
    pub fn new(len: usize) -> Self {
        Self {
            streaks: vec![0; len],
            ignored: BTreeSet::new(),
        }
    }

    pub fn is_eligible(&self, index: usize) -> bool {
        !self.ignored.contains(&index)
    }

    /// Bump the streak on a correct answer, reset it otherwise.
    pub fn record_result(&mut self, index: usize, correct: bool) {
        let Some(streak) = self.streaks.get_mut(index) else {
            tracing::warn!("result recorded for unknown question {index}");
            return;
        };
        if correct {
            *streak += 1;
        } else {
            *streak = 0;
        }
    }

    /// Stop asking `index` for the rest of the session.
    pub fn ignore(&mut self, index: usize) {
        if self.ignored.insert(index) {
            tracing::debug!("question {index} ignored");
        }
    }

    pub fn streak(&self, index: usize) -> Option<u32> {
        self.streaks.get(index).copied()
    }

    pub fn streaks(&self) -> &[u32] {
        &self.streaks
    }

    pub fn ignored(&self) -> &BTreeSet<usize> {
        &self.ignored
    }

    pub fn ignored_count(&self) -> usize {
        self.ignored.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_grows_then_resets() {
        let mut tracker = MasteryTracker::new(2);
        let mut seen = Vec::new();
        for correct in [true, true, false] {
            tracker.record_result(0, correct);
            seen.push(tracker.streak(0).unwrap());
        }
        assert_eq!(seen, vec![1, 2, 0]);
        assert_eq!(tracker.streak(1), Some(0));
    }

    #[test]
    fn streak_does_not_affect_eligibility() {
        let mut tracker = MasteryTracker::new(1);
        for _ in 0..50 {
            tracker.record_result(0, true);
        }
        assert!(tracker.is_eligible(0));
    }

    #[test]
    fn ignore_is_sticky() {
        let mut tracker = MasteryTracker::new(3);
        tracker.ignore(1);
        tracker.ignore(1);
        tracker.record_result(1, true);
        assert!(!tracker.is_eligible(1));
        assert!(tracker.is_eligible(0));
        assert_eq!(tracker.ignored_count(), 1);
    }

    #[test]
    fn unknown_index_is_ignored_quietly() {
        let mut tracker = MasteryTracker::new(1);
        tracker.record_result(5, true);
        assert_eq!(tracker.streaks(), &[0]);
        assert_eq!(tracker.streak(5), None);
    }
}
