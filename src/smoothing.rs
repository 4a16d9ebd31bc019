// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Majority-vote smoothing over recent provisional labels.

use std::collections::VecDeque;

use crate::label::Gesture;

/// Number of provisional labels kept in the vote window.
pub const WINDOW_SIZE: usize = 7;

/// Fixed-capacity FIFO of provisional labels with a majority vote.
///
/// Ties are broken by first appearance in the window: among labels sharing
/// the highest count, the one whose oldest occurrence is earliest wins.
#[derive(Debug, Clone, Default)]
pub struct VoteWindow {
    labels: VecDeque<Gesture>,
}

impl VoteWindow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: VecDeque::with_capacity(WINDOW_SIZE),
        }
    }

    /// Append a provisional label, evicting the oldest when full, and return
    /// the current majority.
    pub fn push(&mut self, label: Gesture) -> Gesture {
        if self.labels.len() == WINDOW_SIZE {
            self.labels.pop_front();
        }
        self.labels.push_back(label);
        self.majority().unwrap_or(label)
    }

    /// Majority label of the window, `None` when empty.
    #[must_use]
    pub fn majority(&self) -> Option<Gesture> {
        // (label, count) in first-seen order
        let mut tally: Vec<(Gesture, usize)> = Vec::with_capacity(WINDOW_SIZE);
        for &label in &self.labels {
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((label, 1)),
            }
        }

        let mut best: Option<(Gesture, usize)> = None;
        for (label, count) in tally {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Gesture> {
        self.labels.iter()
    }
}
