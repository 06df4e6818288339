//! Bounded conversation window — the per-session working memory.
//!
//! Holds the most recent K turns for one session. Append-only from the
//! caller's perspective; when capacity is exceeded the oldest turn is
//! dropped, regardless of role. Invariants:
//!
//! - length ≤ K at all times
//! - ordering is strictly chronological (no reordering)

use semroute_core::message::Turn;
use std::collections::VecDeque;

/// The last-K-turns window for a single session.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl ConversationMemory {
    /// Create an empty window holding at most `capacity` turns.
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a turn, evicting the oldest if the window is full.
    pub fn push(&mut self, turn: Turn) {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// The retained turns, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
