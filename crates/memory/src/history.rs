//! History store — the unbounded, append-only log of every turn.
//!
//! Independent of the bounded per-session windows: eviction there
//! never removes anything here. Ordering is append order; for a single
//! session that matches chronological order because the engine appends
//! while holding the session's lock.

use semroute_core::message::Turn;
use tokio::sync::RwLock;

/// Process-lifetime log of all recorded turns, across all sessions.
pub struct HistoryStore {
    turns: RwLock<Vec<Turn>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            turns: RwLock::new(Vec::new()),
        }
    }

    /// Append a turn. Turns are immutable once appended.
    pub async fn append(&self, turn: Turn) {
        self.turns.write().await.push(turn);
    }

    /// Every turn ever recorded, in append order.
    pub async fn all(&self) -> Vec<Turn> {
        self.turns.read().await.clone()
    }

    /// The most recent turn, if any.
    pub async fn latest(&self) -> Option<Turn> {
        self.turns.read().await.last().cloned()
    }

    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
