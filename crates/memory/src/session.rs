//! Session manager — maps session ids to conversation windows.
//!
//! First use of an id creates an empty window; subsequent uses return
//! the same instance. Sessions live for the process lifetime (no idle
//! eviction — callers needing that add it as a policy layer above).
//!
//! Each window lives behind its own `Mutex` so that two requests for
//! the same session serialize their read-then-record sequences, while
//! different sessions proceed fully in parallel.

use crate::window::ConversationMemory;
use semroute_core::message::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Owns every session's conversation window.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<ConversationMemory>>>>,
    window: usize,
}

impl SessionManager {
    /// Create a manager whose windows hold at most `window` turns.
    pub fn new(window: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            window,
        }
    }

    /// Get the window for a session, creating an empty one on first use.
    pub async fn get_or_create(&self, id: &SessionId) -> Arc<Mutex<ConversationMemory>> {
        // Fast path: session already exists.
        {
            let sessions = self.sessions.read().await;
            if let Some(memory) = sessions.get(id) {
                return memory.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(id.clone())
            .or_insert_with(|| {
                debug!(session_id = %id, "Created new session");
                Arc::new(Mutex::new(ConversationMemory::new(self.window)))
            })
            .clone()
    }

    /// Number of sessions created so far.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
