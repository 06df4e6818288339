//! Turn and session domain types.
//!
//! These are the core value objects that flow through the system:
//! a user message arrives for a session, exactly one tool produces a
//! response, and both sides of the exchange are recorded as turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The routed tool's response
    Assistant,
}

/// One recorded message in a conversation. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Which session this turn belongs to
    pub session_id: SessionId,

    /// Who authored this turn
    pub role: Role,

    /// The text content
    pub text: String,

    /// Which tool produced this turn (assistant turns only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_used: Option<String>,

    /// True if a provider failure forced a fallback response.
    /// History must reflect that generation did not succeed.
    #[serde(default)]
    pub degraded: bool,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a user turn.
    pub fn user(session_id: SessionId, text: impl Into<String>) -> Self {
        Self {
            session_id,
            role: Role::User,
            text: text.into(),
            tool_used: None,
            degraded: false,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant turn labeled with the tool that produced it.
    pub fn assistant(
        session_id: SessionId,
        text: impl Into<String>,
        tool_used: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            role: Role::Assistant,
            text: text.into(),
            tool_used: Some(tool_used.into()),
            degraded: false,
            timestamp: Utc::now(),
        }
    }

    /// Mark this turn as a degraded (fallback) response.
    pub fn degraded(mut self) -> Self {
        self.degraded = true;
        self
    }
}

/// The structured result of processing one message: every request
/// yields a response and a named tool, even on the fallback path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedReply {
    /// The session the exchange was recorded under
    pub session_id: SessionId,

    /// The tool that handled (or was labeled as handling) the message
    pub tool_used: String,

    /// The response text
    pub response: String,

    /// True if a provider failure forced the fallback response
    #[serde(default)]
    pub degraded: bool,
}
