//! Context assembly — recent memory plus the new message.
//!
//! # Determinism
//!
//! Assembly is a pure function of the window state and the input:
//! identical inputs always produce identical output. No random or
//! time-dependent logic.
//!
//! # Join rule
//!
//! One line per retained turn, oldest first, prefixed with the role
//! (`user:` / `assistant:`), then the new message as the final line
//! without a prefix. With an empty window the context degenerates to
//! the new message alone.

use semroute_core::message::{Role, Turn};

/// Assemble the routing/generation context for a new message.
pub fn assemble<'a>(recent: impl Iterator<Item = &'a Turn>, new_message: &str) -> String {
    let mut lines: Vec<String> = recent
        .map(|turn| {
            let prefix = match turn.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            format!("{prefix}: {}", turn.text)
        })
        .collect();

    lines.push(new_message.to_string());
    lines.join("\n")
}
