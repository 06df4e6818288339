//! Error types for the semroute domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! The taxonomy mirrors how failures are handled at request time:
//! catalog errors are fatal at startup, provider errors are recovered
//! per request via the fallback path, and router invariant violations
//! indicate bugs and are surfaced distinctly.

use thiserror::Error;

/// The top-level error type for all semroute operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool catalog errors ---
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    // --- Routing errors ---
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Errors building the tool catalog. Fatal at startup, never seen at
/// request time.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Tool catalog is empty: at least one tool must be registered")]
    Empty,
}

#[derive(Debug, Clone, Error)]
pub enum RouterError {
    /// The registry held no tools at routing time. A configuration
    /// error; catalog construction already rejects this.
    #[error("No tools available for routing")]
    NoToolsAvailable,

    /// The router selected a name absent from the registry. This is an
    /// internal invariant violation, not a transient failure.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
