//! The semroute message-routing engine.
//!
//! For each incoming utterance the engine:
//!
//! 1. **Assembles context** from the session's recent turns plus the
//!    new message
//! 2. **Routes** by cosine similarity between the context embedding
//!    and the pre-embedded tool descriptions
//! 3. **Executes** exactly one tool (static responder or
//!    generation-backed)
//! 4. **Records** both sides of the exchange into the bounded session
//!    window and the unbounded history log
//!
//! Provider calls never hold a session lock, and provider failures
//! degrade to a labeled fallback response instead of an error.

pub mod context;
pub mod engine;
pub mod executor;
pub mod router;
pub mod vector;

pub use engine::RouterEngine;
pub use executor::ToolExecutor;
pub use router::{SimilarityRouter, ToolScore};
pub use vector::cosine_similarity;
