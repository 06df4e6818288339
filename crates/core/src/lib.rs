//! # semroute Core
//!
//! Domain types, traits, and error definitions for the semroute
//! message-routing chatbot engine. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators (embedding model, generation model)
//! are defined as traits here; implementations live in the providers
//! crate. Tool dispatch is data-driven: a tool is a descriptor plus a
//! tagged handler variant, not a trait object, which keeps the catalog
//! easy to construct and test.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{CatalogError, Error, ProviderError, Result, RouterError};
pub use message::{Role, RoutedReply, SessionId, Turn};
pub use provider::{EmbeddingProvider, GenerationProvider};
pub use tool::{Handler, RegisteredTool, ToolInfo, ToolRegistry, ToolSpec};
