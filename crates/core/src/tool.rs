//! Tool descriptors and the write-once tool registry.
//!
//! A tool is a name, a natural-language description of when it
//! applies, and a handler. Dispatch is data-driven: the handler is an
//! explicit tagged variant rather than a trait object, which keeps the
//! catalog a plain value that is easy to construct in tests.
//!
//! The registry is built once at startup. Construction embeds every
//! tool description exactly once, so routing never re-embeds the
//! catalog, and fails fast on duplicate names or an empty catalog.

use crate::error::{CatalogError, Error, Result};
use crate::provider::EmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a tool produces its response.
#[derive(Debug, Clone)]
pub enum Handler {
    /// Canned or locally computed reply. Must never block and must be
    /// side-effect-free beyond its own randomness source.
    Static(fn(&str) -> String),

    /// Builds a prompt from the instruction prefix plus the assembled
    /// context and calls the generation provider.
    Generated { instruction: String },
}

/// A tool descriptor: immutable after registry construction.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique tool name (e.g., "NegativePrompt")
    pub name: String,

    /// Natural-language description of when this tool applies.
    /// This is what gets embedded and scored against incoming context.
    pub description: String,

    /// The handler that produces this tool's response
    pub handler: Handler,
}

impl ToolSpec {
    /// A static-responder tool.
    pub fn responder(
        name: impl Into<String>,
        description: impl Into<String>,
        respond: fn(&str) -> String,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Handler::Static(respond),
        }
    }

    /// A generation-backed tool with an instruction prefix.
    pub fn generated(
        name: impl Into<String>,
        description: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: Handler::Generated {
                instruction: instruction.into(),
            },
        }
    }
}

/// A tool plus its cached description embedding.
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub spec: ToolSpec,
    /// Computed once at registration, reused for every routing scan.
    pub embedding: Vec<f32>,
}

/// The immutable, ordered tool catalog.
///
/// Registration order matters: ties in similarity are broken by
/// first-registered-wins, so iteration must be deterministic.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Build the registry, pre-embedding every tool description.
    ///
    /// Fails fast on an empty catalog, duplicate names, or an
    /// embedding provider failure — all configuration-time errors.
    pub async fn build(
        specs: Vec<ToolSpec>,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::Catalog(CatalogError::Empty));
        }

        let mut tools: Vec<RegisteredTool> = Vec::with_capacity(specs.len());
        for spec in specs {
            if tools.iter().any(|t| t.spec.name == spec.name) {
                return Err(Error::Catalog(CatalogError::DuplicateTool(spec.name)));
            }
            let embedding = embedder.embed(&spec.description).await?;
            debug!(tool = %spec.name, dims = embedding.len(), "Embedded tool description");
            tools.push(RegisteredTool { spec, embedding });
        }

        Ok(Self { tools })
    }

    /// All registered tools, in registration order.
    pub fn all(&self) -> &[RegisteredTool] {
        &self.tools
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.spec.name == name)
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.spec.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Public view of a tool for listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    /// "static" or "generated"
    pub kind: String,
}

impl From<&RegisteredTool> for ToolInfo {
    fn from(tool: &RegisteredTool) -> Self {
        Self {
            name: tool.spec.name.clone(),
            description: tool.spec.description.clone(),
            kind: match tool.spec.handler {
                Handler::Static(_) => "static".into(),
                Handler::Generated { .. } => "generated".into(),
            },
        }
    }
}
