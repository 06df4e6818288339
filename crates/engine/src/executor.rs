//! Tool executor — dispatches the routed tool's handler.
//!
//! Dispatch and persistence are deliberately separate: the executor
//! never touches memory or history, so both are independently
//! testable. Static handlers return immediately; generation-backed
//! handlers call the generation provider and sanitize the output.

use semroute_core::error::{Error, ProviderError, Result, RouterError};
use semroute_core::provider::GenerationProvider;
use semroute_core::tool::{Handler, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, error};

/// Executes the handler of a routed tool.
pub struct ToolExecutor {
    generator: Arc<dyn GenerationProvider>,
    max_response_chars: usize,
}

impl ToolExecutor {
    pub fn new(generator: Arc<dyn GenerationProvider>) -> Self {
        Self {
            generator,
            max_response_chars: 2000,
        }
    }

    /// Set the response-length sanity bound in characters.
    pub fn with_max_response_chars(mut self, max: usize) -> Self {
        self.max_response_chars = max;
        self
    }

    /// Execute `tool_name` against the assembled context.
    ///
    /// The router guarantees the name is registered; a miss here is an
    /// invariant violation, surfaced distinctly from provider errors.
    pub async fn execute(
        &self,
        registry: &ToolRegistry,
        tool_name: &str,
        context: &str,
    ) -> Result<String> {
        let Some(tool) = registry.get(tool_name) else {
            error!(tool = %tool_name, "Router selected a tool absent from the registry");
            return Err(Error::Router(RouterError::UnknownTool(tool_name.into())));
        };

        match &tool.spec.handler {
            Handler::Static(respond) => Ok(respond(context)),
            Handler::Generated { instruction } => {
                let prompt = format!("{instruction}\n\n{context}");
                debug!(tool = %tool_name, prompt_chars = prompt.len(), "Generating response");

                let raw = self.generator.generate(&prompt).await.map_err(|e| {
                    ProviderError::GenerationFailed(e.to_string())
                })?;

                Ok(clamp(&clean_response(&raw), self.max_response_chars))
            }
        }
    }
}

/// Strip formatting artifacts from model output: pipe characters,
/// echoed role labels, and runs of whitespace.
pub fn clean_response(text: &str) -> String {
    text.replace('|', " ")
        .replace("User:", "")
        .replace("Assistant:", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max` characters, on a char boundary.
fn clamp(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}
