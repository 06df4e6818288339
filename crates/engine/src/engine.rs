//! The routing engine — orchestrates one chat turn end to end.
//!
//! Lock discipline (one session): assemble context under the session
//! lock, release it, make the provider calls, then re-acquire the lock
//! only to record both turns. Provider calls never hold a session
//! lock, and both turns of an exchange are recorded under one lock
//! acquisition, so same-session history can never interleave.

use crate::context;
use crate::executor::ToolExecutor;
use crate::router::SimilarityRouter;
use semroute_core::error::{Error, Result, RouterError};
use semroute_core::message::{RoutedReply, SessionId, Turn};
use semroute_core::provider::{EmbeddingProvider, GenerationProvider};
use semroute_core::tool::{ToolInfo, ToolRegistry};
use semroute_memory::{HistoryStore, SessionManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Shown when a provider failure forces the degraded path. The turn is
/// still labeled with a tool and recorded with the failure marker.
const FALLBACK_MESSAGE: &str = "I'm having trouble reaching my language model right now, but I'm \
     still here with you. Please try again in a moment.";

/// The message-routing engine. One instance serves all sessions.
pub struct RouterEngine {
    registry: Arc<ToolRegistry>,
    router: SimilarityRouter,
    executor: ToolExecutor,
    sessions: SessionManager,
    history: HistoryStore,
    fallback_tool: String,
    provider_timeout: Duration,
}

impl RouterEngine {
    /// Create an engine over a pre-built registry and providers.
    pub fn new(
        registry: Arc<ToolRegistry>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            router: SimilarityRouter::new(registry.clone(), embedder),
            executor: ToolExecutor::new(generator),
            registry,
            sessions: SessionManager::new(6),
            history: HistoryStore::new(),
            fallback_tool: "PositivePrompt".into(),
            provider_timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-session conversation window size.
    pub fn with_window(mut self, window: usize) -> Self {
        self.sessions = SessionManager::new(window);
        self
    }

    /// Set how long to wait on a provider call before giving up.
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Set the tool label used when routing itself fails.
    pub fn with_fallback_tool(mut self, tool: impl Into<String>) -> Self {
        self.fallback_tool = tool.into();
        self
    }

    /// Set the response-length sanity bound in characters.
    pub fn with_max_response_chars(mut self, max: usize) -> Self {
        self.executor = self.executor.with_max_response_chars(max);
        self
    }

    /// Process one user message: assemble, route, execute, record.
    ///
    /// Every request yields a response and a named tool. Provider
    /// failures degrade to the fallback message; only invariant
    /// violations (a bug) surface as errors.
    pub async fn process_message(
        &self,
        session_id: SessionId,
        message: &str,
    ) -> Result<RoutedReply> {
        let memory = self.sessions.get_or_create(&session_id).await;

        // Read-only snapshot of the window; lock released before any
        // provider call.
        let context = {
            let mem = memory.lock().await;
            context::assemble(mem.recent(), message)
        };

        let (tool_used, response, degraded) = match timeout(
            self.provider_timeout,
            self.router.route(&context),
        )
        .await
        {
            Ok(Ok(tool_name)) => self.run_tool(tool_name, &context).await?,
            Ok(Err(Error::Provider(e))) => {
                warn!(session_id = %session_id, error = %e, "Embedding failed, using fallback tool");
                (self.fallback_tool.clone(), FALLBACK_MESSAGE.to_string(), true)
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                warn!(session_id = %session_id, "Embedding timed out, using fallback tool");
                (self.fallback_tool.clone(), FALLBACK_MESSAGE.to_string(), true)
            }
        };

        let user_turn = Turn::user(session_id.clone(), message);
        let mut assistant_turn = Turn::assistant(session_id.clone(), &response, &tool_used);
        if degraded {
            assistant_turn = assistant_turn.degraded();
        }

        // Both turns land in the window and the history under a single
        // lock acquisition so same-session ordering can never invert.
        {
            let mut mem = memory.lock().await;
            mem.push(user_turn.clone());
            self.history.append(user_turn).await;
            mem.push(assistant_turn.clone());
            self.history.append(assistant_turn).await;
        }

        info!(
            session_id = %session_id,
            tool = %tool_used,
            degraded,
            "Routed message"
        );

        Ok(RoutedReply {
            session_id,
            tool_used,
            response,
            degraded,
        })
    }

    /// Execute the routed tool, degrading on provider failure but
    /// keeping the tool label.
    async fn run_tool(&self, tool_name: String, context: &str) -> Result<(String, String, bool)> {
        match timeout(
            self.provider_timeout,
            self.executor.execute(&self.registry, &tool_name, context),
        )
        .await
        {
            Ok(Ok(response)) => Ok((tool_name, response, false)),
            Ok(Err(Error::Provider(e))) => {
                warn!(tool = %tool_name, error = %e, "Generation failed, using fallback response");
                Ok((tool_name, FALLBACK_MESSAGE.to_string(), true))
            }
            Ok(Err(e)) => {
                if matches!(e, Error::Router(RouterError::UnknownTool(_))) {
                    error!(tool = %tool_name, "Invariant violation: routed tool not in registry");
                }
                Err(e)
            }
            Err(_) => {
                warn!(tool = %tool_name, "Generation timed out, using fallback response");
                Ok((tool_name, FALLBACK_MESSAGE.to_string(), true))
            }
        }
    }

    /// Every recorded turn, in order. Read access for the transport layer.
    pub async fn history(&self) -> Vec<Turn> {
        self.history.all().await
    }

    /// The most recent recorded turn, if any.
    pub async fn latest(&self) -> Option<Turn> {
        self.history.latest().await
    }

    /// The tool catalog, for listing endpoints.
    pub fn tools(&self) -> Vec<ToolInfo> {
        self.registry.all().iter().map(ToolInfo::from).collect()
    }
}
