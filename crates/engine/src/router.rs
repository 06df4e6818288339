//! Similarity router — selects one tool by embedding similarity.
//!
//! The catalog is pre-embedded at registry construction, so routing
//! costs exactly one embedding call plus a linear scan over tens of
//! cached vectors. `score_all` is the seam: an ANN index could replace
//! the linear scan behind it without touching callers.

use crate::vector::cosine_similarity;
use semroute_core::error::{Error, Result, RouterError};
use semroute_core::provider::EmbeddingProvider;
use semroute_core::tool::{RegisteredTool, ToolRegistry};
use std::sync::Arc;
use tracing::debug;

/// The similarity score of one tool against an assembled context.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolScore {
    pub name: String,
    pub score: f32,
}

/// Routes assembled context to the best-matching tool.
pub struct SimilarityRouter {
    registry: Arc<ToolRegistry>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SimilarityRouter {
    pub fn new(registry: Arc<ToolRegistry>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { registry, embedder }
    }

    /// Embed the context and select the best-matching tool name.
    ///
    /// Pure scoring over the cached catalog embeddings; the only
    /// latency is the single embedding call.
    pub async fn route(&self, context: &str) -> Result<String> {
        let embedding = self.embedder.embed(context).await?;
        let selected = self.select(&embedding)?;
        Ok(selected.spec.name.clone())
    }

    /// Score every tool against a context embedding, best first.
    ///
    /// Ties keep registration order (the sort is stable).
    pub fn score_all(&self, context_embedding: &[f32]) -> Vec<ToolScore> {
        let mut scores: Vec<ToolScore> = self
            .registry
            .all()
            .iter()
            .map(|tool| ToolScore {
                name: tool.spec.name.clone(),
                score: cosine_similarity(context_embedding, &tool.embedding),
            })
            .collect();

        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scores
    }

    /// Select the maximum-similarity tool.
    ///
    /// Tie-break is deterministic: the scan keeps a candidate only on
    /// strictly greater similarity, so equal scores resolve to the
    /// first-registered tool, never to iteration luck.
    pub fn select(&self, context_embedding: &[f32]) -> Result<&RegisteredTool> {
        let mut best: Option<(&RegisteredTool, f32)> = None;

        for tool in self.registry.all() {
            let score = cosine_similarity(context_embedding, &tool.embedding);
            debug!(tool = %tool.spec.name, score, "Scored tool");
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((tool, score)),
            }
        }

        best.map(|(tool, _)| tool)
            .ok_or(Error::Router(RouterError::NoToolsAvailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use semroute_core::error::ProviderError;
    use semroute_core::tool::ToolSpec;

    /// Maps fixed texts to fixed vectors; anything else embeds as the
    /// zero vector.
    struct TableEmbedder(Vec<(&'static str, Vec<f32>)>);

    #[async_trait]
    impl EmbeddingProvider for TableEmbedder {
        fn name(&self) -> &str {
            "table"
        }
        async fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, ProviderError> {
            Ok(self
                .0
                .iter()
                .find(|(t, _)| *t == text)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| vec![0.0, 0.0, 0.0]))
        }
    }

    fn noop(_: &str) -> String {
        String::new()
    }

    async fn registry(embedder: &TableEmbedder, specs: Vec<ToolSpec>) -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::build(specs, embedder).await.unwrap())
    }

    #[tokio::test]
    async fn routes_to_highest_similarity() {
        let embedder = TableEmbedder(vec![
            ("weather questions", vec![1.0, 0.0, 0.0]),
            ("math questions", vec![0.0, 1.0, 0.0]),
            ("what is 2 + 2", vec![0.1, 0.9, 0.0]),
        ]);
        let registry = registry(
            &embedder,
            vec![
                ToolSpec::responder("weather", "weather questions", noop),
                ToolSpec::responder("math", "math questions", noop),
            ],
        )
        .await;

        let router = SimilarityRouter::new(registry, Arc::new(embedder));
        let name = router.route("what is 2 + 2").await.unwrap();
        assert_eq!(name, "math");
    }

    #[tokio::test]
    async fn routing_is_deterministic() {
        let embedder = TableEmbedder(vec![
            ("a", vec![1.0, 0.2, 0.0]),
            ("b", vec![0.2, 1.0, 0.0]),
            ("query", vec![0.8, 0.3, 0.0]),
        ]);
        let registry = registry(
            &embedder,
            vec![
                ToolSpec::responder("first", "a", noop),
                ToolSpec::responder("second", "b", noop),
            ],
        )
        .await;
        let router = SimilarityRouter::new(registry, Arc::new(embedder));

        let first = router.route("query").await.unwrap();
        for _ in 0..10 {
            assert_eq!(router.route("query").await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn equal_scores_pick_first_registered() {
        // Both descriptions embed to the same vector, so every context
        // scores them identically.
        let embedder = TableEmbedder(vec![
            ("same description", vec![1.0, 1.0, 0.0]),
            ("query", vec![1.0, 0.0, 0.0]),
        ]);
        let registry = registry(
            &embedder,
            vec![
                ToolSpec::responder("earlier", "same description", noop),
                ToolSpec::responder("later", "same description", noop),
            ],
        )
        .await;
        let router = SimilarityRouter::new(registry, Arc::new(embedder));

        for _ in 0..10 {
            assert_eq!(router.route("query").await.unwrap(), "earlier");
        }
    }

    #[tokio::test]
    async fn zero_norm_context_still_selects_a_tool() {
        let embedder = TableEmbedder(vec![("desc", vec![1.0, 0.0, 0.0])]);
        let registry = registry(
            &embedder,
            vec![ToolSpec::responder("only", "desc", noop)],
        )
        .await;
        let router = SimilarityRouter::new(registry, Arc::new(embedder));

        // "unknown" embeds to the zero vector; every score is 0.0 but
        // a tool is still returned.
        assert_eq!(router.route("unknown").await.unwrap(), "only");
    }

    #[tokio::test]
    async fn score_all_orders_descending() {
        let embedder = TableEmbedder(vec![
            ("close", vec![1.0, 0.1, 0.0]),
            ("far", vec![0.0, 0.0, 1.0]),
            ("query", vec![1.0, 0.0, 0.0]),
        ]);
        let registry = registry(
            &embedder,
            vec![
                ToolSpec::responder("far_tool", "far", noop),
                ToolSpec::responder("close_tool", "close", noop),
            ],
        )
        .await;
        let router = SimilarityRouter::new(registry.clone(), Arc::new(embedder));

        let scores = router.score_all(&[1.0, 0.0, 0.0]);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].name, "close_tool");
        assert!(scores[0].score > scores[1].score);
    }

    #[tokio::test]
    async fn route_always_returns_a_registered_name() {
        let embedder = TableEmbedder(vec![
            ("one", vec![0.3, 0.3, 0.3]),
            ("two", vec![0.5, 0.1, 0.9]),
        ]);
        let registry = registry(
            &embedder,
            vec![
                ToolSpec::responder("t1", "one", noop),
                ToolSpec::responder("t2", "two", noop),
            ],
        )
        .await;
        let router = SimilarityRouter::new(registry.clone(), Arc::new(embedder));

        for query in ["one", "two", "never seen"] {
            let name = router.route(query).await.unwrap();
            assert!(registry.get(&name).is_some());
        }
    }
}
