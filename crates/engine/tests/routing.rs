//! End-to-end engine scenarios against the default tool catalog.

use async_trait::async_trait;
use semroute_core::error::ProviderError;
use semroute_core::message::{Role, SessionId};
use semroute_core::provider::{EmbeddingProvider, GenerationProvider};
use semroute_core::tool::ToolRegistry;
use semroute_engine::RouterEngine;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

/// Deterministic stand-in for the embedding model: one dimension per
/// topic, valued by stem occurrences. Unrelated text embeds near zero.
struct StemEmbedder {
    /// Records every embedded text, newest last.
    seen: Mutex<Vec<String>>,
}

impl StemEmbedder {
    fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
        }
    }

    fn last_seen(&self) -> String {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

const STEM_GROUPS: [&[&str]; 4] = [
    &["suicid", "crisis", "kill myself", "end my life"],
    &["stress", "pressure", "tired", "overwhelm", "motivat", "comfort", "exhaust"],
    &["anxi", "worr", "fear", "scared", "afraid", "reassur"],
    &["mark", "score", "result", "student", "percent", "subject"],
];

#[async_trait]
impl EmbeddingProvider for StemEmbedder {
    fn name(&self) -> &str {
        "stem"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.seen.lock().unwrap().push(text.to_string());
        let lower = text.to_lowercase();
        Ok(STEM_GROUPS
            .iter()
            .map(|stems| {
                stems
                    .iter()
                    .map(|stem| lower.matches(stem).count())
                    .sum::<usize>() as f32
            })
            .collect())
    }
}

struct CannedGenerator(&'static str);

#[async_trait]
impl GenerationProvider for CannedGenerator {
    fn name(&self) -> &str {
        "canned"
    }
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

struct FailingGenerator;

#[async_trait]
impl GenerationProvider for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Network("model unavailable".into()))
    }
}

struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    fn name(&self) -> &str {
        "failing"
    }
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
        Err(ProviderError::Timeout("embedding service down".into()))
    }
}

/// Generator slow enough to expose same-session races.
struct SlowGenerator;

#[async_trait]
impl GenerationProvider for SlowGenerator {
    fn name(&self) -> &str {
        "slow"
    }
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        tokio::time::sleep(Duration::from_millis(25)).await;
        Ok("generated".into())
    }
}

async fn default_registry(embedder: &StemEmbedder) -> Arc<ToolRegistry> {
    Arc::new(
        ToolRegistry::build(semroute_tools::default_catalog(), embedder)
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn anxious_message_routes_to_negative_prompt() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(
        registry,
        embedder.clone(),
        Arc::new(CannedGenerator("It's normal to feel this way before exams.")),
    );

    let reply = engine
        .process_message(SessionId::from("s1"), "I feel so anxious about my exams")
        .await
        .unwrap();

    assert_eq!(reply.tool_used, "NegativePrompt");
    assert!(!reply.degraded);
    // Empty memory: the routed context is exactly the message.
    assert_eq!(embedder.last_seen(), "I feel so anxious about my exams");
}

#[tokio::test]
async fn marks_message_routes_to_student_marks() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(registry, embedder, Arc::new(CannedGenerator("unused")));

    let reply = engine
        .process_message(SessionId::from("s1"), "Show me my marks and my result")
        .await
        .unwrap();

    assert_eq!(reply.tool_used, "StudentMarks");
    assert!(reply.response.contains("Total:"));
}

#[tokio::test]
async fn crisis_message_routes_to_static_safety_tool() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    // Generator would fail, but the crisis tool must never call it.
    let engine = RouterEngine::new(registry, embedder, Arc::new(FailingGenerator));

    let reply = engine
        .process_message(SessionId::from("s1"), "I am in crisis and want to end my life")
        .await
        .unwrap();

    assert_eq!(reply.tool_used, "SuicideHelp");
    assert!(!reply.degraded);
    assert!(reply.response.contains("helpline"));
}

#[tokio::test]
async fn window_bounds_context_while_history_keeps_everything() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(registry, embedder.clone(), Arc::new(CannedGenerator("ok")))
        .with_window(6);

    let sid = SessionId::from("s1");
    for i in 1..=4 {
        engine
            .process_message(sid.clone(), &format!("message {i}"))
            .await
            .unwrap();
    }

    // 4 exchanges = 8 turns; history keeps all of them.
    assert_eq!(engine.history().await.len(), 8);

    // The 5th message sees only the 6 retained turns plus itself.
    engine.process_message(sid, "message 5").await.unwrap();
    let context = embedder.last_seen();
    let lines: Vec<&str> = context.lines().collect();
    assert_eq!(lines.len(), 7);
    // Turns 1–2 (the first exchange) were evicted.
    assert_eq!(lines[0], "user: message 2");
    assert_eq!(lines[6], "message 5");
}

#[tokio::test]
async fn generation_failure_degrades_but_keeps_tool_label() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(registry, embedder, Arc::new(FailingGenerator));

    let reply = engine
        .process_message(SessionId::from("s1"), "I'm so worried about everything")
        .await
        .unwrap();

    // No error surfaces; the reply is labeled and marked degraded.
    assert_eq!(reply.tool_used, "NegativePrompt");
    assert!(reply.degraded);
    assert!(!reply.response.is_empty());

    let latest = engine.latest().await.unwrap();
    assert_eq!(latest.role, Role::Assistant);
    assert!(latest.degraded);
    assert_eq!(latest.tool_used.as_deref(), Some("NegativePrompt"));
}

#[tokio::test]
async fn embedding_failure_falls_back_to_configured_tool() {
    let build_embedder = StemEmbedder::new();
    let registry = default_registry(&build_embedder).await;
    let engine = RouterEngine::new(
        registry,
        Arc::new(FailingEmbedder),
        Arc::new(CannedGenerator("unused")),
    );

    let reply = engine
        .process_message(SessionId::from("s1"), "hello there")
        .await
        .unwrap();

    assert_eq!(reply.tool_used, "PositivePrompt");
    assert!(reply.degraded);

    // Both turns were still recorded.
    let history = engine.history().await;
    assert_eq!(history.len(), 2);
    assert!(history[1].degraded);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(registry, embedder.clone(), Arc::new(CannedGenerator("ok")));

    let a = SessionId::from("a");
    let b = SessionId::from("b");

    engine
        .process_message(a.clone(), "a secret only session a knows")
        .await
        .unwrap();
    engine.process_message(b.clone(), "hello from b").await.unwrap();

    // Session B's routing context must not contain session A's turns.
    let context = embedder.last_seen();
    assert_eq!(context, "hello from b");

    // History keeps both sessions, each turn tagged with its session.
    let history = engine.history().await;
    assert_eq!(history.len(), 4);
    assert!(history.iter().take(2).all(|t| t.session_id == a));
    assert!(history.iter().skip(2).all(|t| t.session_id == b));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_session_requests_record_whole_turns() {
    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = Arc::new(RouterEngine::new(
        registry,
        embedder,
        Arc::new(SlowGenerator),
    ));

    let sid = SessionId::from("shared");
    let e1 = engine.clone();
    let s1 = sid.clone();
    let t1 = tokio::spawn(async move { e1.process_message(s1, "I'm worried").await });
    let e2 = engine.clone();
    let s2 = sid.clone();
    let t2 = tokio::spawn(async move { e2.process_message(s2, "I'm stressed").await });

    t1.await.unwrap().unwrap();
    t2.await.unwrap().unwrap();

    // Four turns in some serial order: each user turn is immediately
    // followed by its assistant turn, never interleaved.
    let history = engine.history().await;
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[2].role, Role::User);
    assert_eq!(history[3].role, Role::Assistant);
}

#[tokio::test]
async fn provider_timeout_degrades_instead_of_hanging() {
    struct HangingGenerator;

    #[async_trait]
    impl GenerationProvider for HangingGenerator {
        fn name(&self) -> &str {
            "hanging"
        }
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    let embedder = Arc::new(StemEmbedder::new());
    let registry = default_registry(&embedder).await;
    let engine = RouterEngine::new(registry, embedder, Arc::new(HangingGenerator))
        .with_provider_timeout(Duration::from_millis(50));

    let reply = engine
        .process_message(SessionId::from("s1"), "I'm so worried")
        .await
        .unwrap();

    assert_eq!(reply.tool_used, "NegativePrompt");
    assert!(reply.degraded);
}
