//! Provider implementations for semroute.
//!
//! One production backend: any OpenAI-compatible endpoint, which
//! covers OpenAI, OpenRouter, Ollama, vLLM, and friends for both
//! `/embeddings` and `/chat/completions`.

pub mod openai;

pub use openai::OpenAiCompatProvider;
