//! Conversation memory for semroute.
//!
//! Two independent structures per the engine's contract:
//!
//! - A bounded per-session window of recent turns (strict FIFO
//!   eviction), used to build routing/generation context.
//! - An unbounded, append-only history log of every turn that ever
//!   passed through any window, used for audit and retrieval.
//!
//! Eviction from a window never removes anything from history.

pub mod history;
pub mod session;
pub mod window;

pub use history::HistoryStore;
pub use session::SessionManager;
pub use window::ConversationMemory;
