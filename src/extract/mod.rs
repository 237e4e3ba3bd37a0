//! Extraction engine: readiness waits, history loading, author resolution
//! and the per-conversation and list-level drivers.
//!
//! # Error Handling Strategy
//!
//! - **Readiness failures**: every wait returns [`crate::error::ScrapeError::Timeout`]
//!   once its timeout elapses. Timeouts are never swallowed at this level.
//!
//! - **Conversation failures**: [`list::ChatScraper`] either aborts or logs and
//!   skips, per [`crate::config::OnError`]. Waiting for the list itself is
//!   always fatal.
//!
//! - **Record failures**: handled by the parsers, which drop unusable nodes.
//!
//! Everything here is synchronous. Waits and scroll pauses block the calling
//! thread, and a single session is driven by a single caller.

pub mod authors;
pub mod conversation;
pub mod list;
pub mod loader;
pub mod wait;

pub use authors::resolve_authors;
pub use conversation::{ConversationExtractor, extract_from_snapshot, merge_messages};
pub use list::ChatScraper;
pub use loader::{IncrementalLoader, LoadOutcome};
pub use wait::ReadinessWaiter;
