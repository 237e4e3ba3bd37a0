//! Data models for scraped conversations.
//!
//! - [`Conversation`] - One chat thread: its name and the extracted messages
//! - [`Message`] - A finalized message with a resolved author
//! - [`RawRecord`] - Per-node parser output, before author resolution
//! - [`Direction`] - Inbound (received) or outbound (sent by the operator)
//!
//! The public types serialize with serde so the binary can emit JSON.

pub mod conversation;
pub mod record;

pub use conversation::{ContentKind, Conversation, Message};
pub use record::{Direction, RawRecord};
