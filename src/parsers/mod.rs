//! Markup parsers for snapshots of the rendered client
//!
//! # Error Handling Strategy
//!
//! Parsing never fails. A snapshot is whatever the browser rendered, so the
//! parsers degrade instead of erroring:
//!
//! - **Missing elements**: an absent title or author label yields an empty string.
//!
//! - **Unsupported messages**: nodes with neither text nor an image (voice notes,
//!   videos, deleted messages) are dropped and counted at `debug` level. This is
//!   a known completeness gap, not an error the caller sees.
//!
//! - **Invalid selectors**: rejected earlier, when [`crate::config::CompiledSelectors`]
//!   is built, so parsing only ever sees valid selectors.

pub mod chat_list;
pub mod messages;
pub mod snapshot;

pub use chat_list::{ChatListEntry, parse_chat_list, parse_chat_title};
pub use messages::parse_records;
pub use snapshot::Snapshot;
