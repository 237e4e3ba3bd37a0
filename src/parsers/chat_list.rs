use tracing::debug;

use super::snapshot::{Snapshot, node_text};
use crate::config::CompiledSelectors;

/// One rendered entry of the conversation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatListEntry {
    /// Position among the entries currently rendered
    pub index: usize,
    /// Stable identifier used to tell entries apart across re-renders
    pub name: String,
}

/// Read the conversation list entries from a snapshot, in document order.
///
/// An entry is named by the `title` attribute of its name element, falling
/// back to that element's text. The rest of the entry (last message preview,
/// timestamp, unread badge) changes with activity and never contributes to
/// the name, so entries without a usable name element are left out.
pub fn parse_chat_list(snapshot: &Snapshot, selectors: &CompiledSelectors) -> Vec<ChatListEntry> {
    snapshot
        .select(&selectors.list_entry)
        .enumerate()
        .filter_map(|(index, entry)| {
            let Some(name_node) = entry.select(&selectors.entry_name).next() else {
                debug!(index, "skipping list entry without a name element");
                return None;
            };
            let name = name_node
                .value()
                .attr("title")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| node_text(name_node));
            if name.is_empty() {
                debug!(index, "skipping list entry with an empty name");
                return None;
            }
            Some(ChatListEntry { index, name })
        })
        .collect()
}

/// Title of the open conversation, empty when the title element is missing
pub fn parse_chat_title(snapshot: &Snapshot, selectors: &CompiledSelectors) -> String {
    snapshot.first_text(&selectors.chat_title)
}
