use tracing::debug;

use super::snapshot::{Snapshot, find_attribute, find_text};
use crate::config::CompiledSelectors;
use crate::models::{Direction, RawRecord};

/// Parse every message node of one direction into raw records.
///
/// Authors come from the node's author label, except for outbound messages
/// which are always attributed to `operator`. Content is the node's text; when
/// that is empty the first embedded image's `src` is used instead. Nodes with
/// neither (audio, video, deleted messages) are dropped.
///
/// Records are returned in document order.
pub fn parse_records(
    snapshot: &Snapshot,
    direction: Direction,
    selectors: &CompiledSelectors,
    operator: &str,
) -> Vec<RawRecord> {
    let node_selector = match direction {
        Direction::Outbound => &selectors.outbound_message,
        Direction::Inbound => &selectors.inbound_message,
    };

    let mut records = Vec::new();
    let mut dropped = 0;

    for (index, node) in snapshot.select(node_selector).enumerate() {
        let author = match direction.author_for(operator) {
            Some(fixed) => fixed.to_string(),
            None => find_text(node, &selectors.message_author),
        };

        let text = find_text(node, &selectors.message_text);
        if !text.is_empty() {
            records.push(RawRecord::text(author, text));
            continue;
        }

        match find_attribute(node, &selectors.message_image, "src") {
            Some(url) => records.push(RawRecord::media(author, url)),
            None => {
                debug!(?direction, index, "dropping message node with no text or image");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        debug!(?direction, kept = records.len(), dropped, "parsed message nodes");
    }

    records
}
