use tracing::{debug, info};

use super::authors::resolve_authors;
use super::loader::IncrementalLoader;
use super::wait::ReadinessWaiter;
use crate::browser::{BrowserControl, WebElement};
use crate::config::{CompiledSelectors, ScraperConfig};
use crate::error::Result;
use crate::models::{Conversation, Direction, Message, RawRecord};
use crate::parsers::{Snapshot, parse_chat_title, parse_records};

/// Extracts one conversation from the live client
pub struct ConversationExtractor<'a> {
    config: &'a ScraperConfig,
    selectors: &'a CompiledSelectors,
    waiter: ReadinessWaiter,
    loader: IncrementalLoader<'a>,
}

impl<'a> ConversationExtractor<'a> {
    pub fn new(config: &'a ScraperConfig, selectors: &'a CompiledSelectors) -> Self {
        Self {
            config,
            selectors,
            waiter: ReadinessWaiter::new(config.timeouts.poll_interval()),
            loader: IncrementalLoader::new(&config.scroll, config.selectors.any_message()),
        }
    }

    /// Open the conversation behind `entry` and extract its messages.
    ///
    /// Selecting the entry navigates the client. Extraction waits for the title
    /// to render, pages back through history, then parses one snapshot of the
    /// expanded view for both directions.
    ///
    /// # Errors
    ///
    /// A readiness timeout (title, message view, settle script) or a driver
    /// failure is returned as-is; nothing is extracted for this conversation.
    pub fn extract<B: BrowserControl + ?Sized>(
        &self,
        browser: &mut B,
        entry: &WebElement,
    ) -> Result<Conversation> {
        let timeout = self.config.timeouts.element();
        let css = &self.config.selectors;

        browser.click(entry)?;
        self.waiter.wait_for_element(browser, &css.chat_title, timeout)?;
        let settle = self.config.readiness.settle_script.as_deref();
        if let Some(script) = settle.filter(|s| !s.trim().is_empty()) {
            self.waiter.wait_for_script(browser, script, timeout)?;
        }

        let view = self.waiter.wait_for_element(browser, &css.message_view, timeout)?;
        let outcome = self.loader.load(browser, &view)?;

        let snapshot = Snapshot::parse(&browser.page_source()?);
        let conversation =
            extract_from_snapshot(&snapshot, self.selectors, &self.config.operator_name);

        info!(
            conversation = %conversation.name,
            messages = conversation.messages.len(),
            iterations = outcome.iterations,
            converged = outcome.converged,
            "extracted conversation"
        );
        Ok(conversation)
    }
}

/// Build a [`Conversation`] from a snapshot of an open conversation.
///
/// Both directions are parsed from the same snapshot; only the inbound stream
/// needs author resolution.
pub fn extract_from_snapshot(
    snapshot: &Snapshot,
    selectors: &CompiledSelectors,
    operator: &str,
) -> Conversation {
    let name = parse_chat_title(snapshot, selectors);
    let outbound = parse_records(snapshot, Direction::Outbound, selectors, operator);
    let mut inbound = parse_records(snapshot, Direction::Inbound, selectors, operator);
    resolve_authors(&mut inbound);

    if inbound.first().is_some_and(|r| r.author.is_empty()) {
        debug!(conversation = %name, "first inbound message has no author label");
    }

    Conversation::new(name, merge_messages(outbound, inbound))
}

/// Outbound messages first, then inbound, each in document order.
///
/// The two directions come from separate subtree scans, so this is not
/// chronological order.
pub fn merge_messages(outbound: Vec<RawRecord>, inbound: Vec<RawRecord>) -> Vec<Message> {
    outbound.into_iter().chain(inbound).map(RawRecord::into_message).collect()
}
