use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use super::conversation::ConversationExtractor;
use super::wait::ReadinessWaiter;
use crate::browser::{BrowserControl, WebElement};
use crate::config::{CompiledSelectors, OnError, ScraperConfig};
use crate::error::{Result, ScrapeError};
use crate::models::Conversation;
use crate::parsers::{ChatListEntry, Snapshot, parse_chat_list};

/// Top-level driver: walks the conversation list and extracts every entry.
///
/// Owns the browser session; conversations are processed one at a time
/// because the client only ever shows one open conversation.
pub struct ChatScraper<B> {
    browser: B,
    config: ScraperConfig,
    selectors: CompiledSelectors,
}

impl<B: BrowserControl> ChatScraper<B> {
    /// Fails if any configured selector is invalid
    pub fn new(browser: B, config: ScraperConfig) -> Result<Self> {
        let selectors = CompiledSelectors::from_config(&config.selectors)?;
        Ok(Self { browser, config, selectors })
    }

    pub fn into_browser(self) -> B {
        self.browser
    }

    /// Extract every conversation in the list, in list order.
    ///
    /// Waits (up to the login timeout) for the list to render, since that
    /// requires the user to log in. After each extraction the list is read
    /// again and the first entry not yet processed is opened next, so entries
    /// that move because of new activity are neither skipped nor repeated.
    /// Entries are identified by their name element only; see
    /// [`parse_chat_list`].
    ///
    /// `max_conversations` limits attempts, so a conversation skipped under
    /// [`OnError::Skip`] uses up one slot.
    ///
    /// # Errors
    ///
    /// A list-pane timeout is always fatal. Per-conversation failures abort
    /// the scrape under [`OnError::Abort`] (losing earlier results) and are
    /// logged and skipped under [`OnError::Skip`].
    pub fn scrape_all(&mut self) -> Result<Vec<Conversation>> {
        let css = &self.config.selectors;
        let waiter = ReadinessWaiter::new(self.config.timeouts.poll_interval());
        let login_timeout = self.config.timeouts.login();

        self.browser.navigate(&self.config.url)?;
        waiter.wait_for_element(&mut self.browser, &css.list_pane, login_timeout)?;
        waiter.wait_for_element(&mut self.browser, &css.list_body, login_timeout)?;
        info!("conversation list rendered");

        let extractor = ConversationExtractor::new(&self.config, &self.selectors);
        let mut processed: HashSet<String> = HashSet::new();
        let mut conversations = Vec::new();
        let mut skipped = 0;

        loop {
            let attempted = conversations.len() + skipped;
            if self.config.max_conversations.is_some_and(|max| attempted >= max) {
                info!(limit = attempted, "conversation limit reached");
                break;
            }

            let snapshot = Snapshot::parse(&self.browser.page_source()?);
            let entries = parse_chat_list(&snapshot, &self.selectors);
            let next = entry_keys(entries).into_iter().find(|(key, _)| !processed.contains(key));
            let Some((key, entry)) = next else {
                break;
            };
            processed.insert(key);

            let result = open_entry(&mut self.browser, &css.list_entry, &entry)
                .and_then(|element| extractor.extract(&mut self.browser, &element));

            match result {
                Ok(conversation) => conversations.push(conversation),
                Err(e) if self.config.on_error == OnError::Skip => {
                    warn!(entry = %entry.name, error = %e, "skipping conversation");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(conversations = conversations.len(), skipped, "scrape finished");
        Ok(conversations)
    }
}

/// Key each entry by its name plus how many earlier entries share that name
fn entry_keys(entries: Vec<ChatListEntry>) -> Vec<(String, ChatListEntry)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    entries
        .into_iter()
        .map(|entry| {
            let occurrence = seen.entry(entry.name.clone()).or_default();
            let key = format!("{}#{}", entry.name, occurrence);
            *occurrence += 1;
            (key, entry)
        })
        .collect()
}

/// Resolve a parsed list entry to its live element
fn open_entry<B: BrowserControl + ?Sized>(
    browser: &mut B,
    selector: &str,
    entry: &ChatListEntry,
) -> Result<WebElement> {
    browser.find_all(selector)?.into_iter().nth(entry.index).ok_or_else(|| {
        ScrapeError::ElementNotFound { selector: format!("{} (entry {})", selector, entry.index) }
    })
}
