//! Scraper configuration.
//!
//! Every field has a default targeting the web messaging client the scraper
//! was built for, so an empty file (or no file at all) is a valid config.
//! Values are layered from TOML files by [`loader::load`] and CSS selectors are
//! compiled once by [`CompiledSelectors::from_config`].

pub mod loader;
pub mod selectors;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use loader::load;
pub use selectors::CompiledSelectors;

/// What to do when extracting a single conversation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnError {
    /// Stop the whole scrape and return the error
    #[default]
    Abort,
    /// Log the failure and continue with the next conversation
    Skip,
}

/// How the incremental loader decides it is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollStrategy {
    /// Always run exactly `max_iterations` rounds
    Fixed,
    /// Stop once the message count is unchanged for `stable_rounds` rounds,
    /// capped at `max_iterations`
    #[default]
    UntilStable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub url: String,
    pub webdriver_url: String,
    /// Author recorded on every outbound message
    pub operator_name: String,
    pub headless: bool,
    pub on_error: OnError,
    /// Stop after this many conversations have been attempted. Conversations
    /// skipped under [`OnError::Skip`] count towards the limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_conversations: Option<usize>,
    pub timeouts: TimeoutConfig,
    pub scroll: ScrollConfig,
    pub readiness: ReadinessConfig,
    pub selectors: SelectorConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            url: "https://web.whatsapp.com/".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            operator_name: "Me".to_string(),
            headless: false,
            on_error: OnError::Abort,
            max_conversations: None,
            timeouts: TimeoutConfig::default(),
            scroll: ScrollConfig::default(),
            readiness: ReadinessConfig::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// List-pane readiness; covers the user scanning the login QR code
    pub login_secs: u64,
    /// Per-conversation element readiness (title, message view)
    pub element_secs: u64,
    pub page_load_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { login_secs: 600, element_secs: 30, page_load_secs: 15, poll_interval_ms: 250 }
    }
}

impl TimeoutConfig {
    pub fn login(&self) -> Duration {
        Duration::from_secs(self.login_secs)
    }

    pub fn element(&self) -> Duration {
        Duration::from_secs(self.element_secs)
    }

    pub fn page_load(&self) -> Duration {
        Duration::from_secs(self.page_load_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub strategy: ScrollStrategy,
    pub max_iterations: usize,
    pub stable_rounds: usize,
    pub pause_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            strategy: ScrollStrategy::UntilStable,
            max_iterations: 50,
            stable_rounds: 2,
            pause_ms: 1000,
        }
    }
}

impl ScrollConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// JavaScript function body polled after a conversation opens until it returns
    /// a truthy value, e.g. `return document.readyState === 'complete'`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_script: Option<String>,
}

/// CSS selectors describing the client's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub list_pane: String,
    pub list_body: String,
    pub list_entry: String,
    /// Element inside a list entry whose `title` attribute (or text) names the
    /// chat; entries without one are skipped
    pub entry_name: String,
    pub chat_title: String,
    pub message_view: String,
    pub outbound_message: String,
    pub inbound_message: String,
    pub message_author: String,
    pub message_text: String,
    pub message_image: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            list_pane: ".pane-two".to_string(),
            list_body: ".pane-body.pane-list-body".to_string(),
            list_entry: "div.infinite-list-item".to_string(),
            entry_name: "span[title]".to_string(),
            chat_title: "h2.chat-title".to_string(),
            message_view: ".message-list".to_string(),
            outbound_message: ".message.message-out".to_string(),
            inbound_message: ".message.message-in".to_string(),
            message_author: ".message-author .text-clickable".to_string(),
            message_text: ".selectable-text".to_string(),
            message_image: ".image-thumb > img".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Selector group matching message nodes of both directions
    pub fn any_message(&self) -> String {
        format!("{}, {}", self.outbound_message, self.inbound_message)
    }
}
