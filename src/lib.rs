//! Webchat Scraper - Extract conversations from a web messaging client
//!
//! The client renders conversations incrementally with client-side scripting,
//! so a static download of the page holds almost nothing. This library drives
//! a browser through the client instead:
//!
//! - Waiting for the conversation list to render (after the user logs in)
//! - Opening each conversation and paging back until older history has loaded
//! - Parsing a snapshot of the expanded view into ordered messages
//! - Resolving authors of continuation messages that omit the sender label
//!
//! # Example
//!
//! ```no_run
//! use webchat_scraper::browser::WebDriverSession;
//! use webchat_scraper::browser::webdriver::SessionOptions;
//! use webchat_scraper::{ChatScraper, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let session = WebDriverSession::start(&config.webdriver_url, &SessionOptions::default())?;
//! let mut scraper = ChatScraper::new(session, config)?;
//! for conversation in scraper.scrape_all()? {
//!     println!("{}: {} messages", conversation.name, conversation.messages.len());
//! }
//! # Ok::<(), webchat_scraper::ScrapeError>(())
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod parsers;

// Re-export commonly used types
pub use browser::{BrowserControl, Key, WebElement};
pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use extract::{ChatScraper, extract_from_snapshot, resolve_authors};
pub use models::{ContentKind, Conversation, Direction, Message, RawRecord};
pub use parsers::{Snapshot, parse_records};
