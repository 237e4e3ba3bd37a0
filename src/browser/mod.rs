//! Browser-agnostic control surface used by the extraction engine.
//!
//! The engine only ever talks to [`BrowserControl`]; [`webdriver::WebDriverSession`]
//! is the production implementation and tests substitute a scripted fake.
//! Methods take `&mut self` because the rendered page is one shared, mutable
//! view: whoever holds the session owns the open conversation.

pub mod webdriver;

use crate::error::Result;

pub use webdriver::WebDriverSession;

/// Opaque handle to an element in the live document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebElement(pub String);

impl WebElement {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Keys the scraper sends to the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    PageUp,
}

impl Key {
    /// WebDriver code point for this key
    pub fn code_point(&self) -> char {
        match self {
            Key::PageUp => '\u{E00E}',
        }
    }
}

pub trait BrowserControl {
    fn navigate(&mut self, url: &str) -> Result<()>;
    fn click(&mut self, element: &WebElement) -> Result<()>;
    /// Send a key press to whatever element currently has focus
    fn send_key(&mut self, key: Key) -> Result<()>;
    fn focus(&mut self, element: &WebElement) -> Result<()>;
    /// First element matching a CSS selector, `None` when absent
    fn find_element(&mut self, selector: &str) -> Result<Option<WebElement>>;
    /// All elements matching a CSS selector, in document order
    fn find_all(&mut self, selector: &str) -> Result<Vec<WebElement>>;
    /// Serialized markup of the current document
    fn page_source(&mut self) -> Result<String>;
    fn evaluate_script(&mut self, script: &str) -> Result<serde_json::Value>;
}
