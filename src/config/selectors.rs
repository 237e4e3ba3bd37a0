use scraper::Selector;

use super::SelectorConfig;
use crate::error::{Result, ScrapeError};

/// Parse a CSS selector, reporting the offending text on failure
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Selectors used against markup snapshots, parsed once up front.
///
/// Live-browser lookups take the raw strings from [`SelectorConfig`];
/// compiling them here as well means a typo fails before the browser starts.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub list_entry: Selector,
    pub entry_name: Selector,
    pub chat_title: Selector,
    pub outbound_message: Selector,
    pub inbound_message: Selector,
    pub message_author: Selector,
    pub message_text: Selector,
    pub message_image: Selector,
}

impl CompiledSelectors {
    pub fn from_config(config: &SelectorConfig) -> Result<Self> {
        // Live-only selectors are validated even though they are not kept
        for live in [&config.list_pane, &config.list_body, &config.message_view] {
            compile(live)?;
        }

        Ok(Self {
            list_entry: compile(&config.list_entry)?,
            entry_name: compile(&config.entry_name)?,
            chat_title: compile(&config.chat_title)?,
            outbound_message: compile(&config.outbound_message)?,
            inbound_message: compile(&config.inbound_message)?,
            message_author: compile(&config.message_author)?,
            message_text: compile(&config.message_text)?,
            message_image: compile(&config.message_image)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors_compile() {
        let result = CompiledSelectors::from_config(&SelectorConfig::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let config = SelectorConfig { chat_title: "h2[".to_string(), ..SelectorConfig::default() };
        let err = CompiledSelectors::from_config(&config).unwrap_err();
        match err {
            ScrapeError::InvalidSelector { selector, .. } => assert_eq!(selector, "h2["),
            other => panic!("Expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_live_selector_is_reported() {
        let config =
            SelectorConfig { message_view: ">>>".to_string(), ..SelectorConfig::default() };
        assert!(CompiledSelectors::from_config(&config).is_err());
    }
}
