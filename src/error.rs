use std::time::Duration;

/// Errors raised while driving the browser and extracting conversations
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("timed out after {timeout:?} waiting for {condition}")]
    Timeout { condition: String, timeout: Duration },
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("webdriver error {status} ({error}): {message}")]
    WebDriver { status: u16, error: String, message: String },
    #[error("webdriver transport failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected webdriver response: {0}")]
    UnexpectedResponse(String),
}

impl ScrapeError {
    /// Whether this error belongs to the readiness-failure class.
    ///
    /// Missing elements count as timeouts because every lookup that can
    /// legitimately miss is wrapped in a readiness wait.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScrapeError::Timeout { .. } | ScrapeError::ElementNotFound { .. })
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_condition() {
        let err = ScrapeError::Timeout {
            condition: "element `h2.chat-title`".to_string(),
            timeout: Duration::from_secs(3),
        };
        assert_eq!(err.to_string(), "timed out after 3s waiting for element `h2.chat-title`");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_element_not_found_is_timeout_class() {
        let err = ScrapeError::ElementNotFound { selector: ".message-list".to_string() };
        assert!(err.is_timeout());
    }

    #[test]
    fn test_driver_errors_are_not_timeouts() {
        let err = ScrapeError::WebDriver {
            status: 500,
            error: "unknown error".to_string(),
            message: "chrome not reachable".to_string(),
        };
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("chrome not reachable"));
    }
}
