use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::browser::{BrowserControl, WebElement};
use crate::error::{Result, ScrapeError};

/// Polls readiness conditions against the live document.
///
/// Waits block the calling thread. The predicate is checked once immediately,
/// then every `poll_interval` until it holds or `timeout` has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessWaiter {
    poll_interval: Duration,
}

impl ReadinessWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Wait until `predicate` returns true.
    ///
    /// Errors from the predicate abort the wait immediately. On timeout the
    /// error names `condition`.
    pub fn wait_until<F>(&self, condition: &str, timeout: Duration, mut predicate: F) -> Result<()>
    where
        F: FnMut() -> Result<bool>,
    {
        let started = Instant::now();
        loop {
            if predicate()? {
                let waited_ms = started.elapsed().as_millis() as u64;
                debug!(condition, waited_ms, "condition met");
                return Ok(());
            }

            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(ScrapeError::Timeout { condition: condition.to_string(), timeout });
            }
            thread::sleep(self.poll_interval.min(timeout - elapsed));
        }
    }

    /// Wait until an element matching `selector` exists and return it
    pub fn wait_for_element<B: BrowserControl + ?Sized>(
        &self,
        browser: &mut B,
        selector: &str,
        timeout: Duration,
    ) -> Result<WebElement> {
        let mut found = None;
        self.wait_until(&format!("element `{}`", selector), timeout, || {
            found = browser.find_element(selector)?;
            Ok(found.is_some())
        })?;
        found.ok_or_else(|| ScrapeError::ElementNotFound { selector: selector.to_string() })
    }

    /// Wait until `script` evaluates to a truthy value
    pub fn wait_for_script<B: BrowserControl + ?Sized>(
        &self,
        browser: &mut B,
        script: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.wait_until("settle script", timeout, || {
            Ok(is_truthy(&browser.evaluate_script(script)?))
        })
    }
}

/// JavaScript truthiness of a script result
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
