use std::thread;

use tracing::debug;

use crate::browser::{BrowserControl, Key, WebElement};
use crate::config::{ScrollConfig, ScrollStrategy};
use crate::error::Result;

/// Summary of one incremental-loading run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub iterations: usize,
    /// Message nodes rendered when loading stopped (`None` for the fixed strategy)
    pub messages: Option<usize>,
    /// Whether loading stopped because no more history appeared
    pub converged: bool,
}

/// Pages backwards through a conversation so older history gets rendered.
///
/// The view only holds a lazily loaded window of messages; every PageUp that
/// reaches the top of that window makes the client fetch an older batch.
pub struct IncrementalLoader<'a> {
    policy: &'a ScrollConfig,
    /// Selector counting rendered message nodes, used to detect convergence
    progress_selector: String,
}

impl<'a> IncrementalLoader<'a> {
    pub fn new(policy: &'a ScrollConfig, progress_selector: impl Into<String>) -> Self {
        Self { policy, progress_selector: progress_selector.into() }
    }

    /// Focus `view` and page backwards until the policy says stop.
    ///
    /// With [`ScrollStrategy::Fixed`] exactly `max_iterations` rounds run.
    /// With [`ScrollStrategy::UntilStable`] loading also stops once the number of
    /// rendered messages has not changed for `stable_rounds` consecutive rounds.
    pub fn load<B: BrowserControl + ?Sized>(
        &self,
        browser: &mut B,
        view: &WebElement,
    ) -> Result<LoadOutcome> {
        browser.focus(view)?;

        match self.policy.strategy {
            ScrollStrategy::Fixed => {
                for _ in 0..self.policy.max_iterations {
                    self.page_back(browser)?;
                }
                debug!(iterations = self.policy.max_iterations, "history loaded (fixed)");
                Ok(LoadOutcome {
                    iterations: self.policy.max_iterations,
                    messages: None,
                    converged: false,
                })
            }
            ScrollStrategy::UntilStable => self.load_until_stable(browser),
        }
    }

    fn load_until_stable<B: BrowserControl + ?Sized>(
        &self,
        browser: &mut B,
    ) -> Result<LoadOutcome> {
        let mut count = self.rendered(browser)?;
        let mut unchanged = 0;
        let mut iterations = 0;

        while iterations < self.policy.max_iterations {
            self.page_back(browser)?;
            iterations += 1;

            let next = self.rendered(browser)?;
            if next == count {
                unchanged += 1;
                if unchanged >= self.policy.stable_rounds {
                    debug!(iterations, messages = count, "history loaded (converged)");
                    return Ok(LoadOutcome { iterations, messages: Some(count), converged: true });
                }
            } else {
                unchanged = 0;
                count = next;
            }
        }

        debug!(iterations, messages = count, "history loading hit iteration cap");
        Ok(LoadOutcome { iterations, messages: Some(count), converged: false })
    }

    fn page_back<B: BrowserControl + ?Sized>(&self, browser: &mut B) -> Result<()> {
        browser.send_key(Key::PageUp)?;
        // Give the client time to fetch and render the older batch
        thread::sleep(self.policy.pause());
        Ok(())
    }

    fn rendered<B: BrowserControl + ?Sized>(&self, browser: &mut B) -> Result<usize> {
        Ok(browser.find_all(&self.progress_selector)?.len())
    }
}
