//! Minimal W3C WebDriver client (chromedriver and compatible drivers).
//!
//! Only the commands the scraper needs are implemented. Every command is a
//! blocking HTTP round trip; replies carry their payload under `value`, and
//! error replies carry `value.error` / `value.message`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::{BrowserControl, Key, WebElement};
use crate::error::{Result, ScrapeError};

/// Property name under which W3C drivers return element references
const ELEMENT_KEY: &str = "element-6066-11e4-a52f-4a99b5b2f8fe";
const NO_SUCH_ELEMENT: &str = "no such element";
/// Slack on top of the page-load timeout before the HTTP client gives up
const HTTP_SLACK: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub headless: bool,
    pub page_load_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { headless: false, page_load_timeout: Duration::from_secs(15) }
    }
}

/// An open browser session. The session is deleted when this value drops.
pub struct WebDriverSession {
    client: Client,
    base_url: String,
    session_id: String,
}

impl WebDriverSession {
    /// Start a Chrome session on the driver at `webdriver_url`
    pub fn start(webdriver_url: &str, options: &SessionOptions) -> Result<Self> {
        let client = Client::builder().timeout(options.page_load_timeout + HTTP_SLACK).build()?;
        let base_url = webdriver_url.trim_end_matches('/').to_string();

        let url = format!("{}/session", base_url);
        let value = send(&client, Method::POST, &url, Some(capabilities(options)))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ScrapeError::UnexpectedResponse("new session reply has no sessionId".to_string())
            })?
            .to_string();

        let session = Self { client, base_url, session_id };
        let page_load_ms = options.page_load_timeout.as_millis() as u64;
        session.command(Method::POST, "timeouts", Some(json!({ "pageLoad": page_load_ms })))?;
        if !options.headless {
            session.command(Method::POST, "window/maximize", Some(json!({})))?;
        }

        info!(
            session = %session.session_id,
            headless = options.headless,
            "webdriver session started"
        );
        Ok(session)
    }

    fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/session/{}/{}", self.base_url, self.session_id, path);
        debug!(%method, path, "webdriver command");
        send(&self.client, method, &url, body)
    }
}

fn capabilities(options: &SessionOptions) -> Value {
    let mut args = vec!["--disable-notifications"];
    if options.headless {
        args.push("--headless=new");
        args.push("--window-size=1920,1080");
    }
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": { "args": args }
            }
        }
    })
}

fn send(client: &Client, method: Method, url: &str, body: Option<Value>) -> Result<Value> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send()?;
    let status = response.status();
    reply(status, response.json::<Value>()?)
}

/// Unwrap a driver reply: the `value` member on success, a
/// [`ScrapeError::WebDriver`] built from `value.error` / `value.message` otherwise
fn reply(status: StatusCode, payload: Value) -> Result<Value> {
    let value = match payload {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    if status.is_success() {
        return Ok(value);
    }

    let field =
        |name: &str| value.get(name).and_then(Value::as_str).unwrap_or_default().to_string();
    let error = field("error");
    Err(ScrapeError::WebDriver {
        status: status.as_u16(),
        error: if error.is_empty() { "unknown error".to_string() } else { error },
        message: field("message"),
    })
}

/// A `no such element` reply means the lookup simply matched nothing
fn optional_element(result: Result<Value>) -> Result<Option<WebElement>> {
    match result {
        Ok(value) => element_from(&value).map(Some),
        Err(ScrapeError::WebDriver { error, .. }) if error == NO_SUCH_ELEMENT => Ok(None),
        Err(e) => Err(e),
    }
}

fn element_from(value: &Value) -> Result<WebElement> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| WebElement(id.to_string()))
        .ok_or_else(|| {
            ScrapeError::UnexpectedResponse(format!("not an element reference: {}", value))
        })
}

fn locator(selector: &str) -> Value {
    json!({ "using": "css selector", "value": selector })
}

impl BrowserControl for WebDriverSession {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.command(Method::POST, "url", Some(json!({ "url": url })))?;
        Ok(())
    }

    fn click(&mut self, element: &WebElement) -> Result<()> {
        self.command(Method::POST, &format!("element/{}/click", element.id()), Some(json!({})))?;
        Ok(())
    }

    fn send_key(&mut self, key: Key) -> Result<()> {
        let code = key.code_point().to_string();
        let actions = json!({
            "actions": [{
                "type": "key",
                "id": "keyboard",
                "actions": [
                    { "type": "keyDown", "value": code },
                    { "type": "keyUp", "value": code }
                ]
            }]
        });
        self.command(Method::POST, "actions", Some(actions))?;
        Ok(())
    }

    fn focus(&mut self, element: &WebElement) -> Result<()> {
        // The message view is not focusable; clicking it is what routes keys into it
        self.click(element)
    }

    fn find_element(&mut self, selector: &str) -> Result<Option<WebElement>> {
        optional_element(self.command(Method::POST, "element", Some(locator(selector))))
    }

    fn find_all(&mut self, selector: &str) -> Result<Vec<WebElement>> {
        let value = self.command(Method::POST, "elements", Some(locator(selector)))?;
        match value {
            Value::Array(items) => items.iter().map(element_from).collect(),
            other => Err(ScrapeError::UnexpectedResponse(format!(
                "expected element list, got {}",
                other
            ))),
        }
    }

    fn page_source(&mut self) -> Result<String> {
        match self.command(Method::GET, "source", None)? {
            Value::String(source) => Ok(source),
            other => Err(ScrapeError::UnexpectedResponse(format!(
                "page source is not a string: {}",
                other
            ))),
        }
    }

    /// Runs `script` as a function body; use `return` to hand a value back
    fn evaluate_script(&mut self, script: &str) -> Result<Value> {
        self.command(Method::POST, "execute/sync", Some(json!({ "script": script, "args": [] })))
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        let url = format!("{}/session/{}", self.base_url, self.session_id);
        if let Err(e) = send(&self.client, Method::DELETE, &url, None) {
            warn!(session = %self.session_id, error = %e, "failed to close webdriver session");
        }
    }
}
