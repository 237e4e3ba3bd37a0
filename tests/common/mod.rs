//! Shared test utilities for integration tests
#![allow(dead_code)]

use scraper::{Html, Selector};
use serde_json::Value;
use webchat_scraper::config::{ScrollConfig, ScrollStrategy, SelectorConfig, TimeoutConfig};
use webchat_scraper::error::Result;
use webchat_scraper::{BrowserControl, Key, ScraperConfig, WebElement};

/// Outbound text message markup
pub fn outbound_text(text: &str) -> String {
    format!(
        r#"<div class="message message-out"><div class="bubble"><span class="selectable-text">{}</span></div></div>"#,
        text
    )
}

/// Inbound text message markup; `None` renders a continuation without author label
pub fn inbound_text(author: Option<&str>, text: &str) -> String {
    inbound(author, &format!(r#"<span class="selectable-text">{}</span>"#, text))
}

/// Inbound image message markup
pub fn inbound_image(author: Option<&str>, src: &str) -> String {
    inbound(author, &format!(r#"<div class="image-thumb"><img src="{}"></div>"#, src))
}

/// Inbound voice note markup (neither text nor image)
pub fn inbound_voice(author: Option<&str>) -> String {
    inbound(author, r#"<div class="audio-player"><audio src="blob:voice"></audio></div>"#)
}

fn inbound(author: Option<&str>, body: &str) -> String {
    let label = author
        .map(|a| {
            format!(r#"<div class="message-author"><span class="text-clickable">{}</span></div>"#, a)
        })
        .unwrap_or_default();
    format!(r#"<div class="message message-in">{}{}</div>"#, label, body)
}

/// Full page markup with one conversation open
pub fn open_conversation_page(title: &str, messages: &[String]) -> String {
    format!(
        r#"<html><body><div class="main"><header><h2 class="chat-title">{}</h2></header><div class="message-list">{}</div></div></body></html>"#,
        title,
        messages.concat()
    )
}

/// Config with millisecond polling and no scroll pauses
pub fn fast_config() -> ScraperConfig {
    ScraperConfig {
        url: "https://chat.example.test/".to_string(),
        timeouts: TimeoutConfig {
            login_secs: 5,
            element_secs: 1,
            page_load_secs: 1,
            poll_interval_ms: 1,
        },
        scroll: ScrollConfig {
            strategy: ScrollStrategy::UntilStable,
            max_iterations: 50,
            stable_rounds: 2,
            pause_ms: 0,
        },
        ..ScraperConfig::default()
    }
}

/// Builder for a conversation served by [`FakeBrowser`]
pub struct ChatBuilder {
    name: String,
    messages: Vec<String>,
    visible: Option<usize>,
    batch: usize,
    has_title: bool,
}

impl ChatBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            messages: Vec::new(),
            visible: None,
            batch: 1,
            has_title: true,
        }
    }

    /// Append a message (oldest first)
    pub fn message(mut self, html: String) -> Self {
        self.messages.push(html);
        self
    }

    /// Only the newest `visible` messages render until the user pages back,
    /// and each PageUp reveals `batch` more
    pub fn lazy(mut self, visible: usize, batch: usize) -> Self {
        self.visible = Some(visible);
        self.batch = batch;
        self
    }

    /// The conversation's title element never renders
    pub fn without_title(mut self) -> Self {
        self.has_title = false;
        self
    }

    fn build(self) -> FakeChat {
        let visible = self.visible.unwrap_or(self.messages.len()).min(self.messages.len());
        FakeChat {
            name: self.name,
            messages: self.messages,
            visible,
            batch: self.batch,
            has_title: self.has_title,
            activity: 0,
        }
    }
}

struct FakeChat {
    name: String,
    messages: Vec<String>,
    visible: usize,
    batch: usize,
    has_title: bool,
    /// Bumped on new activity; shows up in the list entry's preview
    activity: usize,
}

/// Scripted stand-in for a browser session running the chat client.
///
/// Renders its state to HTML and answers CSS lookups against that markup, so
/// the scraper sees the same document structure as in a real client.
pub struct FakeBrowser {
    chats: Vec<FakeChat>,
    /// Chat indices in list order
    order: Vec<usize>,
    open: Option<usize>,
    selectors: SelectorConfig,
    /// Lookups remaining before the list renders (simulates login)
    login_lookups: usize,
    /// Chats that receive a new message whenever another chat is opened
    active_chats: Vec<String>,
    /// Render list entry names as `<span class="name">` without a `title`
    untitled_entries: bool,
    script_result: Value,
    pub navigations: Vec<String>,
    pub opened: Vec<String>,
    pub key_presses: usize,
    pub focus_count: usize,
    pub script_calls: usize,
}

impl FakeBrowser {
    pub fn new(chats: Vec<ChatBuilder>) -> Self {
        let chats: Vec<FakeChat> = chats.into_iter().map(ChatBuilder::build).collect();
        let order = (0..chats.len()).collect();
        Self {
            chats,
            order,
            open: None,
            selectors: SelectorConfig::default(),
            login_lookups: 0,
            active_chats: Vec::new(),
            untitled_entries: false,
            script_result: Value::Bool(true),
            navigations: Vec::new(),
            opened: Vec::new(),
            key_presses: 0,
            focus_count: 0,
            script_calls: 0,
        }
    }

    /// The list stays hidden for the first `lookups` element lookups
    pub fn login_after(mut self, lookups: usize) -> Self {
        self.login_lookups = lookups;
        self
    }

    /// Every time another conversation is opened, `name` gets new activity:
    /// its preview changes and it jumps to the top of the list
    pub fn new_activity_in(mut self, name: &str) -> Self {
        self.active_chats.push(name.to_string());
        self
    }

    /// List entries carry their name as plain text instead of a `title`
    pub fn untitled_entries(mut self) -> Self {
        self.untitled_entries = true;
        self
    }

    pub fn script_result(mut self, value: Value) -> Self {
        self.script_result = value;
        self
    }

    /// How many messages of the named chat are currently rendered
    pub fn visible_messages(&self, name: &str) -> usize {
        self.chats.iter().find(|c| c.name == name).map(|c| c.visible).unwrap_or(0)
    }

    fn render(&self) -> String {
        let mut html = String::from("<html><body>");

        if self.login_lookups == 0 {
            html.push_str(r#"<div class="pane-two"><div class="pane-body pane-list-body">"#);
            for &i in &self.order {
                let chat = &self.chats[i];
                let label = if self.untitled_entries {
                    format!(r#"<span class="name">{}</span>"#, chat.name)
                } else {
                    format!(r#"<span title="{}">{}</span>"#, chat.name, chat.name)
                };
                html.push_str(&format!(
                    r#"<div class="infinite-list-item">{}<div class="preview">last msg {}</div><span class="time">12:00</span></div>"#,
                    label, chat.activity
                ));
            }
            html.push_str("</div></div>");
        } else {
            html.push_str(r#"<div class="landing-wrapper"><canvas aria-label="Scan me!"></canvas></div>"#);
        }

        if let Some(i) = self.open {
            let chat = &self.chats[i];
            html.push_str(r#"<div class="main">"#);
            if chat.has_title {
                html.push_str(&format!(r#"<header><h2 class="chat-title">{}</h2></header>"#, chat.name));
            }
            let first = chat.messages.len() - chat.visible;
            html.push_str(r#"<div class="message-list">"#);
            html.push_str(&chat.messages[first..].concat());
            html.push_str("</div></div>");
        }

        html.push_str("</body></html>");
        html
    }

    fn lookup(&mut self, selector: &str) -> Vec<WebElement> {
        self.login_lookups = self.login_lookups.saturating_sub(1);

        let document = Html::parse_document(&self.render());
        let parsed = Selector::parse(selector).expect("test selector should parse");
        document
            .select(&parsed)
            .enumerate()
            .map(|(i, _)| WebElement(format!("{}|{}", selector, i)))
            .collect()
    }
}

impl BrowserControl for FakeBrowser {
    fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        Ok(())
    }

    fn click(&mut self, element: &WebElement) -> Result<()> {
        let (selector, index) = element.id().rsplit_once('|').expect("fake element id");
        if selector == self.selectors.list_entry {
            let position: usize = index.parse().expect("fake element index");
            let chat = self.order[position];
            self.open = Some(chat);
            self.opened.push(self.chats[chat].name.clone());
            for name in &self.active_chats {
                let Some(position) = self.order.iter().position(|&i| &self.chats[i].name == name)
                else {
                    continue;
                };
                let moved = self.order[position];
                if moved != chat {
                    self.chats[moved].activity += 1;
                    self.order.remove(position);
                    self.order.insert(0, moved);
                }
            }
        }
        Ok(())
    }

    fn send_key(&mut self, key: Key) -> Result<()> {
        self.key_presses += 1;
        if key == Key::PageUp
            && let Some(i) = self.open
        {
            let chat = &mut self.chats[i];
            chat.visible = (chat.visible + chat.batch).min(chat.messages.len());
        }
        Ok(())
    }

    fn focus(&mut self, _element: &WebElement) -> Result<()> {
        self.focus_count += 1;
        Ok(())
    }

    fn find_element(&mut self, selector: &str) -> Result<Option<WebElement>> {
        Ok(self.lookup(selector).into_iter().next())
    }

    fn find_all(&mut self, selector: &str) -> Result<Vec<WebElement>> {
        Ok(self.lookup(selector))
    }

    fn page_source(&mut self) -> Result<String> {
        Ok(self.render())
    }

    fn evaluate_script(&mut self, _script: &str) -> Result<Value> {
        self.script_calls += 1;
        Ok(self.script_result.clone())
    }
}
