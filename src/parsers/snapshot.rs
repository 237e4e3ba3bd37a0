use scraper::{ElementRef, Html, Selector};

/// A point-in-time copy of the rendered document, queried offline.
///
/// Text helpers follow query-library `.text()` semantics: the text of every
/// matched element is concatenated, then the result is trimmed.
pub struct Snapshot {
    document: Html,
}

impl Snapshot {
    pub fn parse(markup: &str) -> Self {
        Self { document: Html::parse_document(markup) }
    }

    /// All elements matching `selector`, in document order
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.document.select(selector)
    }

    /// Trimmed text of the first match, or an empty string
    pub fn first_text(&self, selector: &Selector) -> String {
        self.select(selector).next().map(node_text).unwrap_or_default()
    }
}

/// Trimmed text content of a node and all its descendants
pub fn node_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Concatenated text of every descendant matching `selector`, trimmed
pub fn find_text(node: ElementRef<'_>, selector: &Selector) -> String {
    let text: String = node.select(selector).flat_map(|el| el.text()).collect();
    text.trim().to_string()
}

/// Attribute of the first descendant matching `selector`; empty values count as absent
pub fn find_attribute(node: ElementRef<'_>, selector: &Selector, name: &str) -> Option<String> {
    node.select(selector)
        .next()
        .and_then(|el| el.value().attr(name))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
