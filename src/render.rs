use crate::types::ChatMessage;
use once_cell::sync::Lazy;
use regex::Regex;

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid emphasis pattern"));

/// How message text reaches the DOM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// Text is HTML-escaped, then `**bold**` becomes `<strong>`.
    #[default]
    Escaped,
    /// Text is inserted as markup, only `**bold**` is rewritten.
    Legacy,
}

impl MarkupMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "escaped" => Some(Self::Escaped),
            "legacy" | "raw" => Some(Self::Legacy),
            _ => None,
        }
    }
}

pub fn render_message_html(text: &str, mode: MarkupMode) -> String {
    match mode {
        MarkupMode::Escaped => apply_emphasis(&escape_html(text)),
        MarkupMode::Legacy => apply_emphasis(text),
    }
}

fn apply_emphasis(text: &str) -> String {
    EMPHASIS.replace_all(text, "<strong>$1</strong>").into_owned()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Ordered chat history. Entries can only be appended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter()
    }
}
