use crate::storage::{KeyValueStore, THEME_KEY};
use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub root_class: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            root_class: "chat-app dark-mode",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            root_class: "chat-app",
        },
    }
}

/// Picks the starting theme: stored value first, then the OS hint.
///
/// Only a stored `"dark"` selects dark. Any other stored value wins as light
/// without looking at the hint.
pub fn resolve_theme(stored: Option<&str>, prefers_dark: bool) -> ThemeMode {
    match stored {
        Some(value) => ThemeMode::from_dark(value == ThemeMode::Dark.as_str()),
        None => ThemeMode::from_dark(prefers_dark),
    }
}

/// Owns the `theme` key. The mode it returns is what the toggle must show.
pub struct ThemeController {
    store: Box<dyn KeyValueStore>,
}

impl ThemeController {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Resolves the initial theme and applies it, writing it back to storage.
    pub fn init(&self, prefers_dark: bool) -> ThemeMode {
        let stored = self.store.get(THEME_KEY);
        let mode = resolve_theme(stored.as_deref(), prefers_dark);
        tracing::info!(theme = %mode, stored = stored.is_some(), "theme resolved");
        self.set_theme(mode.is_dark())
    }

    pub fn set_theme(&self, is_dark: bool) -> ThemeMode {
        let mode = ThemeMode::from_dark(is_dark);
        if let Err(err) = self.store.set(THEME_KEY, mode.as_str()) {
            tracing::warn!("failed to persist theme: {err}");
        }
        mode
    }
}

#[cfg(target_arch = "wasm32")]
pub fn prefers_dark_scheme() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Desktop builds have no media query to ask; `CHAT_WIDGET_PREFERS_DARK` stands in.
#[cfg(not(target_arch = "wasm32"))]
pub fn prefers_dark_scheme() -> bool {
    std::env::var("CHAT_WIDGET_PREFERS_DARK")
        .map(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #121212;
    --color-bg-secondary: #1e1e1e;
    --color-text-primary: #f1f1f1;
    --color-text-muted: #a0a0a0;
    --color-border: #333333;
    --color-input-bg: #1e1e1e;
    --color-input-border: #3a3a3a;
    --color-chat-user-bg: #3a7bd5;
    --color-chat-user-text: #ffffff;
    --color-chat-bot-bg: #2a2a2a;
    --color-chat-bot-text: #f1f1f1;
    --color-accent: #3a7bd5;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.chat-box { background: var(--color-bg-secondary); border-color: var(--color-border); }
.input-area input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #f4f7f6;
    --color-bg-secondary: #ffffff;
    --color-text-primary: #1a1a1a;
    --color-text-muted: #5f5f5f;
    --color-border: #dddddd;
    --color-input-bg: #ffffff;
    --color-input-border: #cccccc;
    --color-chat-user-bg: #007bff;
    --color-chat-user-text: #ffffff;
    --color-chat-bot-bg: #e9e9eb;
    --color-chat-bot-text: #1a1a1a;
    --color-accent: #007bff;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.chat-box { background: var(--color-bg-secondary); border-color: var(--color-border); }
.input-area input { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-input-border); }
"#;
