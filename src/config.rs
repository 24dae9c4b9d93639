use crate::render::MarkupMode;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// Bundled config compiled into every build (the only source on the web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

static ACTIVE: OnceCell<WidgetConfig> = OnceCell::new();

pub const DEFAULT_SERVER_ORIGIN: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT: &str = "/chat";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CHAT_WIDGET_TIMEOUT_SECS must be a positive number of seconds, got `{0}`")]
    InvalidTimeout(String),

    #[error("CHAT_WIDGET_MARKUP must be `escaped` or `legacy`, got `{0}`")]
    InvalidMarkup(String),

    #[error("CHAT_WIDGET_LOG is not a log level: `{0}`")]
    InvalidLogLevel(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    /// Base the endpoint is joined to when no page origin is available.
    pub server_origin: String,
    pub endpoint: String,
    pub request_timeout: Option<Duration>,
    pub markup: MarkupMode,
    pub log_level: Level,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            server_origin: DEFAULT_SERVER_ORIGIN.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: None,
            markup: MarkupMode::default(),
            log_level: Level::INFO,
        }
    }
}

impl WidgetConfig {
    /// Environment first, `.env` next (native only), bundled config last.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        let bundled = parse_config_lines(BUNDLED_CONFIG);
        Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| bundled.get(key).cloned())
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let request_timeout = match non_empty("CHAT_WIDGET_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };
        let markup = match non_empty("CHAT_WIDGET_MARKUP") {
            Some(raw) => MarkupMode::parse(&raw).ok_or(ConfigError::InvalidMarkup(raw))?,
            None => defaults.markup,
        };
        let log_level = match non_empty("CHAT_WIDGET_LOG") {
            Some(raw) => Level::from_str(raw.trim()).map_err(|_| ConfigError::InvalidLogLevel(raw))?,
            None => defaults.log_level,
        };

        Ok(Self {
            server_origin: non_empty("CHAT_WIDGET_SERVER").unwrap_or(defaults.server_origin),
            endpoint: non_empty("CHAT_WIDGET_ENDPOINT").unwrap_or(defaults.endpoint),
            request_timeout,
            markup,
            log_level,
        })
    }
}

/// Makes `config` the one the UI picks up at launch.
pub fn install(config: WidgetConfig) {
    if ACTIVE.set(config).is_err() {
        tracing::warn!("widget config already installed, keeping the first one");
    }
}

pub fn active() -> WidgetConfig {
    ACTIVE.get().cloned().unwrap_or_default()
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // Desktop dev: a missing .env just leaves the bundled values in charge
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

/// Parses `KEY=VALUE` lines, skipping comments and blanks.
pub fn parse_config_lines(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = WidgetConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.endpoint, "/chat");
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn reads_every_key() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("CHAT_WIDGET_SERVER", "http://localhost:8080"),
            ("CHAT_WIDGET_ENDPOINT", "/api/chat"),
            ("CHAT_WIDGET_TIMEOUT_SECS", "30"),
            ("CHAT_WIDGET_MARKUP", "legacy"),
            ("CHAT_WIDGET_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.server_origin, "http://localhost:8080");
        assert_eq!(config.endpoint, "/api/chat");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.markup, MarkupMode::Legacy);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            WidgetConfig::from_lookup(lookup_from(&[("CHAT_WIDGET_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            WidgetConfig::from_lookup(lookup_from(&[("CHAT_WIDGET_MARKUP", "html")])),
            Err(ConfigError::InvalidMarkup(_))
        ));
        assert!(matches!(
            WidgetConfig::from_lookup(lookup_from(&[("CHAT_WIDGET_LOG", "loud")])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            WidgetConfig::from_lookup(lookup_from(&[("CHAT_WIDGET_ENDPOINT", "  ")])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn parses_bundled_lines() {
        let values = parse_config_lines("# comment\n\nCHAT_WIDGET_ENDPOINT = /chat\nnot a pair\n");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("CHAT_WIDGET_ENDPOINT").map(String::as_str), Some("/chat"));
    }

    #[test]
    fn bundled_config_is_valid() {
        let bundled = parse_config_lines(BUNDLED_CONFIG);
        assert!(WidgetConfig::from_lookup(|key| bundled.get(key).cloned()).is_ok());
    }
}
