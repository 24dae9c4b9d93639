use crate::config::WidgetConfig;
use crate::types::{ChatReply, ChatRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat endpoint error {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ChatResult<T> = Result<T, ChatError>;

/// One request, one reply. Implementations never retry.
#[async_trait(?Send)]
pub trait ChatBackend {
    async fn send(&self, request: &ChatRequest) -> ChatResult<String>;
}

// ============================================
// HTTP backend
// ============================================

/// Error body the reference server sends with a 400.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

const MAX_DETAIL_CHARS: usize = 200;

pub struct HttpChatBackend {
    client: Client,
    url: String,
    timeout: Option<Duration>,
}

impl HttpChatBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: None,
        }
    }

    /// Bounds each request; only honoured on native builds.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &WidgetConfig) -> Self {
        let url = resolve_endpoint(&page_origin(config), &config.endpoint);
        Self::new(url).with_timeout(config.request_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> ChatResult<String> {
        // `.json` sets `Content-Type: application/json`
        #[allow(unused_mut)]
        let mut builder = self.client.post(&self.url).json(request);
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(url = %self.url, user_id = %request.user_id, "sending chat message");
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let reply: ChatReply = serde_json::from_str(&body)?;
        Ok(reply.response)
    }
}

fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error;
    }
    body.chars().take(MAX_DETAIL_CHARS).collect()
}

/// Joins `path` onto `origin` unless `path` is already absolute.
pub fn resolve_endpoint(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(target_arch = "wasm32")]
fn page_origin(config: &WidgetConfig) -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| config.server_origin.clone())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin(config: &WidgetConfig) -> String {
    config.server_origin.clone()
}
