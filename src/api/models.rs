use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/get-video`
#[derive(Debug, Clone, Serialize)]
pub struct GetVideoRequest<'a> {
    pub url: &'a str,
}

/// Response from `POST /api/get-video`
///
/// Anything that does not decode into this shape counts as `success: false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetVideoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Error body sent with a non-2xx status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ErrorResponse {
    /// `detail` first, then `message`; only string values count.
    pub fn best_message(&self) -> Option<String> {
        [&self.detail, &self.message]
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .find(|s| !s.trim().is_empty())
            .map(str::to_string)
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub resolve_timeout: Duration,
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8001".to_string(),
            resolve_timeout: Duration::from_secs(60),
        }
    }
}
