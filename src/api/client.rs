use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::models::{ApiConfig, ErrorResponse, GetVideoRequest, GetVideoResponse};
use crate::domain::{AppError, ResolutionResult};

const RESOLVE_PATH: &str = "/api/get-video";
const GENERIC_SERVER_ERROR: &str = "An error occurred";

pub type Result<T> = std::result::Result<T, AppError>;

/// Talks to the resolution service. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) http: Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Turns a shareable page URL into a direct media URL.
    ///
    /// Single attempt, bounded by `ApiConfig::resolve_timeout`.
    pub async fn resolve(&self, page_url: &str) -> Result<ResolutionResult> {
        let page_url = page_url.trim();
        if page_url.is_empty() {
            return Err(AppError::EmptyInput);
        }

        let endpoint = self.config.endpoint(RESOLVE_PATH);
        debug!(%endpoint, %page_url, "requesting media URL");

        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.config.resolve_timeout)
            .json(&GetVideoRequest { url: page_url })
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let err = server_error(response).await;
            warn!(status = status.as_u16(), error = %err, "resolution service returned an error");
            return Err(err);
        }

        let body = response.bytes().await.map_err(classify_request_error)?;
        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::unknown(format!("Invalid response format: {}", e)))?;
        let parsed: GetVideoResponse = serde_json::from_value(value).unwrap_or_default();

        match parsed.video_url {
            Some(media_url) if parsed.success && !media_url.is_empty() => {
                info!(%media_url, "media URL resolved");
                Ok(ResolutionResult { media_url })
            }
            _ => {
                warn!(%page_url, "resolution service could not produce a media URL");
                Err(AppError::ResolutionFailed)
            }
        }
    }
}

/// Maps a transport failure on the resolution call into the user-facing taxonomy.
pub(crate) fn classify_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout
    } else if err.is_connect() {
        AppError::Unreachable
    } else {
        AppError::unknown(err.to_string())
    }
}

async fn server_error(response: Response) -> AppError {
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
            .ok()
            .and_then(|body| body.best_message()),
        Err(_) => None,
    };

    AppError::ServerError {
        message: message.unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string()),
    }
}
