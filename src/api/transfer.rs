use std::sync::LazyLock;

use bytes::BytesMut;
use futures::StreamExt;
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use tracing::{debug, info, warn};
use url::Url;

use super::client::{ApiClient, Result};
use crate::domain::{AppError, TransferResult, DEFAULT_FILENAME};

const DOWNLOAD_PATH: &str = "/api/download";

// Avoid reserving absurd capacity on a bogus Content-Length
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

static FILENAME_PARAM: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename[^;=\n]*=(?:"([^"]*)"|'([^']*)'|([^;\n]*))"#).ok()
});

impl ApiClient {
    /// Fetches the media bytes through the download endpoint.
    ///
    /// The whole body is buffered in memory before returning.
    pub async fn fetch_media(&self, media_url: &str) -> Result<TransferResult> {
        let endpoint = self.download_endpoint(media_url)?;
        debug!(%endpoint, "requesting media");

        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|e| AppError::unknown(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "media transfer rejected");
            return Err(AppError::TransferFailed {
                status: status.as_u16(),
            });
        }

        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let capacity = response.content_length().unwrap_or(0).min(MAX_PREALLOCATION) as usize;
        let mut buffer = BytesMut::with_capacity(capacity);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::unknown(format!("Download interrupted: {}", e)))?;
            buffer.extend_from_slice(&chunk);
        }

        info!(
            bytes = buffer.len(),
            filename = %suggested_filename,
            "media transfer complete"
        );

        Ok(TransferResult {
            bytes: buffer.freeze(),
            suggested_filename,
        })
    }

    fn download_endpoint(&self, media_url: &str) -> Result<Url> {
        let mut endpoint = Url::parse(&self.config.endpoint(DOWNLOAD_PATH))
            .map_err(|e| AppError::unknown(format!("Invalid API base URL: {}", e)))?;
        endpoint
            .query_pairs_mut()
            .append_pair("video_url", media_url);
        Ok(endpoint)
    }
}

/// Pulls the `filename` parameter out of a Content-Disposition value.
///
/// Accepts quoted (`"..."` or `'...'`) and bare values. Returns `None` when the
/// parameter is missing or empty.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let re = FILENAME_PARAM.as_ref()?;
    let caps = re.captures(header)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();

    let filename = raw.replace(['"', '\''], "");
    let filename = filename.trim();
    if filename.is_empty() {
        None
    } else {
        Some(filename.to_string())
    }
}
