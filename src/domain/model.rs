use std::path::PathBuf;

use bytes::Bytes;

use super::AppError;

/// Name used when the transfer response does not suggest one.
pub const DEFAULT_FILENAME: &str = "video.mp4";

/// A page URL accepted for resolution. Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    page_url: String,
}

impl SourceRequest {
    pub fn new(input: &str) -> Result<Self, AppError> {
        let page_url = input.trim();
        if page_url.is_empty() {
            return Err(AppError::EmptyInput);
        }

        Ok(Self {
            page_url: page_url.to_string(),
        })
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }
}

/// Direct, usually time-limited media URL produced by the resolution service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    pub media_url: String,
}

/// Fully buffered media payload plus the name to save it under.
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub bytes: Bytes,
    pub suggested_filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    Resolving,
    Resolved,
    Downloading,
    Complete,
    Error,
}

/// The record the UI observes. Only `Session` writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub phase: DownloadPhase,
    pub error: Option<AppError>,
    pub media_url: Option<String>,
    pub progress_percent: u8,
    pub saved_path: Option<PathBuf>,
}

impl SessionState {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            DownloadPhase::Resolving | DownloadPhase::Downloading
        )
    }
}
