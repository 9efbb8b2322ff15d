use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::domain::{AppError, DownloadPhase, ResolutionResult, SessionState, SourceRequest};

/// Owns the `SessionState` and is its only writer.
///
/// Each user action has a start transition that returns the work to run
/// (or `None` when the action is not allowed) and a settle transition that
/// takes the outcome of that work.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    // Media URL of the last failed download, kept out of `state` while in `Error`
    retry_media_url: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// `Idle | Resolved | Complete | Error -> Resolving`
    ///
    /// Ignored while a request is in flight. Blank input lands in `Error` without a request.
    pub fn submit(&mut self, input: &str) -> Option<SourceRequest> {
        if self.state.is_busy() {
            debug!(phase = ?self.state.phase, "submit ignored while busy");
            return None;
        }

        self.state = SessionState::default();
        self.retry_media_url = None;

        match SourceRequest::new(input) {
            Ok(request) => {
                info!(page_url = %request.page_url(), "resolving");
                self.state.phase = DownloadPhase::Resolving;
                Some(request)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        }
    }

    pub fn resolution_settled(&mut self, outcome: Result<ResolutionResult, AppError>) {
        if self.state.phase != DownloadPhase::Resolving {
            warn!(phase = ?self.state.phase, "stray resolution outcome dropped");
            return;
        }

        match outcome {
            Ok(result) => {
                self.state.phase = DownloadPhase::Resolved;
                self.state.media_url = Some(result.media_url);
            }
            Err(err) => self.fail(err),
        }
    }

    /// `Resolved -> Downloading`. Returns the media URL to fetch.
    pub fn start_download(&mut self) -> Option<String> {
        if self.state.phase != DownloadPhase::Resolved {
            debug!(phase = ?self.state.phase, "download not available");
            return None;
        }
        let media_url = self.state.media_url.clone().filter(|url| !url.is_empty())?;

        self.state.phase = DownloadPhase::Downloading;
        self.state.progress_percent = 0;
        Some(media_url)
    }

    pub fn download_settled(&mut self, outcome: Result<PathBuf, AppError>) {
        if self.state.phase != DownloadPhase::Downloading {
            warn!(phase = ?self.state.phase, "stray download outcome dropped");
            return;
        }

        match outcome {
            Ok(path) => {
                info!(path = %path.display(), "download complete");
                self.state.phase = DownloadPhase::Complete;
                self.state.progress_percent = 100;
                self.state.saved_path = Some(path);
            }
            Err(err) => {
                let media_url = self.state.media_url.take();
                self.fail(err);
                self.retry_media_url = media_url;
            }
        }
    }

    pub fn can_retry_download(&self) -> bool {
        self.state.phase == DownloadPhase::Error && self.retry_media_url.is_some()
    }

    /// `Error -> Downloading`, only after a failed download. Reuses the resolved URL.
    pub fn retry_download(&mut self) -> Option<String> {
        if !self.can_retry_download() {
            debug!(phase = ?self.state.phase, "nothing to retry");
            return None;
        }
        let media_url = self.retry_media_url.take()?;

        info!(%media_url, "retrying download");
        self.state.phase = DownloadPhase::Downloading;
        self.state.error = None;
        self.state.media_url = Some(media_url.clone());
        self.state.progress_percent = 0;
        Some(media_url)
    }

    fn fail(&mut self, err: AppError) {
        warn!(error = %err, phase = ?self.state.phase, "session failed");
        self.state.phase = DownloadPhase::Error;
        self.state.error = Some(err);
        self.state.media_url = None;
        self.state.progress_percent = 0;
        self.state.saved_path = None;
        self.retry_media_url = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(media_url: &str) -> Session {
        let mut session = Session::new();
        session.submit("https://facebook.com/watch/?v=123").unwrap();
        session.resolution_settled(Ok(ResolutionResult {
            media_url: media_url.to_string(),
        }));
        session
    }

    #[test]
    fn test_blank_submit_goes_to_error() {
        let mut session = Session::new();
        assert_eq!(session.submit("   "), None);
        assert_eq!(session.state().phase, DownloadPhase::Error);
        assert_eq!(session.state().error, Some(AppError::EmptyInput));
        assert_eq!(session.state().media_url, None);
    }

    #[test]
    fn test_resolution_success_and_failure() {
        let session = resolved("https://x/y.mp4");
        assert_eq!(session.state().phase, DownloadPhase::Resolved);
        assert_eq!(session.state().media_url.as_deref(), Some("https://x/y.mp4"));
        assert_eq!(session.state().error, None);

        let mut session = Session::new();
        session.submit("https://fb/v").unwrap();
        session.resolution_settled(Err(AppError::ResolutionFailed));
        assert_eq!(session.state().phase, DownloadPhase::Error);
        assert_eq!(
            session.state().error_message().as_deref(),
            Some("Failed to get video URL")
        );
    }

    #[test]
    fn test_submit_ignored_while_busy() {
        let mut session = Session::new();
        session.submit("https://fb/a").unwrap();
        let before = session.state().clone();

        assert_eq!(session.submit("https://fb/b"), None);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let mut session = Session::new();
        assert_eq!(session.submit(""), None);
        assert!(session.state().error.is_some());

        session.submit("https://fb/a").unwrap();
        assert_eq!(session.state().phase, DownloadPhase::Resolving);
        assert_eq!(session.state().error, None);

        let mut session = resolved("https://cdn/1.mp4");
        session.submit("https://fb/b").unwrap();
        assert_eq!(session.state().media_url, None);
        assert_eq!(session.state().phase, DownloadPhase::Resolving);
    }

    #[test]
    fn test_start_download_only_from_resolved() {
        let mut session = Session::new();
        assert_eq!(session.start_download(), None);
        assert_eq!(session.state(), &SessionState::default());

        session.submit("https://fb/a").unwrap();
        let before = session.state().clone();
        assert_eq!(session.start_download(), None);
        assert_eq!(session.state(), &before);

        session.resolution_settled(Err(AppError::Timeout));
        let before = session.state().clone();
        assert_eq!(session.start_download(), None);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_start_download_without_media_url_is_noop() {
        let mut session = resolved("");
        let before = session.state().clone();
        assert_eq!(session.start_download(), None);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_download_progress_lifecycle() {
        let mut session = resolved("https://cdn/1.mp4");
        assert_eq!(session.start_download().as_deref(), Some("https://cdn/1.mp4"));
        assert_eq!(session.state().phase, DownloadPhase::Downloading);
        assert_eq!(session.state().progress_percent, 0);

        session.download_settled(Ok(PathBuf::from("/tmp/clip.mp4")));
        assert_eq!(session.state().phase, DownloadPhase::Complete);
        assert_eq!(session.state().progress_percent, 100);
        assert_eq!(
            session.state().saved_path.as_deref(),
            Some(std::path::Path::new("/tmp/clip.mp4"))
        );

        let mut session = resolved("https://cdn/1.mp4");
        session.start_download().unwrap();
        session.download_settled(Err(AppError::TransferFailed { status: 404 }));
        assert_eq!(session.state().phase, DownloadPhase::Error);
        assert_eq!(session.state().progress_percent, 0);
        assert_eq!(session.state().media_url, None);
    }

    #[test]
    fn test_stray_outcomes_are_ignored() {
        let mut session = resolved("https://cdn/1.mp4");
        let before = session.state().clone();

        session.resolution_settled(Err(AppError::Timeout));
        session.download_settled(Ok(PathBuf::from("/tmp/x")));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_retry_after_failed_download() {
        let mut session = resolved("https://cdn/1.mp4");
        session.start_download().unwrap();
        session.download_settled(Err(AppError::DeliveryFailed {
            reason: "cancelled".to_string(),
        }));
        assert_eq!(session.state().media_url, None);
        assert!(session.can_retry_download());

        assert_eq!(session.retry_download().as_deref(), Some("https://cdn/1.mp4"));
        assert_eq!(session.state().phase, DownloadPhase::Downloading);
        assert_eq!(session.state().error, None);
        assert_eq!(session.state().progress_percent, 0);
        assert!(!session.can_retry_download());

        session.download_settled(Ok(PathBuf::from("/tmp/clip.mp4")));
        assert_eq!(session.state().phase, DownloadPhase::Complete);
        assert_eq!(session.state().progress_percent, 100);
    }

    #[test]
    fn test_retry_unavailable_after_resolution_error() {
        let mut session = Session::new();
        session.submit("https://fb/a").unwrap();
        session.resolution_settled(Err(AppError::Timeout));
        let before = session.state().clone();

        assert!(!session.can_retry_download());
        assert_eq!(session.retry_download(), None);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_resubmit_drops_retry() {
        let mut session = resolved("https://cdn/1.mp4");
        session.start_download().unwrap();
        session.download_settled(Err(AppError::TransferFailed { status: 500 }));

        assert_eq!(session.submit("  "), None);
        assert!(!session.can_retry_download());
        assert_eq!(session.retry_download(), None);
    }
}
