use std::path::PathBuf;
use std::sync::Arc;

use iced::Task;
use simple_video_downloader::{
    domain::ResolutionResult, ApiClient, ApiConfig, AppError, Delivery, DialogSaver,
    DownloadCoordinator, Session,
};
use tracing::info;

use crate::ui::{DownloadMessage, DownloadView};

/// Overrides the resolution service location, e.g. `http://10.0.0.5:8001`
const API_URL_ENV: &str = "VIDEO_DL_API_URL";

pub struct DownloadApp {
    view: DownloadView,
    session: Session,
    coordinator: DownloadCoordinator,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let mut config = ApiConfig::default();
        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        info!(base_url = %config.base_url, "using resolution service");

        let coordinator = DownloadCoordinator::new(
            ApiClient::new(config),
            Delivery::new(Arc::new(DialogSaver)),
        );

        Self {
            view: DownloadView::default(),
            session: Session::new(),
            coordinator,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    ResolutionSettled(Result<ResolutionResult, AppError>),
    DownloadSettled(Result<PathBuf, AppError>),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(&ui_msg);

            match ui_msg {
                DownloadMessage::SubmitPressed => {
                    if let Some(request) = app.session.submit(&app.view.page_url) {
                        let coordinator = app.coordinator.clone();
                        return Task::perform(
                            async move { coordinator.resolve(request).await },
                            Message::ResolutionSettled,
                        );
                    }
                }
                DownloadMessage::DownloadPressed => {
                    if let Some(media_url) = app.session.start_download() {
                        let coordinator = app.coordinator.clone();
                        return Task::perform(
                            async move { coordinator.download(media_url).await },
                            Message::DownloadSettled,
                        );
                    }
                }
                DownloadMessage::RetryPressed => {
                    if let Some(media_url) = app.session.retry_download() {
                        let coordinator = app.coordinator.clone();
                        return Task::perform(
                            async move { coordinator.download(media_url).await },
                            Message::DownloadSettled,
                        );
                    }
                }
                DownloadMessage::PageUrlChanged(_) | DownloadMessage::ClearPressed => {}
            }
        }
        Message::ResolutionSettled(outcome) => app.session.resolution_settled(outcome),
        Message::DownloadSettled(outcome) => app.session.download_settled(outcome),
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view
        .view(app.session.state(), app.session.can_retry_download())
        .map(Message::UiMessage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_video_downloader::DownloadPhase;

    #[test]
    fn test_clear_keeps_resolved_link() {
        let mut app = DownloadApp::new();
        app.view.page_url = "https://facebook.com/watch/?v=123".to_string();
        app.session.submit(&app.view.page_url).unwrap();
        app.session.resolution_settled(Ok(ResolutionResult {
            media_url: "https://cdn/123.mp4".to_string(),
        }));

        let _ = update(&mut app, Message::UiMessage(DownloadMessage::ClearPressed));

        assert!(app.view.page_url.is_empty());
        assert_eq!(app.session.state().phase, DownloadPhase::Resolved);
        assert_eq!(
            app.session.state().media_url.as_deref(),
            Some("https://cdn/123.mp4")
        );
    }
}
