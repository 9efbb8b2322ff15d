use iced::{
    widget::{button, column, progress_bar, row, text, text_input, Space},
    Element, Length,
};
use simple_video_downloader::{DownloadPhase, SessionState};

/// Input-side view state. Everything else is read from the session.
#[derive(Default)]
pub struct DownloadView {
    pub page_url: String,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    PageUrlChanged(String),
    ClearPressed,
    SubmitPressed,
    DownloadPressed,
    RetryPressed,
}

impl DownloadView {
    pub fn update(&mut self, message: &DownloadMessage) {
        match message {
            DownloadMessage::PageUrlChanged(url) => {
                self.page_url = url.clone();
            }
            DownloadMessage::ClearPressed => {
                self.page_url.clear();
            }
            // Handled by the app
            DownloadMessage::SubmitPressed
            | DownloadMessage::DownloadPressed
            | DownloadMessage::RetryPressed => {}
        }
    }

    pub fn view<'a>(
        &'a self,
        state: &'a SessionState,
        can_retry: bool,
    ) -> Element<'a, DownloadMessage> {
        let busy = state.is_busy();

        let submit_label = if state.phase == DownloadPhase::Resolving {
            "Processing..."
        } else {
            "Get Download Link"
        };

        let mut content = column![
            text("Video Downloader").size(32),
            text("Paste a video page URL to get a download link").size(14),
            Space::new().height(Length::Fixed(20.0)),
            row![
                text_input("Paste video URL here", &self.page_url)
                    .on_input(DownloadMessage::PageUrlChanged)
                    .on_submit(DownloadMessage::SubmitPressed)
                    .padding(10),
                button("✕")
                    .on_press_maybe((!busy).then_some(DownloadMessage::ClearPressed))
                    .padding(10),
            ]
            .spacing(5),
            button(submit_label)
                .on_press_maybe((!busy).then_some(DownloadMessage::SubmitPressed))
                .padding([10, 20]),
        ]
        .padding(20)
        .spacing(10);

        if let Some(message) = state.error_message() {
            content = content.push(text(message).size(14));
        }

        if can_retry {
            content = content.push(
                button("Retry Download")
                    .on_press(DownloadMessage::RetryPressed)
                    .padding([10, 20]),
            );
        }

        if shows_download_button(state) {
            let downloading = state.phase == DownloadPhase::Downloading;
            let download_label = if downloading {
                "Downloading..."
            } else {
                "Download Video"
            };

            content = content
                .push(text("Video link generated successfully!").size(14))
                .push(
                    button(download_label)
                        .on_press_maybe((!downloading).then_some(DownloadMessage::DownloadPressed))
                        .padding([10, 20]),
                );
        }

        if matches!(
            state.phase,
            DownloadPhase::Resolved | DownloadPhase::Downloading | DownloadPhase::Complete
        ) {
            content = content.push(progress_bar(0.0..=100.0, f32::from(state.progress_percent)));
        }

        if let Some(path) = &state.saved_path {
            content = content.push(text(format!("Saved: {}", path.display())).size(14));
        }

        content.into()
    }
}

/// The download button belongs to a resolved link; a finished download hides it.
fn shows_download_button(state: &SessionState) -> bool {
    matches!(
        state.phase,
        DownloadPhase::Resolved | DownloadPhase::Downloading
    )
}
