mod app;
mod ui;

use iced::window;
use tracing::info;

fn main() -> iced::Result {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Video downloader starting");

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("Video Downloader")
        .window(window::Settings {
            size: iced::Size::new(480.0, 520.0),
            ..Default::default()
        })
        .run()
}
