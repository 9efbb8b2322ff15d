//! Resolve a social-media video page into a direct media URL, fetch it and
//! save it as a named file.

pub mod api;
pub mod application;
pub mod delivery;
pub mod domain;
pub mod utils;

pub use api::{ApiClient, ApiConfig};
pub use application::{DownloadCoordinator, Session};
pub use delivery::{Delivery, DialogSaver, DirectorySaver, FileSaver};
pub use domain::{AppError, DownloadPhase, SessionState};
