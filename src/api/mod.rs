pub mod client;
pub mod models;
pub mod transfer;

pub use client::{ApiClient, Result};
pub use models::ApiConfig;
pub use transfer::filename_from_content_disposition;
