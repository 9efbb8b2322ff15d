use std::path::PathBuf;

use tracing::debug;

use super::Session;
use crate::{
    api::ApiClient,
    delivery::Delivery,
    domain::{AppError, ResolutionResult, SourceRequest},
};

/// Runs the network stages on behalf of a `Session`.
///
/// `resolve` and `download` carry no session state, so a UI can run them as
/// background tasks and feed the results back through the session's settle
/// transitions. `submit` and `start_download` do the whole round trip.
#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
    delivery: Delivery,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient, delivery: Delivery) -> Self {
        Self {
            api_client,
            delivery,
        }
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub async fn resolve(&self, request: SourceRequest) -> Result<ResolutionResult, AppError> {
        self.api_client.resolve(request.page_url()).await
    }

    /// Transfer then delivery. Delivery only starts once the body is fully read.
    pub async fn download(&self, media_url: String) -> Result<PathBuf, AppError> {
        let transfer = self.api_client.fetch_media(&media_url).await?;
        debug!(
            bytes = transfer.bytes.len(),
            filename = %transfer.suggested_filename,
            "handing transfer to delivery"
        );
        self.delivery
            .deliver(transfer.bytes, &transfer.suggested_filename)
            .await
    }

    pub async fn submit(&self, session: &mut Session, input: &str) {
        if let Some(request) = session.submit(input) {
            let outcome = self.resolve(request).await;
            session.resolution_settled(outcome);
        }
    }

    pub async fn start_download(&self, session: &mut Session) {
        if let Some(media_url) = session.start_download() {
            let outcome = self.download(media_url).await;
            session.download_settled(outcome);
        }
    }

    pub async fn retry_download(&self, session: &mut Session) {
        if let Some(media_url) = session.retry_download() {
            let outcome = self.download(media_url).await;
            session.download_settled(outcome);
        }
    }
}
