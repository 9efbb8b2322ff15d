//! Hands fetched media to the user as a saved file.
//!
//! The bytes are registered as a transient blob for the duration of one
//! `deliver` call and released on every exit path.

pub mod savers;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::domain::AppError;

pub use savers::{DialogSaver, DirectorySaver};

/// Host capability that materializes bytes as a file.
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Saves `bytes` under a name derived from `filename`, returning where it landed.
    async fn save(&self, bytes: &[u8], filename: &str) -> std::io::Result<PathBuf>;
}

/// Tracks how many transient blob references are alive.
#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    live: Arc<AtomicUsize>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, bytes: Bytes) -> BlobHandle {
        self.live.fetch_add(1, Ordering::SeqCst);
        BlobHandle {
            bytes,
            live: Arc::clone(&self.live),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// A revocable reference to blob bytes. Released on drop.
#[derive(Debug)]
pub struct BlobHandle {
    bytes: Bytes,
    live: Arc<AtomicUsize>,
}

impl BlobHandle {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for BlobHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct Delivery {
    saver: Arc<dyn FileSaver>,
    blobs: BlobStore,
}

impl Delivery {
    pub fn new(saver: Arc<dyn FileSaver>) -> Self {
        Self {
            saver,
            blobs: BlobStore::new(),
        }
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub async fn deliver(&self, bytes: Bytes, filename: &str) -> Result<PathBuf, AppError> {
        let handle = self.blobs.register(bytes);
        debug!(size = handle.bytes().len(), %filename, "delivering media");

        let outcome = self.saver.save(handle.bytes(), filename).await;
        drop(handle);

        match outcome {
            Ok(path) => {
                info!(path = %path.display(), "media saved");
                Ok(path)
            }
            Err(e) => {
                warn!(error = %e, %filename, "media could not be saved");
                Err(AppError::DeliveryFailed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
