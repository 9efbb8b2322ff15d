use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::FileSaver;
use crate::domain::DEFAULT_FILENAME;
use crate::utils::sanitize_filename;

fn local_filename(filename: &str) -> String {
    let sanitized = sanitize_filename(filename);
    let sanitized = sanitized.trim_matches(|c| c == '.' || c == ' ');
    if sanitized.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized.to_string()
    }
}

/// Writes every file into one fixed directory.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, bytes: &[u8], filename: &str) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(local_filename(filename));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

/// Asks the user where to save through the native save dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogSaver;

#[async_trait]
impl FileSaver for DialogSaver {
    async fn save(&self, bytes: &[u8], filename: &str) -> io::Result<PathBuf> {
        let path = rfd::AsyncFileDialog::new()
            .set_file_name(local_filename(filename))
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
            .ok_or_else(|| io::Error::new(io::ErrorKind::Interrupted, "save dialog cancelled"))?;

        debug!(path = %path.display(), "save location selected");
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}
