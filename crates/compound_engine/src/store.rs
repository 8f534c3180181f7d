use std::path::PathBuf;
use std::sync::Arc;

use compound_core::DownloadTask;
use crawl_logging::crawl_info;

use crate::{AssetError, Fetcher, ImageDir};

/// Downloads images and stores them under their deterministic names.
pub struct ImageStore {
    fetcher: Arc<dyn Fetcher>,
    images: ImageDir,
}

impl ImageStore {
    pub fn new(images: ImageDir, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher, images }
    }

    pub async fn save(&self, task: &DownloadTask, image_url: &str) -> Result<PathBuf, AssetError> {
        crawl_info!("Downloading {} to {}", image_url, task.file_name());
        let output = self.fetcher.fetch(image_url).await?;
        let path = self.images.store(task, &output.bytes)?;
        crawl_info!(
            "Saved {:?} ({} bytes)",
            path,
            output.metadata.byte_len
        );
        Ok(path)
    }
}
