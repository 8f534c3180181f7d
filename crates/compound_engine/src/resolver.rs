use std::sync::Arc;

use compound_core::InfoId;
use crawl_logging::crawl_debug;
use serde_json::Value;

use crate::{AssetError, Fetcher};

/// `<host>/iiif/2/<collection>:<info_id>/info.json`
pub fn info_url(host: &str, collection: &str, info_id: InfoId) -> String {
    format!(
        "{}/iiif/2/{}:{}/info.json",
        host.trim_end_matches('/'),
        collection,
        info_id
    )
}

/// Full-resolution JPEG for an IIIF base id.
pub fn image_url(base_id: &str) -> String {
    format!("{}/full/full/0/default.jpg", base_id.trim_end_matches('/'))
}

/// Turns image-service ids into downloadable image URLs. Every call fetches
/// the info document again.
pub struct AssetResolver {
    host: String,
    fetcher: Arc<dyn Fetcher>,
}

impl AssetResolver {
    pub fn new(host: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            host: host.into(),
            fetcher,
        }
    }

    pub async fn resolve(&self, collection: &str, info_id: InfoId) -> Result<String, AssetError> {
        let url = info_url(&self.host, collection, info_id);
        crawl_debug!("Fetching info document {}", url);
        let output = self.fetcher.fetch(&url).await?;
        let document: Value = serde_json::from_slice(&output.bytes)
            .map_err(|err| AssetError::InvalidDocument(err.to_string()))?;
        let base_id = base_id(&document).ok_or(AssetError::MissingBaseId)?;
        Ok(image_url(base_id))
    }
}

// IIIF Image API 2 uses `@id`; version 3 documents carry `id`.
fn base_id(document: &Value) -> Option<&str> {
    ["@id", "id"]
        .iter()
        .filter_map(|key| document.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
}
