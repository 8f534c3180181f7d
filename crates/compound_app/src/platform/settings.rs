use std::fs;
use std::path::{Path, PathBuf};

use compound_engine::CrawlerConfig;
use crawl_logging::{crawl_info, crawl_warn};

pub const CONFIG_FILENAME: &str = "crawler.ron";
/// Overrides the location of [`CONFIG_FILENAME`].
pub const CONFIG_ENV: &str = "COMPOUND_CRAWLER_CONFIG";

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the crawler config, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(path: &Path) -> CrawlerConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return CrawlerConfig::default();
        }
        Err(err) => {
            crawl_warn!("Failed to read config from {:?}: {}", path, err);
            return CrawlerConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            crawl_info!("Loaded crawler config from {:?}", path);
            config
        }
        Err(err) => {
            crawl_warn!("Failed to parse config from {:?}: {}", path, err);
            CrawlerConfig::default()
        }
    }
}
