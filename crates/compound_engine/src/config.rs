use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Everything a crawl run needs to know about the target viewer.
///
/// All fields default to the values for the NCCU CONTENTdm instance, so a
/// partial config file only needs to name what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub host: String,
    pub default_collection: String,
    pub search_url: String,
    pub download_dir: PathBuf,
    pub max_records: usize,
    /// Safety cap for the backward walk; a viewer that never disables its
    /// previous control would otherwise rewind forever.
    pub max_rewind_steps: usize,
    pub selectors: Selectors,
    pub timeouts: Timeouts,
    pub pacing: Pacing,
    pub browser: BrowserSettings,
    pub fetch: FetchSettings,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        let host = "https://contentdm.lib.nccu.edu.tw".to_string();
        Self {
            search_url: format!("{host}/digital/collection/lclma/search"),
            host,
            default_collection: compound_core::DEFAULT_COLLECTION.to_string(),
            download_dir: PathBuf::from("downloaded_images"),
            max_records: 100,
            max_rewind_steps: 1000,
            selectors: Selectors::default(),
            timeouts: Timeouts::default(),
            pacing: Pacing::default(),
            browser: BrowserSettings::default(),
            fetch: FetchSettings::default(),
        }
    }
}

impl CrawlerConfig {
    /// Location fragment every record page of the default collection contains.
    pub fn record_path_fragment(&self) -> String {
        format!("/digital/collection/{}/id/", self.default_collection)
    }
}

/// CSS selectors for the viewer controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub expand: String,
    pub toggle_full_page: String,
    pub close: String,
    pub next_image: String,
    pub previous_image: String,
    pub next_record: String,
    pub search_result: String,
    pub body: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            expand: "button.ItemImage-expandButton".to_string(),
            toggle_full_page: "button[id*='toggle-full-page']".to_string(),
            close: "button[title='關閉'][aria-label='關閉']".to_string(),
            next_image: "button.cdm-btn.btn.btn-default span.fa-chevron-right".to_string(),
            previous_image: "button.cdm-btn.btn.btn-default span.fa-chevron-left".to_string(),
            next_record: "button.ItemViewPager-angle[aria-label='Next record']".to_string(),
            search_result:
                "a.SearchResult-container[href*='/digital/collection/lclma/id/']".to_string(),
            body: "body".to_string(),
        }
    }
}

/// Bounds for every wait, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub control_ms: u64,
    pub location_change_ms: u64,
    pub fullscreen_step_ms: u64,
    pub fullscreen_marker_ms: u64,
    pub exit_strategy_ms: u64,
    pub next_record_lookup_ms: u64,
    pub next_record_change_ms: u64,
    pub record_load_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            control_ms: 5_000,
            location_change_ms: 5_000,
            fullscreen_step_ms: 10_000,
            fullscreen_marker_ms: 5_000,
            exit_strategy_ms: 10_000,
            next_record_lookup_ms: 30_000,
            next_record_change_ms: 10_000,
            record_load_ms: 15_000,
            poll_interval_ms: 250,
        }
    }
}

impl Timeouts {
    pub fn control(&self) -> Duration {
        Duration::from_millis(self.control_ms)
    }

    pub fn location_change(&self) -> Duration {
        Duration::from_millis(self.location_change_ms)
    }

    pub fn fullscreen_step(&self) -> Duration {
        Duration::from_millis(self.fullscreen_step_ms)
    }

    pub fn fullscreen_marker(&self) -> Duration {
        Duration::from_millis(self.fullscreen_marker_ms)
    }

    pub fn exit_strategy(&self) -> Duration {
        Duration::from_millis(self.exit_strategy_ms)
    }

    pub fn next_record_lookup(&self) -> Duration {
        Duration::from_millis(self.next_record_lookup_ms)
    }

    pub fn next_record_change(&self) -> Duration {
        Duration::from_millis(self.next_record_change_ms)
    }

    pub fn record_load(&self) -> Duration {
        Duration::from_millis(self.record_load_ms)
    }

    /// Never zero, so polls always yield.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Pauses that let the viewer settle after interactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub after_click_ms: u64,
    pub after_record_ms: u64,
    pub after_scroll_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_click_ms: 2_000,
            after_record_ms: 5_000,
            after_scroll_ms: 1_000,
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub fn immediate() -> Self {
        Self {
            after_click_ms: 0,
            after_record_ms: 0,
            after_scroll_ms: 0,
        }
    }

    pub fn after_click(&self) -> Duration {
        Duration::from_millis(self.after_click_ms)
    }

    pub fn after_record(&self) -> Duration {
        Duration::from_millis(self.after_record_ms)
    }

    pub fn after_scroll(&self) -> Duration {
        Duration::from_millis(self.after_scroll_ms)
    }
}

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP limits for metadata and image requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            redirect_limit: 5,
            max_bytes: 50 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
