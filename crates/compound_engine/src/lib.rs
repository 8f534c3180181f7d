//! Compound engine: browser-driven traversal, asset resolution and downloads.
mod chromium;
mod config;
mod controller;
mod fetch;
mod fullscreen;
mod navigate;
mod orchestrator;
mod persist;
mod probe;
mod resolver;
mod store;
mod types;
mod wait;
mod walker;

pub use chromium::{BrowserSession, ChromiumController};
pub use config::{BrowserSettings, CrawlerConfig, FetchSettings, Pacing, Selectors, Timeouts};
pub use controller::{ControllerError, ElementState, PageController};
pub use fetch::{Fetcher, ReqwestFetcher};
pub use fullscreen::FullscreenToggle;
pub use navigate::{advance, safe_click, settle_page};
pub use orchestrator::DownloadOrchestrator;
pub use persist::{ImageDir, PersistError};
pub use probe::{probe_compound, rewind_to_first, RewindReport};
pub use resolver::{image_url, info_url, AssetResolver};
pub use store::ImageStore;
pub use types::{
    AssetError, CrawlError, DownloadReport, FailureKind, FetchError, FetchMetadata, FetchOutput,
    PassEnd, RecordOutcome, SkipReason, SkippedAsset, WalkEnd, WalkReport,
};
pub use wait::{
    poll_until, wait_for_clickable, wait_for_location_change, wait_for_location_containing,
    wait_for_present,
};
pub use walker::RecordWalker;
