use std::sync::Arc;

use compound_core::{Location, SessionContext};
use compound_engine::{
    AssetResolver, BrowserSession, CrawlError, CrawlerConfig, Fetcher, ImageDir, ImageStore,
    PageController, RecordWalker, ReqwestFetcher, WalkEnd, WalkReport,
};
use crawl_logging::{crawl_info, crawl_warn};

/// What a run should crawl.
#[derive(Debug, Clone)]
pub enum Mode {
    /// Start from the search page and walk the collection.
    Batch,
    /// Process exactly one record.
    Single(Location),
}

/// Runs one crawl. The browser is closed on every exit path, including
/// Ctrl-C and errors.
pub async fn run(config: CrawlerConfig, mode: Mode) -> anyhow::Result<WalkReport> {
    let images = ImageDir::prepare(config.download_dir.clone())?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch.clone())?);
    let resolver = AssetResolver::new(config.host.clone(), fetcher.clone());
    let store = ImageStore::new(images, fetcher);

    let browser = BrowserSession::launch(&config.browser).await?;
    let outcome = tokio::select! {
        result = drive(browser.controller(), &config, &resolver, &store, &mode) => result,
        _ = tokio::signal::ctrl_c() => {
            crawl_warn!("Interrupted by user, closing browser");
            Err(CrawlError::Interrupted)
        }
    };
    browser.close().await;
    Ok(outcome?)
}

async fn drive(
    controller: &dyn PageController,
    config: &CrawlerConfig,
    resolver: &AssetResolver,
    store: &ImageStore,
    mode: &Mode,
) -> Result<WalkReport, CrawlError> {
    let walker = RecordWalker::new(controller, config, resolver, store);
    match mode {
        Mode::Batch => {
            walker.open_first_search_result().await?;
            let mut session = SessionContext::new(config.max_records);
            walker.walk(&mut session).await
        }
        Mode::Single(target) => {
            if !walker.open_record(&target.raw).await?.is_ready() {
                crawl_warn!("Viewer did not finish loading {}", target.raw);
            }
            let raw = controller.current_location().await?;
            let location = match Location::parse_with_default(&raw, &config.default_collection) {
                Ok(location) => location,
                Err(err) => {
                    crawl_warn!("Cannot extract id from {}: {}", raw, err);
                    return Ok(WalkReport {
                        records: Vec::new(),
                        end: WalkEnd::Unreadable,
                    });
                }
            };
            let mut session = SessionContext::new(1);
            let outcome = walker.visit(&location, &mut session).await?;
            Ok(WalkReport {
                records: vec![outcome],
                end: WalkEnd::SingleRecord,
            })
        }
    }
}

/// Logs the end-of-run summary.
pub fn report_summary(report: &WalkReport) {
    crawl_info!(
        "Run complete ({:?}): {} records, {} images saved, {} skipped",
        report.end,
        report.processed(),
        report.saved(),
        report.skipped_assets()
    );
}
