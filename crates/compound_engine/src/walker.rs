use compound_core::{Location, ProbeEnd, SessionContext, WaitOutcome};
use crawl_logging::{crawl_debug, crawl_info, crawl_warn};
use tokio::time::sleep;

use crate::{
    probe_compound, rewind_to_first, safe_click, settle_page, wait_for_location_change,
    wait_for_location_containing, wait_for_present, AssetResolver, ControllerError, CrawlError,
    CrawlerConfig, DownloadOrchestrator, ImageStore, PageController, RecordOutcome, WalkEnd,
    WalkReport,
};

/// Outer loop over the records of a collection, in viewer order.
pub struct RecordWalker<'a> {
    controller: &'a dyn PageController,
    config: &'a CrawlerConfig,
    downloads: DownloadOrchestrator<'a>,
}

impl<'a> RecordWalker<'a> {
    pub fn new(
        controller: &'a dyn PageController,
        config: &'a CrawlerConfig,
        resolver: &'a AssetResolver,
        store: &'a ImageStore,
    ) -> Self {
        Self {
            controller,
            config,
            downloads: DownloadOrchestrator::new(controller, config, resolver, store),
        }
    }

    /// Opens the search page and follows its first result into the viewer.
    pub async fn open_first_search_result(&self) -> Result<String, CrawlError> {
        let selectors = &self.config.selectors;
        let timeouts = &self.config.timeouts;

        crawl_info!("Opening search page {}", self.config.search_url);
        self.controller.navigate(&self.config.search_url).await?;

        let found = wait_for_present(
            self.controller,
            &selectors.search_result,
            timeouts.record_load(),
            timeouts.poll_interval(),
        )
        .await?;
        if !found.is_ready() || !safe_click(self.controller, &selectors.search_result, self.config).await? {
            return Err(CrawlError::NoSearchResults(selectors.search_result.clone()));
        }

        match wait_for_location_containing(
            self.controller,
            &self.config.record_path_fragment(),
            timeouts.record_load(),
            timeouts.poll_interval(),
        )
        .await?
        {
            WaitOutcome::Ready(location) => {
                crawl_info!("Entered first record at {}", location);
                Ok(location)
            }
            WaitOutcome::TimedOut => Err(CrawlError::NoSearchResults(
                selectors.search_result.clone(),
            )),
        }
    }

    /// Navigates straight to one record and waits for its viewer to load.
    pub async fn open_record(&self, target: &str) -> Result<WaitOutcome<()>, ControllerError> {
        crawl_info!("Opening {}", target);
        self.controller.navigate(target).await?;
        let loaded = wait_for_present(
            self.controller,
            &self.config.selectors.expand,
            self.config.timeouts.record_load(),
            self.config.timeouts.poll_interval(),
        )
        .await?;
        Ok(match loaded {
            WaitOutcome::Ready(_) => WaitOutcome::Ready(()),
            WaitOutcome::TimedOut => WaitOutcome::TimedOut,
        })
    }

    /// Processes records until the bound, the end of the collection, or an
    /// unreadable location.
    pub async fn walk(&self, session: &mut SessionContext) -> Result<WalkReport, CrawlError> {
        let mut records = Vec::new();
        let end = loop {
            if !session.has_capacity() {
                crawl_info!("Reached maximum of {} records", session.max_records());
                break WalkEnd::MaxRecords;
            }

            let raw = self.controller.current_location().await?;
            let location = match Location::parse_with_default(&raw, &self.config.default_collection)
            {
                Ok(location) => location,
                Err(err) => {
                    crawl_warn!("Cannot read record from {}: {}", raw, err);
                    break WalkEnd::Unreadable;
                }
            };

            records.push(self.visit(&location, session).await?);

            if !self.next_record().await? {
                break WalkEnd::EndOfCollection;
            }
        };

        let report = WalkReport { records, end };
        crawl_info!(
            "Walk finished ({:?}): {} records processed, {} images saved, {} skipped",
            report.end,
            report.processed(),
            report.saved(),
            report.skipped_assets()
        );
        Ok(report)
    }

    /// Processes the record at `location` unless this session already did.
    pub async fn visit(
        &self,
        location: &Location,
        session: &mut SessionContext,
    ) -> Result<RecordOutcome, ControllerError> {
        if session.is_processed(location) {
            crawl_info!(
                "Already processed rec_{} (display id {}), skipping",
                location.record,
                location.display_id
            );
            return Ok(RecordOutcome::Skipped(location.clone()));
        }
        let ordinal = session.mark_processed(location);
        crawl_info!(
            "Processing record #{}: rec_{}, display id {}",
            ordinal,
            location.record,
            location.display_id
        );
        self.process_record(location).await
    }

    /// Probe, rewind, map ids and download for the record on screen.
    pub async fn process_record(&self, location: &Location) -> Result<RecordOutcome, ControllerError> {
        settle_page(self.controller, self.config).await?;

        let set = probe_compound(self.controller, self.config).await?;
        let mapping = match set.mapping() {
            Ok(mapping) => mapping,
            Err(err) => {
                crawl_warn!("Cannot map ids for rec_{}: {}", location.record, err);
                return Ok(RecordOutcome::Unprobed {
                    location: location.clone(),
                    end: set.end(),
                });
            }
        };
        crawl_info!(
            "rec_{} has {} compound items, first info id {}",
            location.record,
            mapping.count(),
            mapping.first_info_id()
        );
        if !set.ids().windows(2).all(|pair| pair[1] == pair[0] + 1) {
            crawl_debug!(
                "rec_{} display ids are not consecutive; assuming contiguous info ids",
                location.record
            );
        }

        // A carousel that wrapped around is already showing the first item.
        let wrapped = matches!(
            set.end(),
            Some(ProbeEnd::CycleClosed(id)) if set.ids().first() == Some(&id)
        );
        if !wrapped {
            let rewind = rewind_to_first(self.controller, self.config).await?;
            crawl_debug!("Rewind: {:?}", rewind);
        }

        let report = self.downloads.run(location, &mapping).await?;
        crawl_info!(
            "Processed {} compound items for rec_{} ({} saved, {} skipped)",
            report.visited,
            location.record,
            report.saved.len(),
            report.skipped.len()
        );
        Ok(RecordOutcome::Downloaded {
            location: location.clone(),
            report,
        })
    }

    /// Clicks the next-record control. Returns `false` at the end of the
    /// collection.
    async fn next_record(&self) -> Result<bool, ControllerError> {
        let selectors = &self.config.selectors;
        let timeouts = &self.config.timeouts;

        let control = wait_for_present(
            self.controller,
            &selectors.next_record,
            timeouts.next_record_lookup(),
            timeouts.poll_interval(),
        )
        .await?;
        if !control.is_ready() {
            crawl_info!("No next record control, assuming last record");
            return Ok(false);
        }

        let before = self.controller.current_location().await?;
        if !self.controller.click(&selectors.next_record).await? {
            crawl_info!("Next record control vanished, assuming last record");
            return Ok(false);
        }

        let changed = wait_for_location_change(
            self.controller,
            &before,
            timeouts.next_record_change(),
            timeouts.poll_interval(),
        )
        .await?;
        if !changed.is_ready() && !self.content_updated(&before).await? {
            crawl_info!("Page content didn't update, might be at the last record");
            return Ok(false);
        }

        crawl_debug!("Waiting for next record to load");
        sleep(self.config.pacing.after_record()).await;
        settle_page(self.controller, self.config).await?;
        let loaded = wait_for_present(
            self.controller,
            &selectors.expand,
            timeouts.record_load(),
            timeouts.poll_interval(),
        )
        .await?;
        if loaded.is_ready() {
            crawl_info!("Next record loaded");
        } else {
            crawl_warn!("Next record not fully loaded after navigating");
        }
        Ok(true)
    }

    /// Fallback when the location string stayed put: the viewer may still
    /// have swapped in another item.
    async fn content_updated(&self, before: &str) -> Result<bool, ControllerError> {
        crawl_info!("Location didn't change, checking if page content updated");
        let loaded = wait_for_present(
            self.controller,
            &self.config.selectors.expand,
            self.config.timeouts.next_record_change(),
            self.config.timeouts.poll_interval(),
        )
        .await?;
        if !loaded.is_ready() {
            return Ok(false);
        }
        let now = self.controller.current_location().await?;
        let before_id = Location::parse(before).ok().map(|location| location.display_id);
        let now_id = Location::parse(&now).ok().map(|location| location.display_id);
        Ok(now_id.is_some() && now_id != before_id)
    }
}
