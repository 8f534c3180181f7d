use std::collections::HashSet;
use std::path::PathBuf;

use compound_core::{observe, DownloadTask, EnterOutcome, IdMapping, Location, Observation};
use crawl_logging::{crawl_info, crawl_warn};

use crate::{
    advance, AssetError, AssetResolver, ControllerError, CrawlerConfig, DownloadReport,
    FullscreenToggle, ImageStore, PageController, PassEnd, SkipReason, SkippedAsset,
};

/// Download pass over one compound record, starting at its first sub-image.
pub struct DownloadOrchestrator<'a> {
    controller: &'a dyn PageController,
    config: &'a CrawlerConfig,
    resolver: &'a AssetResolver,
    store: &'a ImageStore,
}

impl<'a> DownloadOrchestrator<'a> {
    pub fn new(
        controller: &'a dyn PageController,
        config: &'a CrawlerConfig,
        resolver: &'a AssetResolver,
        store: &'a ImageStore,
    ) -> Self {
        Self {
            controller,
            config,
            resolver,
            store,
        }
    }

    /// Visits up to `mapping.count()` sub-images in display order.
    ///
    /// Per-asset failures are recorded in the report and never retried. Only
    /// genuine browser failures are returned as errors.
    pub async fn run(
        &self,
        record: &Location,
        mapping: &IdMapping,
    ) -> Result<DownloadReport, ControllerError> {
        let mut report = DownloadReport::new();
        let mut seen = HashSet::new();
        let mut index = 0;

        while index < mapping.count() {
            let location = self.controller.current_location().await?;
            let display_id = match observe(&location, &seen) {
                Observation::Fresh(id) => id,
                Observation::Revisited(id) => {
                    crawl_info!("Sub-image {} already processed, stopping download pass", id);
                    report.end = PassEnd::Revisited;
                    return Ok(report);
                }
                Observation::Unreadable => {
                    crawl_warn!("Could not read sub-image id from {}", location);
                    report.end = PassEnd::Unreadable;
                    return Ok(report);
                }
            };
            seen.insert(display_id);

            let Some(info_id) = mapping.info_id(index) else {
                break;
            };
            let task = DownloadTask {
                record: record.record.clone(),
                display_id,
                info_id,
            };
            crawl_info!(
                "Processing sub-image {} of {}: display id {}, info id {}",
                index + 1,
                mapping.count(),
                display_id,
                info_id
            );
            self.download_one(&record.collection, task, &mut report).await;
            report.visited += 1;
            index += 1;

            if index >= mapping.count() {
                break;
            }
            let step = advance(self.controller, &self.config.selectors.next_image, self.config)
                .await?;
            if !step.moved() {
                crawl_info!("Download pass stopped early after {} items: {:?}", index, step);
                report.end = PassEnd::Boundary(step);
                return Ok(report);
            }
        }

        report.end = PassEnd::Completed;
        Ok(report)
    }

    async fn download_one(
        &self,
        collection: &str,
        task: DownloadTask,
        report: &mut DownloadReport,
    ) {
        let mut toggle = FullscreenToggle::new(self.controller, self.config);
        if let EnterOutcome::Failed { step } = toggle.enter().await {
            report.skipped.push(SkippedAsset {
                task,
                reason: SkipReason::EnterFailed(step),
            });
            return;
        }

        match self.fetch_asset(collection, &task).await {
            Ok(path) => report.saved.push((task, path)),
            Err((reason, err)) => {
                crawl_warn!(
                    "Skipping display id {} (info id {}): {}",
                    task.display_id,
                    task.info_id,
                    err
                );
                report.skipped.push(SkippedAsset { task, reason });
            }
        }

        let exit = toggle.exit().await;
        report.note_exit(exit);
    }

    async fn fetch_asset(
        &self,
        collection: &str,
        task: &DownloadTask,
    ) -> Result<PathBuf, (SkipReason, AssetError)> {
        let image_url = self
            .resolver
            .resolve(collection, task.info_id)
            .await
            .map_err(|err| (SkipReason::Unresolved, err))?;
        self.store
            .save(task, &image_url)
            .await
            .map_err(|err| (SkipReason::DownloadFailed, err))
    }
}
