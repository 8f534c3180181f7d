use compound_core::{CompoundSet, StepOutcome};
use crawl_logging::{crawl_debug, crawl_info, crawl_warn};

use crate::{advance, ControllerError, CrawlerConfig, PageController};

/// Walks forward through the current record collecting distinct display ids.
///
/// Stops when an id repeats, the location is unreadable, or the next control
/// can no longer move the viewer.
pub async fn probe_compound(
    controller: &dyn PageController,
    config: &CrawlerConfig,
) -> Result<CompoundSet, ControllerError> {
    let mut set = CompoundSet::new();
    loop {
        let location = controller.current_location().await?;
        if !set.record(&location) {
            break;
        }
        crawl_debug!("Found compound item {}: {}", set.len(), location);

        let step = advance(controller, &config.selectors.next_image, config).await?;
        if !step.moved() {
            set.finish(step);
            break;
        }
    }
    crawl_info!(
        "Probe found {} compound items (end: {:?})",
        set.len(),
        set.end()
    );
    Ok(set)
}

/// Backward walk summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindReport {
    pub steps: usize,
    /// Why the walk stopped; `None` when `max_rewind_steps` was reached first.
    pub boundary: Option<StepOutcome>,
}

/// Walks back with the previous control until it is missing, disabled or the
/// location stops changing.
///
/// `config.max_rewind_steps` only guards against a viewer whose previous
/// control never reaches a boundary.
pub async fn rewind_to_first(
    controller: &dyn PageController,
    config: &CrawlerConfig,
) -> Result<RewindReport, ControllerError> {
    let mut steps = 0;
    while steps < config.max_rewind_steps {
        let step = advance(controller, &config.selectors.previous_image, config).await?;
        if !step.moved() {
            crawl_debug!("Rewound {} steps, stopped on {:?}", steps, step);
            return Ok(RewindReport {
                steps,
                boundary: Some(step),
            });
        }
        steps += 1;
    }
    crawl_warn!(
        "Rewind gave up after {} steps without reaching the first item",
        steps
    );
    Ok(RewindReport {
        steps,
        boundary: None,
    })
}
