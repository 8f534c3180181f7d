use compound_core::{StepOutcome, WaitOutcome};
use crawl_logging::{crawl_debug, crawl_warn};
use tokio::time::sleep;

use crate::{wait_for_location_change, wait_for_present, ControllerError, CrawlerConfig, PageController};

/// Clicks `selector` and pauses so the viewer can react.
pub async fn safe_click(
    controller: &dyn PageController,
    selector: &str,
    config: &CrawlerConfig,
) -> Result<bool, ControllerError> {
    crawl_debug!("Clicking {}", selector);
    let clicked = controller.click(selector).await?;
    if clicked {
        sleep(config.pacing.after_click()).await;
    } else {
        crawl_warn!("Nothing to click for {}", selector);
    }
    Ok(clicked)
}

/// Scrolls down and back up so lazily rendered controls appear.
pub async fn settle_page(
    controller: &dyn PageController,
    config: &CrawlerConfig,
) -> Result<(), ControllerError> {
    crawl_debug!("Scrolling page to trigger lazy controls");
    controller.scroll_page(config.pacing.after_scroll()).await
}

/// Moves one sub-image through the viewer with the control at `selector`.
///
/// A missing or disabled control, or a click that leaves the location
/// unchanged, is a boundary and not an error.
pub async fn advance(
    controller: &dyn PageController,
    selector: &str,
    config: &CrawlerConfig,
) -> Result<StepOutcome, ControllerError> {
    let timeouts = &config.timeouts;
    let state = match wait_for_present(
        controller,
        selector,
        timeouts.control(),
        timeouts.poll_interval(),
    )
    .await?
    {
        WaitOutcome::Ready(state) => state,
        WaitOutcome::TimedOut => return Ok(StepOutcome::ControlMissing),
    };
    if state.disabled {
        return Ok(StepOutcome::ControlDisabled);
    }

    let before = controller.current_location().await?;
    if !safe_click(controller, selector, config).await? {
        return Ok(StepOutcome::ControlMissing);
    }
    let changed = wait_for_location_change(
        controller,
        &before,
        timeouts.location_change(),
        timeouts.poll_interval(),
    )
    .await?;
    Ok(if changed.is_ready() {
        StepOutcome::Moved
    } else {
        StepOutcome::Stalled
    })
}
