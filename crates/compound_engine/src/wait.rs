use std::future::Future;
use std::time::Duration;

use compound_core::WaitOutcome;
use tokio::time::{sleep, Instant};

use crate::{ControllerError, ElementState, PageController};

/// Polls `check` until it yields a value or `timeout` elapses.
///
/// `check` always runs at least once. Errors from `check` end the wait
/// immediately; running out of time is reported as [`WaitOutcome::TimedOut`].
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<WaitOutcome<T>, ControllerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ControllerError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = check().await? {
            return Ok(WaitOutcome::Ready(value));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(WaitOutcome::TimedOut);
        }
        sleep(interval.min(deadline - now)).await;
    }
}

pub async fn wait_for_present(
    controller: &dyn PageController,
    selector: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<WaitOutcome<ElementState>, ControllerError> {
    poll_until(timeout, interval, move || async move {
        controller.probe_element(selector).await
    })
    .await
}

pub async fn wait_for_clickable(
    controller: &dyn PageController,
    selector: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<WaitOutcome, ControllerError> {
    poll_until(timeout, interval, move || async move {
        let state = controller.probe_element(selector).await?;
        Ok(state.filter(ElementState::clickable).map(|_| ()))
    })
    .await
}

/// Waits until the location differs from `before`; yields the new location.
pub async fn wait_for_location_change(
    controller: &dyn PageController,
    before: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<WaitOutcome<String>, ControllerError> {
    poll_until(timeout, interval, move || async move {
        let now = controller.current_location().await?;
        Ok((now != before).then_some(now))
    })
    .await
}

pub async fn wait_for_location_containing(
    controller: &dyn PageController,
    fragment: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<WaitOutcome<String>, ControllerError> {
    poll_until(timeout, interval, move || async move {
        let now = controller.current_location().await?;
        Ok(now.contains(fragment).then_some(now))
    })
    .await
}
