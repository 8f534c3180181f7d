use compound_core::{EnterOutcome, EnterStep, ExitOutcome, ExitStrategy, FullscreenState};
use crawl_logging::{crawl_debug, crawl_info, crawl_warn};

use crate::{
    safe_click, wait_for_clickable, wait_for_present, ControllerError, CrawlerConfig,
    PageController,
};

/// Enters and leaves the viewer's full-page image view.
///
/// `exit` runs the strategies in [`ExitStrategy::ORDER`] and returns to
/// [`FullscreenState::Collapsed`] even when every strategy fails. Browser
/// errors during either transition count as a failed step, never as a
/// crawl error.
pub struct FullscreenToggle<'a> {
    controller: &'a dyn PageController,
    config: &'a CrawlerConfig,
    state: FullscreenState,
}

impl<'a> FullscreenToggle<'a> {
    pub fn new(controller: &'a dyn PageController, config: &'a CrawlerConfig) -> Self {
        Self {
            controller,
            config,
            state: FullscreenState::Collapsed,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    /// Runs expand, full page and the close-marker wait in turn. A timeout
    /// or a browser error at any step leaves the view collapsed.
    pub async fn enter(&mut self) -> EnterOutcome {
        if self.state == FullscreenState::Fullscreen {
            return EnterOutcome::Entered;
        }
        for step in [EnterStep::Expand, EnterStep::ToggleFullPage, EnterStep::CloseMarker] {
            match self.enter_step(step).await {
                Ok(true) => {}
                Ok(false) => return self.enter_failed(step),
                Err(err) => {
                    crawl_warn!("Full-screen step {:?} raised a browser error: {}", step, err);
                    return self.enter_failed(step);
                }
            }
        }

        crawl_debug!("Entered full-screen mode");
        self.state = FullscreenState::Fullscreen;
        EnterOutcome::Entered
    }

    pub async fn exit(&mut self) -> ExitOutcome {
        let mut outcome = ExitOutcome::AllFailed;
        for strategy in ExitStrategy::ORDER {
            if self.try_exit(strategy).await {
                outcome = ExitOutcome::Succeeded { via: strategy };
                break;
            }
            crawl_info!("Exit via {} did not register, trying next fallback", strategy);
        }
        match outcome {
            ExitOutcome::Succeeded { via } => crawl_debug!("Exited full-screen mode via {}", via),
            ExitOutcome::AllFailed => crawl_warn!("Every full-screen exit strategy failed"),
        }
        self.state = FullscreenState::Collapsed;
        outcome
    }

    async fn enter_step(&self, step: EnterStep) -> Result<bool, ControllerError> {
        let selectors = &self.config.selectors;
        let timeouts = &self.config.timeouts;
        match step {
            EnterStep::Expand => {
                self.click_when_clickable(&selectors.expand, timeouts.fullscreen_step())
                    .await
            }
            EnterStep::ToggleFullPage => {
                self.click_when_clickable(&selectors.toggle_full_page, timeouts.fullscreen_step())
                    .await
            }
            EnterStep::CloseMarker => {
                let marker = wait_for_present(
                    self.controller,
                    &selectors.close,
                    timeouts.fullscreen_marker(),
                    timeouts.poll_interval(),
                )
                .await?;
                Ok(marker.is_ready())
            }
        }
    }

    async fn try_exit(&self, strategy: ExitStrategy) -> bool {
        match self.attempt_exit(strategy).await {
            Ok(collapsed) => collapsed,
            Err(err) => {
                crawl_warn!("Exit via {} raised a browser error: {}", strategy, err);
                false
            }
        }
    }

    async fn attempt_exit(&self, strategy: ExitStrategy) -> Result<bool, ControllerError> {
        let selectors = &self.config.selectors;
        let budget = self.config.timeouts.exit_strategy();
        let acted = match strategy {
            ExitStrategy::CloseControl => self.click_when_clickable(&selectors.close, budget).await?,
            ExitStrategy::ToggleFullPage => {
                self.click_when_clickable(&selectors.toggle_full_page, budget)
                    .await?
            }
            ExitStrategy::EscapeKey => {
                self.controller.press_escape(&selectors.body).await?;
                true
            }
        };
        if !acted {
            return Ok(false);
        }
        let collapsed = wait_for_present(
            self.controller,
            &selectors.expand,
            budget,
            self.config.timeouts.poll_interval(),
        )
        .await?;
        Ok(collapsed.is_ready())
    }

    async fn click_when_clickable(
        &self,
        selector: &str,
        timeout: std::time::Duration,
    ) -> Result<bool, ControllerError> {
        let ready = wait_for_clickable(
            self.controller,
            selector,
            timeout,
            self.config.timeouts.poll_interval(),
        )
        .await?;
        if !ready.is_ready() {
            return Ok(false);
        }
        safe_click(self.controller, selector, self.config).await
    }

    fn enter_failed(&mut self, step: EnterStep) -> EnterOutcome {
        crawl_warn!("Could not enter full-screen mode at step {:?}", step);
        self.state = FullscreenState::Collapsed;
        EnterOutcome::Failed { step }
    }
}
