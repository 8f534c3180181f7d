mod common;

use std::path::Path;

use common::{test_config, FakeRecord, FakeViewer};
use compound_core::{EnterOutcome, EnterStep, ExitOutcome, ExitStrategy, FullscreenState};
use compound_engine::{CrawlerConfig, FullscreenToggle};

fn config() -> CrawlerConfig {
    test_config("http://unused.test", Path::new("unused"))
}

fn viewer() -> FakeViewer {
    FakeViewer::new(vec![FakeRecord::new(39, &[3664, 3665])])
}

#[tokio::test]
async fn enter_then_exit_through_close_control() {
    let viewer = viewer();
    let config = config();
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    assert_eq!(toggle.enter().await, EnterOutcome::Entered);
    assert_eq!(toggle.state(), FullscreenState::Fullscreen);
    assert!(viewer.is_fullscreen());

    let outcome = toggle.exit().await;
    assert_eq!(
        outcome,
        ExitOutcome::Succeeded {
            via: ExitStrategy::CloseControl
        }
    );
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
    assert!(!viewer.is_fullscreen());
}

#[tokio::test]
async fn exit_falls_back_to_toggle_when_close_times_out() {
    let viewer = viewer().break_exit(ExitStrategy::CloseControl);
    let config = config();
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    toggle.enter().await;
    let outcome = toggle.exit().await;
    assert_eq!(
        outcome,
        ExitOutcome::Succeeded {
            via: ExitStrategy::ToggleFullPage
        }
    );
    assert!(outcome.succeeded());
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
    assert!(!viewer.is_fullscreen());
}

#[tokio::test]
async fn exit_falls_back_to_escape_key_last() {
    let viewer = viewer()
        .break_exit(ExitStrategy::CloseControl)
        .break_exit(ExitStrategy::ToggleFullPage);
    let config = config();
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    toggle.enter().await;
    assert_eq!(
        toggle.exit().await,
        ExitOutcome::Succeeded {
            via: ExitStrategy::EscapeKey
        }
    );
}

#[tokio::test]
async fn exhausted_exit_chain_still_collapses_logically() {
    let mut viewer = viewer();
    for strategy in ExitStrategy::ORDER {
        viewer = viewer.break_exit(strategy);
    }
    let config = config();
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    toggle.enter().await;
    assert_eq!(toggle.exit().await, ExitOutcome::AllFailed);
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
    assert!(viewer.is_fullscreen());
}

#[tokio::test]
async fn enter_fails_without_expand_control() {
    let viewer = viewer().without_expand_control();
    let config = config();
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    assert_eq!(
        toggle.enter().await,
        EnterOutcome::Failed {
            step: EnterStep::Expand
        }
    );
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
}

#[tokio::test]
async fn exit_falls_back_to_toggle_when_close_click_errors() {
    let config = config();
    let viewer = viewer().fail_clicks_on(&config.selectors.close);
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    assert_eq!(toggle.enter().await, EnterOutcome::Entered);
    assert_eq!(
        toggle.exit().await,
        ExitOutcome::Succeeded {
            via: ExitStrategy::ToggleFullPage
        }
    );
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
    assert!(!viewer.is_fullscreen());
}

#[tokio::test]
async fn browser_error_while_entering_reports_failed_step() {
    let config = config();
    let viewer = viewer().fail_clicks_on(&config.selectors.toggle_full_page);
    let mut toggle = FullscreenToggle::new(&viewer, &config);

    assert_eq!(
        toggle.enter().await,
        EnterOutcome::Failed {
            step: EnterStep::ToggleFullPage
        }
    );
    assert_eq!(toggle.state(), FullscreenState::Collapsed);
}
