#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use compound_core::ExitStrategy;
use compound_engine::{
    ControllerError, CrawlerConfig, ElementState, PageController, Pacing, Selectors, Timeouts,
};

pub const VIEWER_HOST: &str = "https://viewer.test";

/// One compound record as the fake viewer shows it.
#[derive(Debug, Clone)]
pub struct FakeRecord {
    pub rec: Option<u64>,
    pub ids: Vec<u64>,
}

impl FakeRecord {
    pub fn new(rec: u64, ids: &[u64]) -> Self {
        Self {
            rec: Some(rec),
            ids: ids.to_vec(),
        }
    }
}

#[derive(Debug, Default)]
struct ViewerState {
    records: Vec<FakeRecord>,
    record: usize,
    item: usize,
    on_search_page: bool,
    wraps: bool,
    expanded: bool,
    fullscreen: bool,
    expand_missing: bool,
    next_record_stuck: bool,
    broken_exits: HashSet<ExitStrategy>,
    failing_clicks: HashSet<String>,
    next_image_limit: Option<usize>,
    next_image_clicks: usize,
    previous_image_clicks: usize,
}

/// Scripted stand-in for a CONTENTdm viewer tab.
pub struct FakeViewer {
    selectors: Selectors,
    state: Mutex<ViewerState>,
}

impl FakeViewer {
    pub fn new(records: Vec<FakeRecord>) -> Self {
        Self {
            selectors: Selectors::default(),
            state: Mutex::new(ViewerState {
                records,
                ..ViewerState::default()
            }),
        }
    }

    /// Next/previous wrap around instead of disabling at the ends.
    pub fn wrapping(self) -> Self {
        self.state().wraps = true;
        self
    }

    pub fn on_search_page(self) -> Self {
        self.state().on_search_page = true;
        self
    }

    pub fn with_next_record_stuck(self) -> Self {
        self.state().next_record_stuck = true;
        self
    }

    pub fn without_expand_control(self) -> Self {
        self.state().expand_missing = true;
        self
    }

    pub fn break_exit(self, strategy: ExitStrategy) -> Self {
        self.state().broken_exits.insert(strategy);
        self
    }

    /// Clicking `selector` raises a browser error.
    pub fn fail_clicks_on(self, selector: &str) -> Self {
        self.state().failing_clicks.insert(selector.to_string());
        self
    }

    /// Next image stops moving the viewer after `moves` successful clicks.
    pub fn stall_next_image_after(self, moves: usize) -> Self {
        self.state().next_image_limit = Some(moves);
        self
    }

    pub fn start_at(self, item: usize) -> Self {
        self.state().item = item;
        self
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state().fullscreen
    }

    pub fn current_id(&self) -> u64 {
        let state = self.state();
        state.records[state.record].ids[state.item]
    }

    pub fn next_image_clicks(&self) -> usize {
        self.state().next_image_clicks
    }

    pub fn previous_image_clicks(&self) -> usize {
        self.state().previous_image_clicks
    }

    fn state(&self) -> MutexGuard<'_, ViewerState> {
        self.state.lock().unwrap()
    }
}

impl ViewerState {
    fn current(&self) -> &FakeRecord {
        &self.records[self.record]
    }

    fn location(&self) -> String {
        if self.on_search_page {
            return format!("{VIEWER_HOST}/digital/collection/lclma/search");
        }
        let record = self.current();
        let id = record.ids[self.item];
        match record.rec {
            Some(rec) => format!("{VIEWER_HOST}/digital/collection/lclma/id/{id}/rec/{rec}"),
            None => format!("{VIEWER_HOST}/digital/collection/lclma/id/{id}"),
        }
    }

    fn pager(&self, at_boundary: bool) -> Option<ElementState> {
        if self.on_search_page || self.current().ids.len() < 2 {
            return None;
        }
        Some(ElementState {
            disabled: !self.wraps && at_boundary,
        })
    }

    fn leave_fullscreen(&mut self) {
        self.fullscreen = false;
        self.expanded = false;
    }
}

#[async_trait]
impl PageController for FakeViewer {
    async fn navigate(&self, url: &str) -> Result<(), ControllerError> {
        let mut state = self.state();
        if url.ends_with("/search") {
            state.on_search_page = true;
            return Ok(());
        }
        let position = state.records.iter().enumerate().find_map(|(r, record)| {
            record
                .ids
                .iter()
                .position(|id| url.contains(&format!("/id/{id}")))
                .map(|item| (r, item))
        });
        match position {
            Some((record, item)) => {
                state.on_search_page = false;
                state.record = record;
                state.item = item;
                Ok(())
            }
            None => Err(ControllerError::Navigation {
                url: url.to_string(),
                message: "unknown item".to_string(),
            }),
        }
    }

    async fn current_location(&self) -> Result<String, ControllerError> {
        Ok(self.state().location())
    }

    async fn probe_element(&self, selector: &str) -> Result<Option<ElementState>, ControllerError> {
        let state = self.state();
        let s = &self.selectors;
        let present = |visible: bool| visible.then_some(ElementState::default());
        let found = if selector == s.next_image {
            let last = state.item + 1 == state.current().ids.len();
            state.pager(last)
        } else if selector == s.previous_image {
            state.pager(state.item == 0)
        } else if selector == s.expand {
            present(!state.on_search_page && !state.fullscreen && !state.expand_missing)
        } else if selector == s.toggle_full_page {
            present(state.expanded || state.fullscreen)
        } else if selector == s.close {
            present(state.fullscreen)
        } else if selector == s.next_record {
            present(
                !state.on_search_page
                    && (state.next_record_stuck || state.record + 1 < state.records.len()),
            )
        } else if selector == s.search_result {
            present(state.on_search_page)
        } else {
            present(selector == s.body)
        };
        Ok(found)
    }

    async fn click(&self, selector: &str) -> Result<bool, ControllerError> {
        if self.state().failing_clicks.contains(selector) {
            return Err(ControllerError::Element {
                selector: selector.to_string(),
                message: "element is detached".to_string(),
            });
        }
        if self.probe_element(selector).await?.is_none() {
            return Ok(false);
        }
        let mut state = self.state();
        let s = &self.selectors;
        let len = state.current().ids.len();
        if selector == s.next_image {
            state.next_image_clicks += 1;
            let stalled = state
                .next_image_limit
                .is_some_and(|limit| state.next_image_clicks > limit);
            if !stalled && (state.wraps || state.item + 1 < len) {
                state.item = (state.item + 1) % len;
            }
        } else if selector == s.previous_image {
            state.previous_image_clicks += 1;
            if state.wraps || state.item > 0 {
                state.item = (state.item + len - 1) % len;
            }
        } else if selector == s.expand {
            state.expanded = true;
        } else if selector == s.toggle_full_page {
            if !state.fullscreen {
                state.fullscreen = state.expanded;
            } else if !state.broken_exits.contains(&ExitStrategy::ToggleFullPage) {
                state.leave_fullscreen();
            }
        } else if selector == s.close {
            if !state.broken_exits.contains(&ExitStrategy::CloseControl) {
                state.leave_fullscreen();
            }
        } else if selector == s.next_record {
            if !state.next_record_stuck && state.record + 1 < state.records.len() {
                state.record += 1;
                state.item = 0;
            }
        } else if selector == s.search_result {
            state.on_search_page = false;
            state.record = 0;
            state.item = 0;
        }
        Ok(true)
    }

    async fn press_escape(&self, _selector: &str) -> Result<(), ControllerError> {
        let mut state = self.state();
        if state.fullscreen && !state.broken_exits.contains(&ExitStrategy::EscapeKey) {
            state.leave_fullscreen();
        }
        Ok(())
    }

    async fn scroll_page(&self, _pause: Duration) -> Result<(), ControllerError> {
        Ok(())
    }
}

/// Config with short bounds and no pacing, pointed at `host`.
pub fn test_config(host: &str, download_dir: &Path) -> CrawlerConfig {
    let bound = 40;
    CrawlerConfig {
        host: host.to_string(),
        download_dir: download_dir.to_path_buf(),
        max_records: 10,
        timeouts: Timeouts {
            control_ms: bound,
            location_change_ms: bound,
            fullscreen_step_ms: bound,
            fullscreen_marker_ms: bound,
            exit_strategy_ms: bound,
            next_record_lookup_ms: bound,
            next_record_change_ms: bound,
            record_load_ms: bound,
            poll_interval_ms: 1,
        },
        pacing: Pacing::immediate(),
        ..CrawlerConfig::default()
    }
}

pub fn location_of(id: u64, rec: u64) -> String {
    format!("{VIEWER_HOST}/digital/collection/lclma/id/{id}/rec/{rec}")
}
