use std::collections::HashSet;

use crate::location::display_id_of;
use crate::{DisplayItemId, IdMapError, IdMapping};

/// Result of a bounded wait. A timeout is an expected value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T = ()> {
    Ready(T),
    TimedOut,
}

impl<T> WaitOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, WaitOutcome::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            WaitOutcome::Ready(value) => Some(value),
            WaitOutcome::TimedOut => None,
        }
    }
}

/// What happened when trying to move one step through the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    ControlMissing,
    ControlDisabled,
    /// Control was clicked but the location never changed.
    Stalled,
}

impl StepOutcome {
    pub fn moved(self) -> bool {
        self == StepOutcome::Moved
    }
}

/// Classification of one location read during a sub-image walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Fresh(DisplayItemId),
    Revisited(DisplayItemId),
    Unreadable,
}

/// Reads the display id out of `raw` and checks it against `seen`.
pub fn observe(raw: &str, seen: &HashSet<DisplayItemId>) -> Observation {
    match display_id_of(raw) {
        None => Observation::Unreadable,
        Some(id) if seen.contains(&id) => Observation::Revisited(id),
        Some(id) => Observation::Fresh(id),
    }
}

/// Why a forward probe stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeEnd {
    /// A previously seen id came back around.
    CycleClosed(DisplayItemId),
    Unreadable,
    Boundary(StepOutcome),
}

/// Distinct display ids of one compound record, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSet {
    ids: Vec<DisplayItemId>,
    seen: HashSet<DisplayItemId>,
    end: Option<ProbeEnd>,
}

impl Default for CompoundSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundSet {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            seen: HashSet::new(),
            end: None,
        }
    }

    /// Feeds one location read. Returns `false` once probing must stop.
    pub fn record(&mut self, raw: &str) -> bool {
        if self.end.is_some() {
            return false;
        }
        match observe(raw, &self.seen) {
            Observation::Fresh(id) => {
                self.seen.insert(id);
                self.ids.push(id);
                true
            }
            Observation::Revisited(id) => {
                self.end = Some(ProbeEnd::CycleClosed(id));
                false
            }
            Observation::Unreadable => {
                self.end = Some(ProbeEnd::Unreadable);
                false
            }
        }
    }

    pub fn finish(&mut self, step: StepOutcome) {
        if self.end.is_none() {
            self.end = Some(ProbeEnd::Boundary(step));
        }
    }

    pub fn ids(&self) -> &[DisplayItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn last(&self) -> Option<DisplayItemId> {
        self.ids.last().copied()
    }

    pub fn end(&self) -> Option<ProbeEnd> {
        self.end
    }

    /// Id mapping anchored on the last probed display id.
    pub fn mapping(&self) -> Result<IdMapping, IdMapError> {
        let last = self.last().ok_or(IdMapError::EmptyRecord)?;
        IdMapping::new(last, self.len())
    }
}
