use std::fmt;
use std::path::PathBuf;

use compound_core::{DownloadTask, EnterStep, ExitOutcome, Location, ProbeEnd, StepOutcome};
use thiserror::Error;

use crate::{ControllerError, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures that skip one asset without stopping the record.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("info document is not valid json: {0}")]
    InvalidDocument(String),
    #[error("info document has no base id")]
    MissingBaseId,
    #[error("could not save image: {0}")]
    Persist(#[from] PersistError),
}

/// Failures that abort a whole run.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error("no search result matched `{0}`")]
    NoSearchResults(String),
    #[error("interrupted")]
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EnterFailed(EnterStep),
    Unresolved,
    DownloadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAsset {
    pub task: DownloadTask,
    pub reason: SkipReason,
}

/// Why a download pass stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassEnd {
    Completed,
    Unreadable,
    Revisited,
    Boundary(StepOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub visited: usize,
    pub saved: Vec<(DownloadTask, PathBuf)>,
    pub skipped: Vec<SkippedAsset>,
    /// Exits where every strategy failed.
    pub failed_exits: usize,
    pub end: PassEnd,
}

impl DownloadReport {
    pub(crate) fn new() -> Self {
        Self {
            visited: 0,
            saved: Vec::new(),
            skipped: Vec::new(),
            failed_exits: 0,
            end: PassEnd::Completed,
        }
    }

    pub(crate) fn note_exit(&mut self, outcome: ExitOutcome) {
        if !outcome.succeeded() {
            self.failed_exits += 1;
        }
    }
}

/// What happened to one record visited by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped(Location),
    /// The probe found nothing usable; carries why it stopped.
    Unprobed { location: Location, end: Option<ProbeEnd> },
    Downloaded { location: Location, report: DownloadReport },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEnd {
    MaxRecords,
    /// Only the requested record was processed.
    SingleRecord,
    EndOfCollection,
    Unreadable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    pub records: Vec<RecordOutcome>,
    pub end: WalkEnd,
}

impl WalkReport {
    pub fn processed(&self) -> usize {
        self.records
            .iter()
            .filter(|outcome| !matches!(outcome, RecordOutcome::Skipped(_)))
            .count()
    }

    pub fn saved(&self) -> usize {
        self.records
            .iter()
            .map(|outcome| match outcome {
                RecordOutcome::Downloaded { report, .. } => report.saved.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn skipped_assets(&self) -> usize {
        self.records
            .iter()
            .map(|outcome| match outcome {
                RecordOutcome::Downloaded { report, .. } => report.skipped.len(),
                _ => 0,
            })
            .sum()
    }
}
