//! Compound core: pure location parsing, id arithmetic and session bookkeeping.
//!
//! Nothing in this crate touches the browser, the network or the disk.
mod fullscreen;
mod id_map;
mod location;
mod session;
mod task;
mod traversal;

pub use fullscreen::{EnterOutcome, EnterStep, ExitOutcome, ExitStrategy, FullscreenState};
pub use id_map::{IdMapError, IdMapping, InfoId};
pub use location::{DisplayItemId, Location, LocationError, RecordKey, DEFAULT_COLLECTION};
pub use session::SessionContext;
pub use task::DownloadTask;
pub use traversal::{observe, CompoundSet, Observation, ProbeEnd, StepOutcome, WaitOutcome};
