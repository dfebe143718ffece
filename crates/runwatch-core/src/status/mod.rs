//! Remote job status: snapshots, phase classification and the completion check.
//!
//! Classification is a pure function of the raw status string. The exit code
//! only matters once polling has stopped, when [`check_completion`] turns the
//! final snapshot into a [`WaitOutcome`].

mod completion;
mod phase;
mod snapshot;

pub use completion::{check_completion, FailureReason, WaitOutcome};
pub use phase::{classify, classify_status, PhaseSet, StatusPhase};
pub use snapshot::{JobId, RunSnapshot};
