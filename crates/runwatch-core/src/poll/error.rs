//! Errors that end a poll phase or a whole wait.

use crate::provider::ProviderError;
use crate::status::{JobId, RunSnapshot};
use thiserror::Error;

/// Why a single poll phase stopped without matching its target set.
#[derive(Debug, Error)]
pub enum PollError {
    /// The provider failed; not retried.
    #[error("status fetch failed: {0}")]
    Provider(#[from] ProviderError),
    /// `attempts` unsuccessful checks reached the budget.
    #[error("status checks exceeded max retries ({attempts})")]
    RetriesExhausted {
        attempts: u32,
        last_snapshot: RunSnapshot,
    },
    #[error("wait cancelled")]
    Cancelled,
}

/// Hard errors of a full wait. Job-level failures are a
/// [`WaitOutcome`](crate::status::WaitOutcome), not an error.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("job {job_id}: status fetch failed: {source}")]
    Provider {
        job_id: JobId,
        #[source]
        source: ProviderError,
    },
    #[error("job {0}: wait cancelled")]
    Cancelled(JobId),
}
