//! Wait for a remote job to finish: wait-until-running, then wait-until-complete,
//! then the completion check.

use crate::backoff::{BackoffSchedule, JitterDelay};
use crate::config::PollConfig;
use crate::poll::{sleep_or_cancel, PollError, PollLoop, WaitError};
use crate::provider::RunStatusProvider;
use crate::status::{FailureReason, JobId, PhaseSet, RunSnapshot, WaitOutcome};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Entry point for watching one job at a time against a status provider.
///
/// Holds no per-job state, so a single waiter (or clones of it) can watch many
/// jobs concurrently; each call gets its own retry budget.
#[derive(Debug, Clone)]
pub struct RunWaiter<P> {
    provider: P,
    delay: JitterDelay,
    schedule: BackoffSchedule,
    initial_delay: Option<Duration>,
    max_attempts: u32,
    cancel: CancellationToken,
}

impl<P: RunStatusProvider> RunWaiter<P> {
    pub fn new(provider: P, config: &PollConfig) -> Self {
        Self {
            provider,
            delay: JitterDelay::from(&config.delay),
            schedule: BackoffSchedule::from(&config.backoff),
            initial_delay: config.initial_delay(),
            max_attempts: config.max_attempts,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` to abort waits between (or during) status checks.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the full wait cycle for `job_id`.
    ///
    /// Job-level failures (failed job, non-zero exit, exhausted retries) come back
    /// as `Ok(WaitOutcome::Failure { .. })`; provider errors and cancellation as
    /// `Err`.
    pub async fn wait(&self, job_id: &JobId) -> Result<WaitOutcome, WaitError> {
        tracing::info!(job_id = %job_id, "waiting for job");

        if let Err(e) = self.pause().await {
            return poll_failure(job_id, e);
        }
        if let Err(e) = self.wait_until_running(job_id).await {
            return poll_failure(job_id, e);
        }

        if let Err(e) = self.pause().await {
            return poll_failure(job_id, e);
        }
        let last = match self.wait_until_complete(job_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => return poll_failure(job_id, e),
        };
        tracing::info!(job_id = %job_id, "job has completed");

        let outcome = WaitOutcome::from_snapshot(last);
        log_outcome(job_id, &outcome);
        Ok(outcome)
    }

    /// Poll until the job has left the queue. Terminal and unrecognized statuses
    /// also match, since a fast job may never be observed as running.
    pub async fn wait_until_running(&self, job_id: &JobId) -> Result<RunSnapshot, PollError> {
        self.poll_loop()
            .run(job_id, &PhaseSet::running_or_beyond())
            .await
    }

    /// Poll until the job reaches a terminal phase.
    pub async fn wait_until_complete(&self, job_id: &JobId) -> Result<RunSnapshot, PollError> {
        self.poll_loop().run(job_id, &PhaseSet::terminal()).await
    }

    /// Fetch the job once and apply the completion check, without waiting.
    pub async fn check(&self, job_id: &JobId) -> Result<WaitOutcome, WaitError> {
        let snapshot = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(WaitError::Cancelled(job_id.clone())),
            res = self.provider.fetch(job_id) => res.map_err(|source| WaitError::Provider {
                job_id: job_id.clone(),
                source,
            })?,
        };
        let outcome = WaitOutcome::from_snapshot(snapshot);
        log_outcome(job_id, &outcome);
        Ok(outcome)
    }

    fn poll_loop(&self) -> PollLoop<'_, P> {
        PollLoop::new(&self.provider, self.schedule, self.max_attempts)
            .with_cancellation(self.cancel.clone())
    }

    async fn pause(&self) -> Result<(), PollError> {
        let d = self.delay.delay(self.initial_delay);
        tracing::debug!(delay_secs = d.as_secs_f64(), "delay before polling");
        sleep_or_cancel(d, &self.cancel).await
    }
}

/// Map a phase error onto the wait result: exhausted budgets are a job-level
/// failure, everything else a hard error.
fn poll_failure(job_id: &JobId, err: PollError) -> Result<WaitOutcome, WaitError> {
    match err {
        PollError::RetriesExhausted {
            attempts,
            last_snapshot,
        } => {
            let outcome = WaitOutcome::Failure {
                reason: FailureReason::RetriesExhausted { attempts },
                last_snapshot,
            };
            log_outcome(job_id, &outcome);
            Ok(outcome)
        }
        PollError::Provider(source) => Err(WaitError::Provider {
            job_id: job_id.clone(),
            source,
        }),
        PollError::Cancelled => Err(WaitError::Cancelled(job_id.clone())),
    }
}

fn log_outcome(job_id: &JobId, outcome: &WaitOutcome) {
    match outcome {
        WaitOutcome::Success(s) => tracing::info!(job_id = %job_id, "job succeeded: {}", s),
        WaitOutcome::Failure {
            reason,
            last_snapshot,
        } => tracing::warn!(job_id = %job_id, "job failed: {} ({})", reason, last_snapshot),
    }
}
