//! Poll loop: fetch status until it reaches a target phase or the budget runs out.

use super::error::PollError;
use super::state::RetryState;
use crate::backoff::BackoffSchedule;
use crate::provider::RunStatusProvider;
use crate::status::{classify, JobId, PhaseSet, RunSnapshot};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One poll phase against a provider.
///
/// Each iteration fetches a snapshot and classifies it. A phase in the target set
/// ends the loop; otherwise the miss is counted and, unless the budget is spent,
/// the loop sleeps for the next backoff delay. Provider errors end the loop
/// immediately.
pub struct PollLoop<'a, P: ?Sized> {
    provider: &'a P,
    schedule: BackoffSchedule,
    max_attempts: u32,
    cancel: CancellationToken,
}

impl<'a, P: RunStatusProvider + ?Sized> PollLoop<'a, P> {
    pub fn new(provider: &'a P, schedule: BackoffSchedule, max_attempts: u32) -> Self {
        Self {
            provider,
            schedule,
            max_attempts,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Poll until the job's phase is in `targets`; returns the matching snapshot.
    pub async fn run(&self, job_id: &JobId, targets: &PhaseSet) -> Result<RunSnapshot, PollError> {
        let mut state = RetryState::new(self.max_attempts);
        loop {
            let snapshot = self.fetch(job_id).await?;
            let phase = classify(&snapshot);
            tracing::debug!(
                job_id = %job_id,
                status = %snapshot.status,
                %phase,
                "check status in {}",
                targets
            );

            if targets.contains(phase) {
                tracing::info!(
                    job_id = %job_id,
                    status = %snapshot.status,
                    checks = state.attempts() + 1,
                    "job reached {}",
                    targets
                );
                return Ok(snapshot);
            }

            if state.record_miss() {
                tracing::warn!(
                    job_id = %job_id,
                    status = %snapshot.status,
                    attempts = state.attempts(),
                    "status checks exceeded max retries"
                );
                return Err(PollError::RetriesExhausted {
                    attempts: state.attempts(),
                    last_snapshot: snapshot,
                });
            }

            let pause = self.schedule.next_delay(state.attempts());
            tracing::info!(
                job_id = %job_id,
                status = %snapshot.status,
                attempt = state.attempts(),
                max_attempts = state.max_attempts(),
                next_check_secs = pause.as_secs_f64(),
                "job not yet in target phase"
            );
            sleep_or_cancel(pause, &self.cancel).await?;
        }
    }

    async fn fetch(&self, job_id: &JobId) -> Result<RunSnapshot, PollError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(PollError::Cancelled),
            res = self.provider.fetch(job_id) => Ok(res?),
        }
    }
}

/// Sleep for `duration` unless `cancel` fires first.
pub async fn sleep_or_cancel(duration: Duration, cancel: &CancellationToken) -> Result<(), PollError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(PollError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
