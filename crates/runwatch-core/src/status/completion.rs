//! Final verdict on a job once polling has stopped.

use super::phase::{classify, StatusPhase};
use super::snapshot::RunSnapshot;
use std::fmt;

/// Why a wait ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The remote reported the job as failed (or killed/stopped).
    JobFailed,
    /// The remote reported completion but the exit code is not zero (or missing).
    /// The exit code is the authoritative success signal.
    NonZeroExit { exit_code: Option<i64> },
    /// The completion check saw a known in-progress phase.
    NotComplete,
    /// The completion check saw a phase that is neither terminal nor a known
    /// in-progress phase.
    UnknownTerminalState,
    /// The retry budget ran out before the job reached the target phase.
    RetriesExhausted { attempts: u32 },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::JobFailed => write!(f, "job failed"),
            FailureReason::NonZeroExit { exit_code: Some(code) } => {
                write!(f, "job completed with non-zero exit code {}", code)
            }
            FailureReason::NonZeroExit { exit_code: None } => {
                write!(f, "job completed without reporting an exit code")
            }
            FailureReason::NotComplete => write!(f, "job is not complete"),
            FailureReason::UnknownTerminalState => write!(f, "job has unknown status"),
            FailureReason::RetriesExhausted { attempts } => {
                write!(f, "status checks exceeded max retries ({})", attempts)
            }
        }
    }
}

/// Decide whether a snapshot represents a successfully completed job.
pub fn check_completion(snapshot: &RunSnapshot) -> Result<(), FailureReason> {
    match classify(snapshot) {
        StatusPhase::Succeeded => match snapshot.exit_code {
            Some(0) => Ok(()),
            exit_code => Err(FailureReason::NonZeroExit { exit_code }),
        },
        StatusPhase::Failed => Err(FailureReason::JobFailed),
        StatusPhase::Queued
        | StatusPhase::Building
        | StatusPhase::Running
        | StatusPhase::Saving
        | StatusPhase::Pushing => Err(FailureReason::NotComplete),
        StatusPhase::Unrecognized | StatusPhase::Unknown => {
            Err(FailureReason::UnknownTerminalState)
        }
    }
}

/// Result of a full wait cycle, handed to the caller and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Success(RunSnapshot),
    Failure {
        reason: FailureReason,
        last_snapshot: RunSnapshot,
    },
}

impl WaitOutcome {
    /// Build the outcome for the snapshot that ended polling.
    pub fn from_snapshot(snapshot: RunSnapshot) -> Self {
        match check_completion(&snapshot) {
            Ok(()) => WaitOutcome::Success(snapshot),
            Err(reason) => WaitOutcome::Failure {
                reason,
                last_snapshot: snapshot,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WaitOutcome::Success(_))
    }

    pub fn last_snapshot(&self) -> &RunSnapshot {
        match self {
            WaitOutcome::Success(s) => s,
            WaitOutcome::Failure { last_snapshot, .. } => last_snapshot,
        }
    }

    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            WaitOutcome::Success(_) => None,
            WaitOutcome::Failure { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Display for WaitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitOutcome::Success(s) => write!(f, "succeeded ({})", s),
            WaitOutcome::Failure {
                reason,
                last_snapshot,
            } => write!(f, "{} ({})", reason, last_snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_with_zero_exit_succeeds() {
        let snap = RunSnapshot::new("complete").with_exit_code(0);
        assert_eq!(check_completion(&snap), Ok(()));
        assert!(WaitOutcome::from_snapshot(snap).is_success());
    }

    #[test]
    fn complete_with_non_zero_exit_fails() {
        let snap = RunSnapshot::new("complete").with_exit_code(1);
        assert_eq!(
            check_completion(&snap),
            Err(FailureReason::NonZeroExit { exit_code: Some(1) })
        );
    }

    #[test]
    fn complete_without_exit_code_fails() {
        let snap = RunSnapshot::new("complete");
        assert_eq!(
            check_completion(&snap),
            Err(FailureReason::NonZeroExit { exit_code: None })
        );
    }

    #[test]
    fn failed_phase_is_job_failed() {
        for status in ["failed", "killed", "stopped"] {
            let snap = RunSnapshot::new(status).with_exit_code(0);
            assert_eq!(check_completion(&snap), Err(FailureReason::JobFailed));
        }
    }

    #[test]
    fn in_progress_and_unknown_phases() {
        assert_eq!(
            check_completion(&RunSnapshot::new("running")),
            Err(FailureReason::NotComplete)
        );
        assert_eq!(
            check_completion(&RunSnapshot::new("machine_requested")),
            Err(FailureReason::UnknownTerminalState)
        );
        assert_eq!(
            check_completion(&RunSnapshot::new("")),
            Err(FailureReason::UnknownTerminalState)
        );
    }

    #[test]
    fn failure_outcome_keeps_last_snapshot() {
        let snap = RunSnapshot::new("failed");
        let outcome = WaitOutcome::from_snapshot(snap.clone());
        assert_eq!(outcome.last_snapshot(), &snap);
        assert_eq!(outcome.failure_reason(), Some(&FailureReason::JobFailed));
        assert_eq!(outcome.to_string(), "job failed (status=failed)");
    }
}
