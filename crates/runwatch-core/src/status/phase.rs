//! Map raw remote status strings onto a closed set of lifecycle phases.

use super::snapshot::RunSnapshot;
use std::fmt;

/// Classified stage of a remote job's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusPhase {
    Queued,
    Building,
    Running,
    Saving,
    Pushing,
    /// The remote reports the job as complete. Whether it actually succeeded is
    /// decided by the exit code in [`check_completion`](super::check_completion).
    Succeeded,
    Failed,
    /// A non-empty status outside the known vocabulary (e.g. `machine_requested`,
    /// or a value added by a newer remote API). Never terminal, but counts as
    /// running-or-beyond so a job that moves through its phases faster than we poll
    /// is not waited on forever.
    Unrecognized,
    /// The snapshot carried no status at all.
    Unknown,
}

impl StatusPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusPhase::Queued => "queued",
            StatusPhase::Building => "building",
            StatusPhase::Running => "running",
            StatusPhase::Saving => "saving",
            StatusPhase::Pushing => "pushing",
            StatusPhase::Succeeded => "succeeded",
            StatusPhase::Failed => "failed",
            StatusPhase::Unrecognized => "unrecognized",
            StatusPhase::Unknown => "unknown",
        }
    }

    /// True once the job has left the queue: any active or terminal phase, plus
    /// unrecognized statuses.
    pub fn is_running_or_beyond(self) -> bool {
        !matches!(self, StatusPhase::Queued | StatusPhase::Unknown)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, StatusPhase::Succeeded | StatusPhase::Failed)
    }
}

impl fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a raw status string. Case-insensitive; surrounding whitespace ignored.
pub fn classify_status(raw: &str) -> StatusPhase {
    let s = raw.trim().to_ascii_lowercase();
    match s.as_str() {
        "" => StatusPhase::Unknown,
        "queued" | "pending" => StatusPhase::Queued,
        "building" => StatusPhase::Building,
        "running" => StatusPhase::Running,
        "saving" => StatusPhase::Saving,
        "pushing" => StatusPhase::Pushing,
        "complete" | "completed" | "succeeded" => StatusPhase::Succeeded,
        "failed" | "killed" | "stopped" => StatusPhase::Failed,
        _ => StatusPhase::Unrecognized,
    }
}

/// Classify a snapshot. Pure: depends only on `snapshot.status`.
pub fn classify(snapshot: &RunSnapshot) -> StatusPhase {
    classify_status(&snapshot.status)
}

/// Target set of phases a poll loop waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSet {
    phases: Vec<StatusPhase>,
}

impl PhaseSet {
    pub fn new(phases: impl IntoIterator<Item = StatusPhase>) -> Self {
        let mut set = Vec::new();
        for phase in phases {
            if !set.contains(&phase) {
                set.push(phase);
            }
        }
        Self { phases: set }
    }

    /// Building, running, saving, pushing, both terminal phases and any
    /// unrecognized status.
    pub fn running_or_beyond() -> Self {
        Self::new([
            StatusPhase::Building,
            StatusPhase::Running,
            StatusPhase::Saving,
            StatusPhase::Pushing,
            StatusPhase::Succeeded,
            StatusPhase::Failed,
            StatusPhase::Unrecognized,
        ])
    }

    /// Exactly the terminal phases.
    pub fn terminal() -> Self {
        Self::new([StatusPhase::Succeeded, StatusPhase::Failed])
    }

    pub fn contains(&self, phase: StatusPhase) -> bool {
        self.phases.contains(&phase)
    }
}

impl fmt::Display for PhaseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.phases.iter().map(|p| p.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
