//! In-memory provider that replays a fixed sequence of snapshots.

use super::{ProviderError, RunStatusProvider};
use crate::status::{JobId, RunSnapshot};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Step {
    Snapshot(RunSnapshot),
    Fail(u32),
}

/// Returns scripted steps in order; the last step repeats forever.
pub(crate) struct ScriptedProvider {
    steps: Vec<Step>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub(crate) fn new(snapshots: impl IntoIterator<Item = RunSnapshot>) -> Self {
        let steps: Vec<Step> = snapshots.into_iter().map(Step::Snapshot).collect();
        assert!(!steps.is_empty(), "script needs at least one snapshot");
        Self {
            steps,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails with `ProviderError::Http(code)`.
    pub(crate) fn failing(code: u32) -> Self {
        Self {
            steps: vec![Step::Fail(code)],
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunStatusProvider for ScriptedProvider {
    async fn fetch(&self, _job_id: &JobId) -> Result<RunSnapshot, ProviderError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.steps[n.min(self.steps.len() - 1)] {
            Step::Snapshot(s) => Ok(s.clone()),
            Step::Fail(code) => Err(ProviderError::Http(*code)),
        }
    }
}
