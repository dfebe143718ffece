pub mod config;
pub mod logging;

pub mod backoff;
pub mod poll;
pub mod provider;
pub mod status;
pub mod waiter;

pub use poll::{PollError, PollLoop, RetryState, WaitError};
pub use provider::{CurlStatusProvider, ProviderError, RunStatusProvider};
pub use status::{FailureReason, JobId, RunSnapshot, StatusPhase, WaitOutcome};
pub use waiter::RunWaiter;
