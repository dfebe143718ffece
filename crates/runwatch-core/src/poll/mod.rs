//! Status polling with a bounded retry budget.
//!
//! A [`PollLoop`] runs one phase: it keeps fetching until the job's phase is in
//! the caller's target set, or [`RetryState`] reports the budget spent. Sleeps
//! between checks follow [`BackoffSchedule`](crate::backoff::BackoffSchedule) and
//! can be cut short with a `CancellationToken`.

mod error;
mod run;
mod state;

pub use error::{PollError, WaitError};
pub use run::{sleep_or_cancel, PollLoop};
pub use state::RetryState;
