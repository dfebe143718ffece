//! Delay and backoff policy.
//!
//! [`JitterDelay`] decides how long to wait before a poll phase starts, and
//! [`BackoffSchedule`] how long to wait between status checks within a phase.
//! Both draw from a uniform distribution so that many waiters started at the same
//! moment spread their requests over time.

mod jitter;
mod schedule;

pub use jitter::{bounded_random_delay, jitter, JitterDelay};
pub use schedule::BackoffSchedule;
