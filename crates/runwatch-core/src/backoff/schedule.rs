//! Capped quadratic backoff between status checks.

use crate::config::BackoffConfig;
use rand::Rng;
use std::time::Duration;

/// Delay before the next status check: `uniform(raw / 3, raw)` where
/// `raw = min(max_delay, 1 + (attempt * growth)^2)` seconds.
///
/// With the defaults this reaches the 10 minute cap around attempt 41, so a job
/// that runs for hours is checked every 3 to 10 minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffSchedule {
    pub growth: f64,
    pub max_delay: Duration,
}

impl Default for BackoffSchedule {
    fn default() -> Self {
        Self::from(&BackoffConfig::default())
    }
}

impl From<&BackoffConfig> for BackoffSchedule {
    fn from(cfg: &BackoffConfig) -> Self {
        Self {
            growth: cfg.growth,
            max_delay: Duration::from_secs_f64(cfg.max_delay_secs),
        }
    }
}

impl BackoffSchedule {
    /// Upper bound of the delay for `attempt` (1-based retry count).
    pub fn raw_delay(&self, attempt: u32) -> Duration {
        let x = f64::from(attempt) * self.growth;
        let raw = 1.0 + x * x;
        let cap = self.max_delay.as_secs_f64();
        Duration::from_secs_f64(raw.min(cap))
    }

    pub fn next_delay(&self, attempt: u32) -> Duration {
        self.next_delay_with(&mut rand::thread_rng(), attempt)
    }

    pub fn next_delay_with<R: Rng>(&self, rng: &mut R, attempt: u32) -> Duration {
        let raw = self.raw_delay(attempt).as_secs_f64();
        if raw <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rng.gen_range(raw / 3.0..=raw))
    }
}
