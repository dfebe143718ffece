//! Randomized delays that keep many concurrent waiters from polling in lockstep.

use crate::config::DelayConfig;
use rand::Rng;
use std::time::Duration;

/// Uniform random duration in `[min, max]`. Bounds are swapped if given inverted.
pub fn bounded_random_delay<R: Rng>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    uniform(rng, lo, hi)
}

/// Uniform random duration in `[max(floor, base - width), base + width]`.
/// Never below `floor`, even when `floor` exceeds `base + width`.
pub fn jitter<R: Rng>(
    rng: &mut R,
    base: Duration,
    width: Duration,
    floor: Duration,
) -> Duration {
    let lower = base.saturating_sub(width).max(floor);
    let upper = base.saturating_add(width).max(lower);
    uniform(rng, lower, upper)
}

fn uniform<R: Rng>(rng: &mut R, lo: Duration, hi: Duration) -> Duration {
    if lo == hi {
        return lo;
    }
    Duration::from_secs_f64(rng.gen_range(lo.as_secs_f64()..=hi.as_secs_f64()))
}

/// Pre-poll delay: a bounded random delay when no base is given, otherwise the
/// base with jitter applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterDelay {
    pub min: Duration,
    pub max: Duration,
    pub width: Duration,
    pub floor: Duration,
}

impl Default for JitterDelay {
    fn default() -> Self {
        Self::from(&DelayConfig::default())
    }
}

impl From<&DelayConfig> for JitterDelay {
    fn from(cfg: &DelayConfig) -> Self {
        Self {
            min: Duration::from_secs_f64(cfg.min_secs),
            max: Duration::from_secs_f64(cfg.max_secs),
            width: Duration::from_secs_f64(cfg.jitter_width_secs),
            floor: Duration::from_secs_f64(cfg.jitter_floor_secs),
        }
    }
}

impl JitterDelay {
    pub fn delay(&self, base: Option<Duration>) -> Duration {
        self.delay_with(&mut rand::thread_rng(), base)
    }

    pub fn delay_with<R: Rng>(&self, rng: &mut R, base: Option<Duration>) -> Duration {
        match base {
            None => bounded_random_delay(rng, self.min, self.max),
            Some(base) => jitter(rng, base, self.width, self.floor),
        }
    }
}
