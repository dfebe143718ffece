//! Per-phase retry budget.

/// Counts unsuccessful status checks within one poll phase.
///
/// Owned by a single poll loop; a new phase starts from a fresh state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempts: u32,
    max_attempts: u32,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: 0,
            max_attempts,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a check that did not reach the target phase. Returns true when the
    /// budget is exhausted (`attempts >= max_attempts`).
    pub fn record_miss(&mut self) -> bool {
        self.attempts = self.attempts.saturating_add(1);
        self.is_exhausted()
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_exactly_at_max() {
        let mut s = RetryState::new(3);
        assert!(!s.record_miss());
        assert!(!s.record_miss());
        assert!(s.record_miss());
        assert_eq!(s.attempts(), 3);
    }

    #[test]
    fn attempts_never_decrease() {
        let mut s = RetryState::new(u32::MAX);
        let mut prev = s.attempts();
        for _ in 0..50 {
            s.record_miss();
            assert!(s.attempts() > prev);
            prev = s.attempts();
        }
    }

    #[test]
    fn budget_of_one_exhausts_on_first_miss() {
        let mut s = RetryState::new(1);
        assert!(!s.is_exhausted());
        assert!(s.record_miss());
    }
}
