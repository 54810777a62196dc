//! # Commit Wait Policy
//!
//! How long a caller waits between submitting a transaction and expecting it
//! in the world state.
//!
//! | Policy | Behavior |
//! |--------|----------|
//! | `Fixed(d)` | Sleep `d` once, then query |
//! | `Poll { .. }` | Query up to `max_attempts` times with growing delays |
//!
//! The default is a fixed 200 ms, which matches a node configured with a
//! 100 ms block time. Use `fixed_for_block_time` for other nodes.

use std::time::Duration;

/// Default fixed wait.
pub const DEFAULT_COMMIT_WAIT: Duration = Duration::from_millis(200);

/// Upper bound for a single polling delay.
pub const MAX_POLL_DELAY: Duration = Duration::from_secs(5);

/// Strategy for waiting on commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitWait {
    /// Sleep once for the given duration.
    Fixed(Duration),
    /// Re-check until found or attempts run out.
    Poll {
        /// Delay before the first check.
        interval: Duration,
        /// Number of checks, at least one.
        max_attempts: u32,
        /// Multiplier applied to the delay after each miss. 1 keeps it constant.
        backoff_factor: u32,
    },
}

impl Default for CommitWait {
    fn default() -> Self {
        CommitWait::Fixed(DEFAULT_COMMIT_WAIT)
    }
}

impl CommitWait {
    /// Fixed wait of two block times.
    pub fn fixed_for_block_time(block_time: Duration) -> Self {
        CommitWait::Fixed(block_time.saturating_mul(2))
    }

    /// Polling with a constant interval.
    pub fn poll(interval: Duration, max_attempts: u32) -> Self {
        CommitWait::Poll {
            interval,
            max_attempts,
            backoff_factor: 1,
        }
    }

    /// Number of checks this policy performs.
    pub fn attempts(&self) -> u32 {
        match self {
            CommitWait::Fixed(_) => 1,
            CommitWait::Poll { max_attempts, .. } => (*max_attempts).max(1),
        }
    }

    /// Delay before check number `attempt` (zero-based), capped at `MAX_POLL_DELAY`
    /// for polling.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match *self {
            CommitWait::Fixed(delay) => delay,
            CommitWait::Poll {
                interval,
                backoff_factor,
                ..
            } => {
                let factor = backoff_factor.max(1).saturating_pow(attempt);
                interval.saturating_mul(factor).min(MAX_POLL_DELAY)
            }
        }
    }

    /// Longest total time the policy can wait.
    pub fn total_budget(&self) -> Duration {
        (0..self.attempts())
            .map(|attempt| self.delay_for_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}
