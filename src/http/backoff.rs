//! Deterministic exponential backoff
//!
//! `wait(n) = min(factor * base^n, cap)` with no jitter. With the defaults
//! the sequence is 20s, 40s, 80s, 160s, 320s, 640s and a page fetch gets at
//! most 7 attempts.

use std::time::Duration;

/// Default scale factor for the first wait
pub const DEFAULT_BACKOFF_FACTOR: Duration = Duration::from_secs(20);

/// Default growth base
pub const DEFAULT_BACKOFF_BASE: u32 = 2;

/// Default upper bound for a single wait
pub const DEFAULT_BACKOFF_CAP: Duration = Duration::from_secs(640);

/// Default attempts per page, first attempt included
pub const DEFAULT_MAX_ATTEMPTS: u32 = 7;

/// Wait schedule and attempt budget for one page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    factor: Duration,
    base: u32,
    cap: Duration,
    max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            factor: DEFAULT_BACKOFF_FACTOR,
            base: DEFAULT_BACKOFF_BASE,
            cap: DEFAULT_BACKOFF_CAP,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with base 2; `max_attempts` below 1 is raised to 1
    pub fn new(factor: Duration, cap: Duration, max_attempts: u32) -> Self {
        Self {
            factor,
            base: DEFAULT_BACKOFF_BASE,
            cap,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Total attempts allowed, first attempt included
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before retry `n` (0-indexed: `n = 0` follows the first failure)
    pub fn wait(&self, n: u32) -> Duration {
        let multiplier = self.base.saturating_pow(n);
        self.factor
            .checked_mul(multiplier)
            .map_or(self.cap, |d| d.min(self.cap))
    }

    /// The full wait sequence, one entry per allowed retry
    pub fn waits(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_attempts.saturating_sub(1)).map(|n| self.wait(n))
    }

    /// Whether another attempt is allowed after `attempts_made` attempts
    pub fn allows_another(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}
