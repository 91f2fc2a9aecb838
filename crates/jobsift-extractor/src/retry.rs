//! Retry policy for extraction calls
//!
//! Delay before retry `n` (1-based) is `min(base * 2^(n-1), max)`.

use std::time::Duration;

/// Exponential backoff with a cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound for any delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Validate the policy
    ///
    /// Every retry must wait strictly longer than the one before it.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".to_string());
        }
        if self.base_delay > self.max_delay {
            return Err("base delay cannot exceed max delay".to_string());
        }
        let delays: Vec<Duration> = (1..self.max_attempts).map(|n| self.delay_for(n)).collect();
        if delays.windows(2).any(|w| w[0] >= w[1]) {
            return Err(
                "retry delays must grow between attempts; raise max delay or lower max attempts"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    /// 3 attempts, 4 s then 8 s
    fn default() -> Self {
        Self::new(3, Duration::from_secs(4), Duration::from_secs(10))
    }
}
