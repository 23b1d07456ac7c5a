/*
[INPUT]:  Retry policy (attempt budget, backoff bounds, jitter)
[OUTPUT]: Sequence of delays between attempts
[POS]:    HTTP layer - retry scheduling for transient failures
[UPDATE]: When changing backoff strategy or retry defaults
*/

use std::time::Duration;

use rand::Rng;

/// Retry policy for transient HTTP failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
    /// Fraction of the base delay applied as random jitter (0.2 = ±20%)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(10),
            multiplier: 2.0,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    /// Policy that never retries
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Exponential backoff calculator with jitter
#[derive(Debug)]
pub struct ExponentialBackoff {
    attempt: u32,
    max_retries: u32,
    initial_ms: f64,
    max_ms: f64,
    multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            attempt: 0,
            max_retries: config.max_retries,
            initial_ms: config.initial_backoff.as_millis() as f64,
            max_ms: config.max_backoff.as_millis() as f64,
            multiplier: config.multiplier.max(1.0),
            jitter_factor: config.jitter_factor.clamp(0.0, 1.0),
        }
    }

    /// Number of retries handed out so far
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Next delay, or `None` once the retry budget is spent
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.attempt >= self.max_retries {
            return None;
        }

        let base = self.initial_ms * self.multiplier.powi(self.attempt as i32);
        let jitter = if self.jitter_factor > 0.0 {
            rand::thread_rng().gen_range(-self.jitter_factor..=self.jitter_factor)
        } else {
            0.0
        };
        let delay = (base * (1.0 + jitter)).clamp(0.0, self.max_ms);

        self.attempt += 1;
        Some(Duration::from_millis(delay as u64))
    }
}
