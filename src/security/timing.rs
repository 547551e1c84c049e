//! Timing attack protection utilities
//!
//! Credential comparison and the login/gate paths use these helpers so that
//! response timing does not reveal which check failed.

use std::time::{Duration, Instant};

/// Constant-time string comparison to prevent timing attacks
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    constant_time_eq_bytes(a.as_bytes(), b.as_bytes())
}

/// Constant-time byte array comparison
pub fn constant_time_eq_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.iter().zip(b.iter()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

/// Sleep until `min_duration` has elapsed since `start_time`
pub async fn add_auth_delay(start_time: Instant, min_duration: Duration) {
    let elapsed = start_time.elapsed();
    if elapsed < min_duration {
        tokio::time::sleep(min_duration - elapsed).await;
    }
}

/// Authentication timing helper
pub struct AuthTimer {
    start: Instant,
    min_duration: Duration,
}

impl AuthTimer {
    /// Start a timer that enforces `min_duration`
    pub fn new(min_duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            min_duration,
        }
    }

    /// Wait until minimum duration has elapsed
    pub async fn wait(self) {
        add_auth_delay(self.start, self.min_duration).await;
    }
}
