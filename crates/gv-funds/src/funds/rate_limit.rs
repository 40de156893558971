//! Fixed-window submission limiter for quiz requests.
//!
//! The store is owned by whoever builds the router; nothing here is global. Callers pass
//! the current instant so window arithmetic stays testable.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
    /// Upper bound on distinct clients kept in memory.
    pub max_tracked_clients: usize,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::seconds(60),
            max_tracked_clients: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

#[derive(Debug)]
pub struct SubmissionRateLimiter {
    policy: RateLimitPolicy,
    windows: Mutex<HashMap<String, Window>>,
}

impl SubmissionRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request from `client` at `now` and decide whether it may proceed.
    pub fn check(&self, client: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let window_length = self.policy.window;

        windows.retain(|_, window| now - window.started_at < window_length);

        if !windows.contains_key(client) && windows.len() >= self.policy.max_tracked_clients {
            let oldest = windows
                .iter()
                .min_by_key(|(_, window)| window.started_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                windows.remove(&key);
            }
        }

        let window = windows.entry(client.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if window.count >= self.policy.max_requests {
            let reset_at = window.started_at + window_length;
            let wait = (reset_at - now).num_seconds().max(1);
            return RateLimitDecision::Limited {
                retry_after_secs: wait as u64,
            };
        }

        window.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.policy.max_requests - window.count,
        }
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for SubmissionRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitPolicy::default())
    }
}
