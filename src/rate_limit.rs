//! Fixed-window rate limiting keyed by caller identity.
//!
//! An inspection run fires a burst of concurrent network probes, so run
//! initiation is gated: one run per caller per window. Windows are
//! tracked against a monotonic clock; expired windows are pruned
//! opportunistically on every check so the map stays bounded by the set
//! of callers seen within one window.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;

use crate::config::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW};

/// Outcome of one admission check.
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    /// Whether the run may proceed.
    pub allowed: bool,
    /// Runs left in the current window, after this one.
    pub remaining: u32,
    /// When the current window expires and the caller may try again.
    pub reset_at: DateTime<Utc>,
}

struct WindowEntry {
    count: u32,
    started_at: Instant,
}

/// Per-caller fixed-window request counter.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, WindowEntry>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window` per caller.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        RateLimiter {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    /// Records an admission attempt for `identifier` and decides it.
    ///
    /// A caller with no live window starts a fresh one and is admitted;
    /// one whose window is exhausted is refused until the window expires.
    pub async fn check(&self, identifier: &str) -> RateLimitDecision {
        let mut windows = self.windows.lock().await;

        let window = self.window;
        windows.retain(|_, entry| entry.started_at.elapsed() < window);

        match windows.get_mut(identifier) {
            Some(entry) if entry.count >= self.max_requests => {
                let remaining_window = window.saturating_sub(entry.started_at.elapsed());
                log::debug!("Rate limit hit for '{identifier}', resets in {remaining_window:?}");
                RateLimitDecision {
                    allowed: false,
                    remaining: 0,
                    reset_at: reset_time(remaining_window),
                }
            }
            Some(entry) => {
                entry.count += 1;
                let remaining_window = window.saturating_sub(entry.started_at.elapsed());
                RateLimitDecision {
                    allowed: true,
                    remaining: self.max_requests - entry.count,
                    reset_at: reset_time(remaining_window),
                }
            }
            None => {
                windows.insert(
                    identifier.to_string(),
                    WindowEntry {
                        count: 1,
                        started_at: Instant::now(),
                    },
                );
                RateLimitDecision {
                    allowed: true,
                    remaining: self.max_requests - 1,
                    reset_at: reset_time(window),
                }
            }
        }
    }

    /// Number of callers with a live window, for diagnostics.
    pub async fn tracked_callers(&self) -> usize {
        self.windows.lock().await.len()
    }
}

impl Default for RateLimiter {
    /// The production configuration: one run per caller per window.
    fn default() -> Self {
        RateLimiter::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_REQUESTS)
    }
}

fn reset_time(after: Duration) -> DateTime<Utc> {
    Utc::now() + TimeDelta::from_std(after).unwrap_or_else(|_| TimeDelta::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn first_request_is_allowed() {
        let limiter = RateLimiter::default();
        let decision = limiter.check("alice").await;
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert!(decision.reset_at > Utc::now());
    }

    #[tokio::test]
    async fn second_request_in_window_is_refused() {
        let limiter = RateLimiter::default();
        assert!(limiter.check("alice").await.allowed);

        let decision = limiter.check("alice").await;
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
        assert!(decision.reset_at > Utc::now());
    }

    #[tokio::test]
    async fn callers_are_tracked_independently() {
        let limiter = RateLimiter::default();
        assert!(limiter.check("alice").await.allowed);
        assert!(limiter.check("bob").await.allowed);
        assert!(!limiter.check("alice").await.allowed);
    }

    #[tokio::test]
    async fn expired_window_admits_again() {
        let limiter = RateLimiter::new(Duration::from_millis(50), 1);
        assert!(limiter.check("alice").await.allowed);
        assert!(!limiter.check("alice").await.allowed);

        sleep(Duration::from_millis(80)).await;
        assert!(limiter.check("alice").await.allowed);
    }

    #[tokio::test]
    async fn expired_windows_are_pruned() {
        let limiter = RateLimiter::new(Duration::from_millis(50), 1);
        limiter.check("alice").await;
        limiter.check("bob").await;
        assert_eq!(limiter.tracked_callers().await, 2);

        sleep(Duration::from_millis(80)).await;
        limiter.check("carol").await;
        assert_eq!(limiter.tracked_callers().await, 1);
    }

    #[tokio::test]
    async fn counts_within_a_larger_budget() {
        let limiter = RateLimiter::new(Duration::from_secs(30), 3);
        assert_eq!(limiter.check("alice").await.remaining, 2);
        assert_eq!(limiter.check("alice").await.remaining, 1);
        assert_eq!(limiter.check("alice").await.remaining, 0);
        assert!(!limiter.check("alice").await.allowed);
    }
}
