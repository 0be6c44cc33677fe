//! Rate limiting middleware
//!
//! This module provides rate limiting functionality to prevent abuse of
//! write endpoints (chat posts, booking attempts).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::utils::errors::{CornerClubError, Result};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Time window duration
    pub window_duration: Duration,
    /// Burst allowance (extra requests allowed in short bursts)
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window_duration: Duration::from_secs(60),
            burst_allowance: 5,
        }
    }
}

/// Rate limit entry for tracking user requests
#[derive(Debug, Clone)]
struct RateLimitEntry {
    requests: Vec<Instant>,
    burst_used: u32,
    last_reset: Instant,
}

impl RateLimitEntry {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
            burst_used: 0,
            last_reset: Instant::now(),
        }
    }

    /// Clean up old requests outside the window
    fn cleanup(&mut self, window_duration: Duration) {
        let cutoff = Instant::now() - window_duration;
        self.requests.retain(|&time| time > cutoff);

        if self.last_reset.elapsed() > window_duration {
            self.burst_used = 0;
            self.last_reset = Instant::now();
        }
    }

    /// Check if request is allowed
    fn is_allowed(&mut self, config: &RateLimitConfig) -> bool {
        self.cleanup(config.window_duration);

        let current_requests = self.requests.len() as u32;

        if current_requests < config.max_requests {
            return true;
        }

        if self.burst_used < config.burst_allowance {
            self.burst_used += 1;
            return true;
        }

        false
    }

    /// Record a new request
    fn record_request(&mut self) {
        self.requests.push(Instant::now());
    }
}

/// Rate limiting middleware keyed by user id
#[derive(Clone)]
pub struct RateLimitMiddleware {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    admin_exempt: bool,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: RateLimitConfig, admin_exempt: bool) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
            admin_exempt,
        }
    }

    /// Check if a user is rate limited
    pub fn check_rate_limit(&self, user_id: &str, is_admin: bool) -> Result<()> {
        if self.admin_exempt && is_admin {
            debug!(user_id = user_id, "Admin user exempt from rate limiting");
            return Ok(());
        }

        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(user_id.to_string())
            .or_insert_with(RateLimitEntry::new);

        if entry.is_allowed(&self.config) {
            entry.record_request();
            Ok(())
        } else {
            warn!(user_id = user_id, "Rate limit exceeded");
            Err(CornerClubError::RateLimitExceeded)
        }
    }

    /// Cleanup old entries (should be called periodically)
    pub fn cleanup_old_entries(&self) {
        let mut entries = self.entries.lock().unwrap();
        let cutoff = Instant::now() - self.config.window_duration * 2;

        entries.retain(|_, entry| entry.requests.iter().any(|&time| time > cutoff));

        debug!(remaining_entries = entries.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimitMiddleware {
    fn default() -> Self {
        Self::new(RateLimitConfig::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_basic() {
        let config = RateLimitConfig {
            max_requests: 3,
            window_duration: Duration::from_secs(60),
            burst_allowance: 1,
        };

        let middleware = RateLimitMiddleware::new(config, false);

        // First 3 requests should pass
        assert!(middleware.check_rate_limit("u1", false).is_ok());
        assert!(middleware.check_rate_limit("u1", false).is_ok());
        assert!(middleware.check_rate_limit("u1", false).is_ok());

        // 4th request should use burst allowance
        assert!(middleware.check_rate_limit("u1", false).is_ok());

        // 5th request should fail
        assert!(middleware.check_rate_limit("u1", false).is_err());
    }

    #[test]
    fn test_limits_are_per_user() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };

        let middleware = RateLimitMiddleware::new(config, false);

        assert!(middleware.check_rate_limit("u1", false).is_ok());
        assert!(middleware.check_rate_limit("u1", false).is_err());

        // A different user is unaffected
        assert!(middleware.check_rate_limit("u2", false).is_ok());
    }

    #[test]
    fn test_admin_exemption() {
        let config = RateLimitConfig {
            max_requests: 1,
            window_duration: Duration::from_secs(60),
            burst_allowance: 0,
        };

        let middleware = RateLimitMiddleware::new(config, true);

        assert!(middleware.check_rate_limit("admin", true).is_ok());
        assert!(middleware.check_rate_limit("admin", true).is_ok());
        assert!(middleware.check_rate_limit("admin", true).is_ok());

        assert!(middleware.check_rate_limit("u1", false).is_ok());
        assert!(middleware.check_rate_limit("u1", false).is_err());
    }

    #[test]
    fn test_cleanup() {
        let middleware = RateLimitMiddleware::default();

        middleware.check_rate_limit("u1", false).unwrap();
        middleware.check_rate_limit("u1", false).unwrap();

        // Cleanup should not remove recent entries
        middleware.cleanup_old_entries();
        let entries = middleware.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
    }
}
