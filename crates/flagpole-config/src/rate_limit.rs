//! Per-IP rate limiting configuration.
//!
//! - `RATE_LIMIT_MAX`: requests allowed per window (default 1000)
//! - `RATE_LIMIT_WINDOW_SECS`: window length in seconds (default 3600)
//! - `TRUST_PROXY`: key clients on `X-Forwarded-For`/`X-Real-IP` instead of the peer
//!   address (default false; enable only behind a proxy that overwrites them)
//!
//! The window is expressed as a GCRA quota: the whole allowance may be spent at once
//! and it is replenished evenly across the window.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max: u32,
    pub window_secs: u64,
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max: 1000,
            window_secs: 3600,
            trust_proxy: false,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max: std::env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max),
            window_secs: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_secs),
            trust_proxy: std::env::var("TRUST_PROXY")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.trust_proxy),
        }
    }

    /// Builds the governor quota for a single client.
    #[must_use]
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max).unwrap_or(NonZeroU32::MIN);
        let period = Duration::from_secs(self.window_secs) / burst.get();

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max, 1000);
        assert_eq!(config.window_secs, 3600);
        assert!(!config.trust_proxy);
    }

    #[test]
    fn test_quota_spreads_window_over_allowance() {
        let config = RateLimitConfig {
            max: 10,
            window_secs: 60,
            ..RateLimitConfig::default()
        };
        let quota = config.quota();
        assert_eq!(quota.burst_size().get(), 10);
        assert_eq!(quota.replenish_interval(), Duration::from_secs(6));
    }

    #[test]
    fn test_zero_max_still_builds_a_quota() {
        let config = RateLimitConfig {
            max: 0,
            window_secs: 0,
            ..RateLimitConfig::default()
        };
        assert_eq!(config.quota().burst_size().get(), 1);
    }
}
