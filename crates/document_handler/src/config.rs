//! Configuration settings for the HSX runtime.
//!
//! Configuration can be loaded from environment variables or constructed
//! programmatically.

use std::env;

/// Runtime configuration for a single HSX document handler.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Selector used when a media insertion target does not resolve
    pub default_insertion_point: String,
    /// Upper bound on subscriptions per reactive cell. Repeated binds of
    /// the same scope accumulate subscriptions; the cap keeps that growth
    /// finite. Further bind attempts are reported and skipped.
    pub max_subscribers: usize,
}

impl RuntimeConfig {
    /// Construct a new `RuntimeConfig` with explicit values.
    ///
    /// `max_subscribers` is clamped to at least 1 so binding can never be
    /// disabled outright.
    #[must_use]
    pub fn new(default_insertion_point: &str, max_subscribers: usize) -> Self {
        Self {
            default_insertion_point: default_insertion_point.to_owned(),
            max_subscribers: max_subscribers.max(1),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// * `HSX_DEFAULT_TARGET` - fallback insertion selector (default `body`)
    /// * `HSX_MAX_SUBSCRIBERS` - per-cell subscription cap (default 1024)
    #[must_use]
    pub fn from_env() -> Self {
        let default_insertion_point =
            env::var("HSX_DEFAULT_TARGET").unwrap_or_else(|_| String::from("body"));
        let max_subscribers = env::var("HSX_MAX_SUBSCRIBERS")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(1024);
        Self::new(&default_insertion_point, max_subscribers)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new("body", 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = RuntimeConfig::default();
        assert_eq!(config.default_insertion_point, "body");
        assert_eq!(config.max_subscribers, 1024);
    }

    #[test]
    fn max_subscribers_is_clamped() {
        assert_eq!(RuntimeConfig::new("main", 0).max_subscribers, 1);
    }
}
