//! Configuration types for connection resolution

use std::time::Duration;

/// Configuration for the [`Resolver`](crate::Resolver)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Bound on a single probe attempt
    /// Default: 5 seconds
    pub probe_timeout: Duration,

    /// Bound on the whole fan-out/join cycle; probes still running when it
    /// expires are abandoned and reported as failures
    /// Default: 15 seconds
    pub overall_deadline: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(5),
            overall_deadline: Duration::from_secs(15),
        }
    }
}

impl ResolverConfig {
    /// Create a new ResolverConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ResolverConfig for callers that only expect LAN endpoints
    pub fn fast() -> Self {
        Self {
            probe_timeout: Duration::from_secs(2),
            overall_deadline: Duration::from_secs(5),
        }
    }

    /// Override the per-probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Override the overall resolution deadline
    pub fn with_overall_deadline(mut self, deadline: Duration) -> Self {
        self.overall_deadline = deadline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.overall_deadline, Duration::from_secs(15));
    }

    #[test]
    fn test_presets_keep_deadline_above_probe_timeout() {
        for config in [ResolverConfig::default(), ResolverConfig::fast()] {
            assert!(config.overall_deadline > config.probe_timeout);
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = ResolverConfig::new()
            .with_probe_timeout(Duration::from_millis(250))
            .with_overall_deadline(Duration::from_secs(1));
        assert_eq!(config.probe_timeout, Duration::from_millis(250));
        assert_eq!(config.overall_deadline, Duration::from_secs(1));
    }
}
