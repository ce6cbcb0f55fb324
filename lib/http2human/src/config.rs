//! Client and dispatch configuration types.

use std::time::Duration;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Transport-level ceiling for a whole request.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the transport-level request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

/// Configuration for the [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchConfig {
    /// Deadline applied when a dispatch does not pass its own.
    ///
    /// `None` or a zero duration disables the timer.
    pub default_ttl: Option<Duration>,
}

impl DispatchConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> DispatchConfigBuilder {
        DispatchConfigBuilder::default()
    }

    /// Effective deadline for one dispatch.
    ///
    /// An explicit ttl wins over the default; zero means "no timer".
    #[must_use]
    pub fn effective_ttl(&self, ttl: Option<Duration>) -> Option<Duration> {
        ttl.or(self.default_ttl).filter(|ttl| !ttl.is_zero())
    }
}

/// Builder for [`DispatchConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchConfigBuilder {
    default_ttl: Option<Duration>,
}

impl DispatchConfigBuilder {
    /// Set the default deadline.
    #[must_use]
    pub const fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub const fn build(self) -> DispatchConfig {
        DispatchConfig {
            default_ttl: self.default_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(90));
    }

    #[test]
    fn dispatch_ttl_resolution() {
        let none = DispatchConfig::default();
        assert_eq!(none.effective_ttl(None), None);
        assert_eq!(
            none.effective_ttl(Some(Duration::from_millis(100))),
            Some(Duration::from_millis(100))
        );
        assert_eq!(none.effective_ttl(Some(Duration::ZERO)), None);

        let config = DispatchConfig::builder()
            .default_ttl(Duration::from_secs(5))
            .build();
        assert_eq!(config.effective_ttl(None), Some(Duration::from_secs(5)));
        assert_eq!(
            config.effective_ttl(Some(Duration::from_millis(100))),
            Some(Duration::from_millis(100))
        );
        assert_eq!(config.effective_ttl(Some(Duration::ZERO)), None);
    }
}
