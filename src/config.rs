//! Process-wide configuration, fixed at startup and passed explicitly to the resolver.

use crate::error::{AppError, Result};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v3";
pub const DEFAULT_LOCATION_LIMIT: u32 = 200;
/// Timeout for the country and location listings.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the measurements query, which returns larger pages.
pub const DEFAULT_MEASUREMENTS_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings for the OpenAQ client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub api_key: Option<String>,
    /// Serve sample data only, even with a key configured.
    pub force_sample_data: bool,
    pub base_url: String,
    /// `limit` sent with `/locations` queries.
    pub location_limit: u32,
    /// Per-request timeout of `/countries` and `/locations`.
    pub lookup_timeout: Duration,
    /// Per-request timeout of `/measurements`.
    pub measurements_timeout: Duration,
}

impl UpstreamConfig {
    /// Upstream is consulted only with a non-empty key and sample data not forced.
    pub fn is_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty()) && !self.force_sample_data
    }

    /// Configuration that never touches the network.
    #[cfg(test)]
    pub fn sample_only() -> Self {
        Self {
            api_key: None,
            force_sample_data: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            location_limit: DEFAULT_LOCATION_LIMIT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            measurements_timeout: DEFAULT_MEASUREMENTS_TIMEOUT,
        }
    }

    /// An enabled configuration pointing at `base_url`.
    pub fn with_key(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            force_sample_data: false,
            base_url: base_url.into(),
            location_limit: DEFAULT_LOCATION_LIMIT,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            measurements_timeout: DEFAULT_MEASUREMENTS_TIMEOUT,
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.upstream.location_limit == 0 {
            return Err(AppError::Config(
                "location limit must be at least 1".to_string(),
            ));
        }
        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(AppError::Config(format!(
                "OpenAQ base URL must be http(s): {}",
                self.upstream.base_url
            )));
        }
        Ok(())
    }
}
