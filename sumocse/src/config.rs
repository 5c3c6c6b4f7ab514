//! Client configuration with builder pattern.

use std::env;
use std::time::Duration;

use crate::endpoint::resolve_endpoint;
use crate::error::{CseError, CseResult};

/// Environment variable holding the access ID.
pub const ENV_ACCESS_ID: &str = "SUMO_ACCESS_ID";
/// Environment variable holding the access key.
pub const ENV_ACCESS_KEY: &str = "SUMO_ACCESS_KEY";

/// Configuration for a [`CseClient`](crate::CseClient).
///
/// Built once, immutable afterwards. The endpoint is resolved to a canonical
/// base URL at build time, so a constructed config always carries a valid
/// endpoint.
#[derive(Clone)]
pub struct CseConfig {
    /// Access ID used for basic authentication.
    pub access_id: String,
    /// Access key used for basic authentication.
    pub access_key: String,
    /// Resolved API base URL. Never ends with a slash.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

// The access key never appears in debug output.
impl std::fmt::Debug for CseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CseConfig")
            .field("access_id", &self.access_id)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl CseConfig {
    /// Create a configuration builder.
    pub fn builder() -> CseConfigBuilder {
        CseConfigBuilder::default()
    }

    /// Build a configuration from `SUMO_ACCESS_ID` / `SUMO_ACCESS_KEY` and
    /// the default endpoint.
    pub fn from_env() -> CseResult<Self> {
        Self::builder().build()
    }
}

/// Builder for [`CseConfig`].
#[derive(Default)]
pub struct CseConfigBuilder {
    access_id: Option<String>,
    access_key: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CseConfigBuilder {
    /// Set the access ID (overrides `SUMO_ACCESS_ID`).
    pub fn access_id(mut self, id: impl Into<String>) -> Self {
        self.access_id = Some(id.into());
        self
    }

    /// Set the access key (overrides `SUMO_ACCESS_KEY`).
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Select the deployment: a region code, `prod`/`us1`, or a full URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Override the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// Credentials fall back to the environment; missing credentials fail
    /// with [`CseError::Authentication`]. The endpoint selector is resolved
    /// to a canonical base URL, failing with [`CseError::Configuration`] on
    /// malformed input.
    pub fn build(self) -> CseResult<CseConfig> {
        let access_id = self
            .access_id
            .or_else(|| env::var(ENV_ACCESS_ID).ok())
            .filter(|s| !s.is_empty());
        let access_key = self
            .access_key
            .or_else(|| env::var(ENV_ACCESS_KEY).ok())
            .filter(|s| !s.is_empty());

        let (Some(access_id), Some(access_key)) = (access_id, access_key) else {
            return Err(CseError::Authentication(format!(
                "missing credentials: provide an access ID and key or set \
                 {ENV_ACCESS_ID} and {ENV_ACCESS_KEY}"
            )));
        };

        let endpoint = resolve_endpoint(self.endpoint.as_deref())?;

        Ok(CseConfig {
            access_id,
            access_key,
            endpoint,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(10)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("sumocse/{}", env!("CARGO_PKG_VERSION"))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_with_credentials() {
        let config = CseConfig::builder()
            .access_id("id")
            .access_key("key")
            .endpoint("us2")
            .build()
            .unwrap();
        assert_eq!(config.endpoint, "https://api.us2.sumologic.com/api/sec");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_credentials_rejected() {
        // Empty strings are treated the same as absent credentials; the
        // environment is not guaranteed to fill them in during tests, so
        // only assert when it does not.
        if env::var(ENV_ACCESS_ID).is_err() && env::var(ENV_ACCESS_KEY).is_err() {
            let err = CseConfig::builder()
                .access_id("")
                .access_key("")
                .build()
                .unwrap_err();
            assert!(err.is_authentication());
        }
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = CseConfig::builder()
            .access_id("id")
            .access_key("key")
            .endpoint("https://api.example.com/")
            .build()
            .unwrap_err();
        assert!(matches!(err, CseError::Configuration(_)));
    }

    #[test]
    fn test_timeout_override() {
        let config = CseConfig::builder()
            .access_id("id")
            .access_key("key")
            .timeout(Duration::from_secs(60))
            .user_agent("custom-agent")
            .build()
            .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "custom-agent");
    }
}
