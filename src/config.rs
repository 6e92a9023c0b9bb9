//! Client configuration for talking to the conversion service.
//!
//! All transport behaviour is controlled through [`ClientConfig`], built via
//! its [`ClientConfigBuilder`]. Credentials are deliberately not part of the
//! config: they belong to each [`crate::model::ConversionRequest`].

use crate::error::MsWordToImageError;
use serde::{Deserialize, Serialize};

/// Public conversion endpoint of msword2image.com.
pub const DEFAULT_ENDPOINT: &str = "http://msword2image.com/convert";

/// Configuration shared by every conversion.
///
/// # Example
/// ```rust
/// use msword2image::{ClientConfig, StatusPolicy};
///
/// let config = ClientConfig::builder()
///     .timeout_secs(30)
///     .url_fetch_status(StatusPolicy::Strict)
///     .build()
///     .unwrap();
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Conversion endpoint. Default: [`DEFAULT_ENDPOINT`].
    ///
    /// Must be an absolute `http` or `https` URL. Query parameters are
    /// appended to whatever the endpoint already carries.
    pub endpoint: String,

    /// Per-request timeout in seconds, covering connect, upload and the full
    /// response body. Default: 120.
    pub timeout_secs: u64,

    /// How URL-sourced conversions treat an error status. Default:
    /// [`StatusPolicy::Strict`].
    pub url_fetch_status: StatusPolicy,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,

    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY` from the environment.
    /// Default: true.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            url_fetch_status: StatusPolicy::default(),
            user_agent: concat!("msword2image-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn url_fetch_status(mut self, policy: StatusPolicy) -> Self {
        self.config.url_fetch_status = policy;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.config.system_proxy = enabled;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, MsWordToImageError> {
        let c = &self.config;
        let parsed = reqwest::Url::parse(&c.endpoint).map_err(|e| {
            MsWordToImageError::InvalidConfiguration(format!(
                "endpoint '{}' is not a valid URL: {}",
                c.endpoint, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MsWordToImageError::InvalidConfiguration(format!(
                "endpoint must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if c.timeout_secs == 0 {
            return Err(MsWordToImageError::InvalidConfiguration(
                "timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

/// What a URL-sourced conversion does when the service answers with a
/// non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    /// Fail with [`MsWordToImageError::TransportFailure`] and leave the
    /// destination untouched. (default)
    #[default]
    Strict,
    /// Write whatever body the service returned and report success.
    ///
    /// Matches the historical behaviour of the msword2image client
    /// libraries, where the download path never inspected the status.
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ClientConfig::default();
        assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(c.timeout_secs, 120);
        assert_eq!(c.url_fetch_status, StatusPolicy::Strict);
        assert!(c.user_agent.starts_with("msword2image-rs/"));
        assert!(c.system_proxy);
    }

    #[test]
    fn builder_overrides() {
        let c = ClientConfig::builder()
            .endpoint("https://example.test/convert")
            .timeout_secs(5)
            .url_fetch_status(StatusPolicy::Ignore)
            .user_agent("test-agent")
            .system_proxy(false)
            .build()
            .unwrap();
        assert_eq!(c.endpoint, "https://example.test/convert");
        assert_eq!(c.timeout_secs, 5);
        assert_eq!(c.url_fetch_status, StatusPolicy::Ignore);
        assert_eq!(c.user_agent, "test-agent");
        assert!(!c.system_proxy);
    }

    #[test]
    fn rejects_relative_endpoint() {
        let err = ClientConfig::builder().endpoint("/convert").build().unwrap_err();
        assert!(matches!(err, MsWordToImageError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = ClientConfig::builder()
            .endpoint("ftp://msword2image.com/convert")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::builder().timeout_secs(0).build().unwrap_err();
        assert!(matches!(err, MsWordToImageError::InvalidConfiguration(_)));
    }

    #[test]
    fn status_policy_serde_names() {
        assert_eq!(serde_json::to_string(&StatusPolicy::Ignore).unwrap(), "\"ignore\"");
        let p: StatusPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(p, StatusPolicy::Strict);
    }
}
