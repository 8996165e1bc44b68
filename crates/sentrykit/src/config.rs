//! Client configuration shared by every call of one invocation.

use std::fmt;
use std::time::Duration;

/// Default bound on a single network call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable connection settings: where to send requests and how to authenticate.
///
/// # Example
///
/// ```
/// use sentrykit::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://localhost:9000/", "secret")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.host(), "http://localhost:9000");
/// assert_eq!(config.url("/api/0/"), "http://localhost:9000/api/0/");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    token: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for `host` authenticated with a bearer `token`.
    ///
    /// Trailing slashes on the host are dropped so paths can be appended as-is.
    #[must_use]
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-call timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the Sentry instance.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Per-call timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// Join an API path onto the host.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
