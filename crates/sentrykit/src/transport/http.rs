//! Blocking HTTP transport backed by a ureq agent.

use crate::config::ClientConfig;
use crate::endpoint::Method;
use crate::error::{Error, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Upper bound on a response body (Sentry payloads are small JSON documents).
const MAX_BODY_SIZE: u64 = 10 * 1024 * 1024;

/// HTTP transport.
///
/// Every status code is returned as a response; only connection-level
/// failures and timeouts become errors.
pub struct HttpTransport {
    /// HTTP agent for requests.
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport whose calls are bounded by the configured timeout.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.request_timeout()))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = request.url.as_str();
        let result = match request.method {
            Method::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            Method::Delete => {
                let mut builder = self.agent.delete(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            Method::Post | Method::Put => {
                let mut builder = if request.method == Method::Post {
                    self.agent.post(url)
                } else {
                    self.agent.put(url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                let payload = request
                    .body
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                builder.send(payload)
            }
        };

        let mut response = result.map_err(|e| Error::from_ureq(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()
            .map_err(|e| Error::from_ureq(url, e))?;

        Ok(ApiResponse { status, body })
    }
}
