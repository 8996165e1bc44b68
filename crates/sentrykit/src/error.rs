//! Error types for sentrykit operations.
//!
//! HTTP-level failures (an unexpected status code) are not errors: they are
//! reported through [`OperationResult`](crate::OperationResult) with
//! `failed = true`. The [`Error`] type covers everything that prevents a
//! request from completing or from being built in the first place.

use std::fmt;

use crate::endpoint::{Operation, ResourceKind};

/// Result type alias for sentrykit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of sentrykit errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The request never produced an HTTP response.
    Transport,
    /// The bounded per-call timeout elapsed.
    Timeout,
    /// The server answered with a body that is not JSON.
    Format,
    /// The caller's desired state cannot be turned into a request.
    Input,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Transport => "Network connectivity issue",
            Self::Timeout => "Request timed out",
            Self::Format => "Invalid response format",
            Self::Input => "Invalid desired state",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Transport => "Check the Sentry host URL and that the server is reachable",
            Self::Timeout => "The server is slow or unreachable; raise --timeout or try again",
            Self::Format => "The host may not be a Sentry API endpoint",
            Self::Input => "Fix the resource declaration and run again",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while talking to the Sentry API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connection, DNS, TLS or I/O failure.
    #[error("request to {url} failed: {message}")]
    Transport {
        /// Target URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// Target URL.
        url: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("invalid JSON response from {url} (HTTP {status}): {message}")]
    InvalidResponse {
        /// Target URL.
        url: String,
        /// HTTP status of the response.
        status: u16,
        /// Parser error message.
        message: String,
    },

    /// An identity component required by the operation was not supplied.
    #[error("{kind} requires `{field}` for this operation")]
    MissingIdentifier {
        /// Resource kind.
        kind: ResourceKind,
        /// Missing field name.
        field: &'static str,
    },

    /// An identifier is empty or is not a single URL path segment.
    #[error("`{field}` must be a non-empty path segment without `/`, `?`, `#` or `%`")]
    InvalidIdentifier {
        /// Offending field name.
        field: &'static str,
    },

    /// The resource kind does not support the requested operation.
    #[error("{kind} does not support {operation}")]
    Unsupported {
        /// Resource kind.
        kind: ResourceKind,
        /// Requested operation.
        operation: Operation,
    },
}

impl Error {
    /// Create a transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Map a ureq error for the given URL.
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => Self::Timeout {
                url: url.to_string(),
            },
            other => Self::transport(url, other.to_string()),
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport { .. } => ErrorCategory::Transport,
            Error::Timeout { .. } => ErrorCategory::Timeout,
            Error::InvalidResponse { .. } => ErrorCategory::Format,
            Error::MissingIdentifier { .. }
            | Error::InvalidIdentifier { .. }
            | Error::Unsupported { .. } => ErrorCategory::Input,
        }
    }

    /// Whether the error came from the network rather than from caller input.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Transport | ErrorCategory::Timeout | ErrorCategory::Format
        )
    }
}
