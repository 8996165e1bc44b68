//! Reconcilers: converge one remote resource to its declared state.
//!
//! Two strategies are used:
//!
//! - **Probe then write** (organization, team, project): a retrieve call
//!   decides between update (found) and create (not found). Any other
//!   probe status is terminal and returned as-is.
//! - **Caller intent** (client key, service hook): the API offers no
//!   retrieve for these kinds, so the caller says whether the resource
//!   exists by supplying its identifier. See [`Intent`].
//!
//! Target state `absent` always issues the delete directly, without a probe.
//! Deleting something that is already gone is reported as a failure.

mod client_key;
mod organization;
mod project;
mod service_hook;
mod team;

pub use client_key::ClientKeySpec;
pub use organization::OrganizationSpec;
pub use project::ProjectSpec;
pub use service_hook::ServiceHookSpec;
pub use team::TeamSpec;

use std::fmt;

use crate::client::ResourceClient;
use crate::endpoint::ResourceKind;
use crate::error::{Error, Result};
use crate::types::{OperationResult, TargetState};

/// A declared resource that can be converged against the remote API.
pub trait Reconcile: fmt::Debug {
    /// Resource kind.
    fn kind(&self) -> ResourceKind;

    /// Identity path of the resource as declared (e.g. `sentry/backend-team`).
    fn id(&self) -> String;

    /// Declared target state.
    fn target(&self) -> TargetState;

    /// Human-readable description.
    fn description(&self) -> String {
        format!("{} {} ({})", self.kind(), self.id(), self.target())
    }

    /// Issue the calls needed to reach the target state.
    ///
    /// At most two calls are made: an optional probe and one mutation.
    fn reconcile(&self, client: &ResourceClient) -> Result<OperationResult>;
}

/// Outcome of an existence probe.
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    /// The retrieve call returned 200.
    Found(OperationResult),
    /// The retrieve call returned 404.
    NotFound(OperationResult),
    /// Any other status; carries the failed retrieve result.
    Failed(OperationResult),
}

impl From<OperationResult> for Probe {
    fn from(result: OperationResult) -> Self {
        match result.status_code {
            200 => Self::Found(result),
            404 => Self::NotFound(result),
            _ => Self::Failed(result),
        }
    }
}

/// Whether the caller is declaring a new resource or one it already knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// No identifier: create a new resource.
    Create,
    /// Identifier of an existing resource.
    Update(String),
}

impl Intent {
    /// Build an intent from an optional identifier.
    ///
    /// A missing or empty identifier means create. Anything else must be a
    /// single URL path segment.
    pub fn from_identifier(id: Option<&str>, field: &'static str) -> Result<Self> {
        match id {
            None | Some("") => Ok(Self::Create),
            Some(id) if is_path_segment(id) => Ok(Self::Update(id.to_string())),
            Some(_) => Err(Error::InvalidIdentifier { field }),
        }
    }
}

/// Characters that would make an identifier address a different endpoint.
const RESERVED: &[char] = &['/', '?', '#', '%', '\\'];

fn is_path_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(RESERVED)
        && !value.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Resolve a required identity component.
pub(crate) fn require<'a>(
    kind: ResourceKind,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str> {
    match value {
        None => Err(Error::MissingIdentifier { kind, field }),
        Some(value) if is_path_segment(value) => Ok(value),
        Some(_) => Err(Error::InvalidIdentifier { field }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::client::ResourceClient;
    use crate::config::ClientConfig;
    use crate::transport::MockTransport;

    pub fn client_with(mock: &MockTransport) -> ResourceClient {
        let config = ClientConfig::new("http://localhost:9000", "token");
        ResourceClient::with_transport(config, Box::new(mock.clone()))
    }
}
