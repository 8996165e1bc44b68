//! Resource client: one method per API row, one HTTP call per method.

use log::debug;
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, Operation};
use crate::error::{Error, Result};
use crate::transport::http::HttpTransport;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::OperationResult;

/// Fields sent when updating a project.
///
/// Unset fields are sent as `null`; the remote API decides what that means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectUpdate<'a> {
    /// New display name.
    pub name: Option<&'a str>,
    /// New slug.
    pub slug: Option<&'a str>,
    /// Owning team slug.
    pub team_slug: Option<&'a str>,
    /// Platform identifier (e.g. `python`).
    pub platform: Option<&'a str>,
    /// Bookmark flag.
    pub is_bookmarked: Option<bool>,
}

/// Stateless client for the Sentry REST API.
///
/// The configuration is fixed at construction; every method builds its
/// request from it and performs exactly one call through the transport.
///
/// # Example
///
/// ```
/// use sentrykit::{ClientConfig, ResourceClient};
/// use sentrykit::transport::MockTransport;
///
/// let mock = MockTransport::new();
/// mock.push_json(201, serde_json::json!({"slug": "backend-team"}));
///
/// let config = ClientConfig::new("http://localhost:9000", "token");
/// let client = ResourceClient::with_transport(config, Box::new(mock.clone()));
///
/// let result = client
///     .create_team("sentry", Some("Backend Team"), Some("backend-team"))
///     .unwrap();
/// assert!(result.changed);
/// assert_eq!(result.status_code, 201);
/// ```
pub struct ResourceClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl ResourceClient {
    /// Create a client that talks HTTP to the configured host.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(&config);
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    /// Create a client with a custom transport (useful for testing).
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Configuration used for every call.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project owned by `team`.
    pub fn create_project(
        &self,
        org: &str,
        team: &str,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name, "slug": slug });
        self.call(Endpoint::CreateProject { org, team }, Some(body))
    }

    /// Retrieve a project.
    pub fn retrieve_project(&self, org: &str, project: &str) -> Result<OperationResult> {
        self.call(Endpoint::RetrieveProject { org, project }, None)
    }

    /// Update a project with the full field set.
    pub fn update_project(
        &self,
        org: &str,
        project: &str,
        fields: &ProjectUpdate<'_>,
    ) -> Result<OperationResult> {
        let body = json!({
            "name": fields.name,
            "slug": fields.slug,
            "team_slug": fields.team_slug,
            "platform": fields.platform,
            "is_bookmarked": fields.is_bookmarked,
        });
        self.call(Endpoint::UpdateProject { org, project }, Some(body))
    }

    /// Delete a project.
    pub fn delete_project(&self, org: &str, project: &str) -> Result<OperationResult> {
        self.call(Endpoint::DeleteProject { org, project }, None)
    }

    // =========================================================================
    // Teams
    // =========================================================================

    /// Create a team.
    pub fn create_team(
        &self,
        org: &str,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name, "slug": slug });
        self.call(Endpoint::CreateTeam { org }, Some(body))
    }

    /// Retrieve a team.
    pub fn retrieve_team(&self, org: &str, team: &str) -> Result<OperationResult> {
        self.call(Endpoint::RetrieveTeam { org, team }, None)
    }

    /// Update a team's name and slug.
    pub fn update_team(
        &self,
        org: &str,
        team: &str,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name, "slug": slug });
        self.call(Endpoint::UpdateTeam { org, team }, Some(body))
    }

    /// Delete a team.
    pub fn delete_team(&self, org: &str, team: &str) -> Result<OperationResult> {
        self.call(Endpoint::DeleteTeam { org, team }, None)
    }

    // =========================================================================
    // Organizations
    // =========================================================================

    /// Retrieve an organization.
    pub fn retrieve_organization(&self, org: &str) -> Result<OperationResult> {
        self.call(Endpoint::RetrieveOrganization { org }, None)
    }

    /// Update an organization's name and slug.
    pub fn update_organization(
        &self,
        org: &str,
        name: Option<&str>,
        slug: Option<&str>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name, "slug": slug });
        self.call(Endpoint::UpdateOrganization { org }, Some(body))
    }

    // =========================================================================
    // Client keys
    // =========================================================================

    /// Create a client key.
    pub fn create_client_key(
        &self,
        org: &str,
        project: &str,
        name: Option<&str>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name });
        self.call(Endpoint::CreateClientKey { org, project }, Some(body))
    }

    /// Update a client key's name and active flag.
    pub fn update_client_key(
        &self,
        org: &str,
        project: &str,
        key: &str,
        name: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<OperationResult> {
        let body = json!({ "name": name, "isActive": is_active });
        self.call(Endpoint::UpdateClientKey { org, project, key }, Some(body))
    }

    /// Delete a client key.
    pub fn delete_client_key(&self, org: &str, project: &str, key: &str) -> Result<OperationResult> {
        self.call(Endpoint::DeleteClientKey { org, project, key }, None)
    }

    // =========================================================================
    // Service hooks
    // =========================================================================

    /// Create a service hook.
    pub fn create_service_hook(
        &self,
        org: &str,
        project: &str,
        url: Option<&str>,
        events: Option<&[String]>,
    ) -> Result<OperationResult> {
        let body = json!({ "url": url, "events": events });
        self.call(Endpoint::CreateServiceHook { org, project }, Some(body))
    }

    /// Update a service hook's target URL and events.
    pub fn update_service_hook(
        &self,
        org: &str,
        project: &str,
        hook_id: &str,
        url: Option<&str>,
        events: Option<&[String]>,
    ) -> Result<OperationResult> {
        let body = json!({ "url": url, "events": events });
        self.call(
            Endpoint::UpdateServiceHook {
                org,
                project,
                hook_id,
            },
            Some(body),
        )
    }

    /// Delete a service hook.
    pub fn delete_service_hook(
        &self,
        org: &str,
        project: &str,
        hook_id: &str,
    ) -> Result<OperationResult> {
        self.call(
            Endpoint::DeleteServiceHook {
                org,
                project,
                hook_id,
            },
            None,
        )
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn call(&self, endpoint: Endpoint<'_>, body: Option<Value>) -> Result<OperationResult> {
        let url = self.config.url(&endpoint.path());
        let mut request = ApiRequest::new(endpoint.method(), &url).headers(self.config.headers());
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!("{} {}", request.method, url);
        let response = self.transport.send(&request)?;
        debug!("{} {} -> {}", request.method, url, response.status);

        normalize(&endpoint, url, &response)
    }
}

/// Turn a raw response into an [`OperationResult`] using the status table.
fn normalize(endpoint: &Endpoint<'_>, url: String, response: &ApiResponse) -> Result<OperationResult> {
    let operation = endpoint.operation();
    let succeeded = response.status == endpoint.expected_status();

    // A successful delete answers 204 with no body.
    let body = if succeeded && operation == Operation::Delete {
        json!({ "detail": "Success" })
    } else {
        parse_body(&url, response)?
    };

    let message = if succeeded {
        endpoint.success_message()
    } else {
        endpoint.failure_message()
    };

    Ok(OperationResult {
        changed: succeeded && operation.is_mutating(),
        failed: !succeeded,
        message,
        status_code: response.status,
        url,
        response: body,
    })
}

fn parse_body(url: &str, response: &ApiResponse) -> Result<Value> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| Error::InvalidResponse {
        url: url.to_string(),
        status: response.status,
        message: e.to_string(),
    })
}
