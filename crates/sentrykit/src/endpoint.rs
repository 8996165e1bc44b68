//! URL templates and the expected-status table of the Sentry REST API.
//!
//! Every supported (resource kind, operation) pair is one [`Endpoint`]
//! variant carrying the identity components its path needs. Pairs the API
//! does not offer (organization create/delete, client key and service hook
//! retrieve) have no variant and cannot be requested.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource kinds managed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A Sentry organization.
    Organization,
    /// A team inside an organization.
    Team,
    /// A project owned by a team.
    Project,
    /// A project client key (DSN).
    ClientKey,
    /// A project service hook.
    ServiceHook,
}

impl ResourceKind {
    /// Lowercase noun used in messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Team => "team",
            Self::Project => "project",
            Self::ClientKey => "client key",
            Self::ServiceHook => "service hook",
        }
    }

    /// Capitalized label used in success messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::Team => "Team",
            Self::Project => "Project",
            Self::ClientKey => "Project Client Key",
            Self::ServiceHook => "Project Service Hook",
        }
    }

    /// All kinds, in dependency order: an organization before its teams, a
    /// team before its projects, a project before its keys and hooks.
    #[must_use]
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Organization,
            ResourceKind::Team,
            ResourceKind::Project,
            ResourceKind::ClientKey,
            ResourceKind::ServiceHook,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// CRUD operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// POST a new resource.
    Create,
    /// GET an existing resource.
    Retrieve,
    /// PUT new field values.
    Update,
    /// DELETE a resource.
    Delete,
}

impl Operation {
    /// Lowercase verb.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Past participle used in success messages.
    fn past(&self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Retrieve => "retrieved",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }

    /// HTTP method for this operation.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Create => Method::Post,
            Self::Retrieve => Method::Get,
            Self::Update => Method::Put,
            Self::Delete => Method::Delete,
        }
    }

    /// The only status code counted as success.
    #[must_use]
    pub fn expected_status(&self) -> u16 {
        match self {
            Self::Create => 201,
            Self::Retrieve | Self::Update => 200,
            Self::Delete => 204,
        }
    }

    /// Whether a successful call changes remote state.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Retrieve)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl Method {
    /// Uppercase method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete API endpoint with its identity components filled in.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /api/0/teams/{org}/{team}/projects/`
    CreateProject { org: &'a str, team: &'a str },
    /// `GET /api/0/projects/{org}/{project}/`
    RetrieveProject { org: &'a str, project: &'a str },
    /// `PUT /api/0/projects/{org}/{project}/`
    UpdateProject { org: &'a str, project: &'a str },
    /// `DELETE /api/0/projects/{org}/{project}/`
    DeleteProject { org: &'a str, project: &'a str },
    /// `POST /api/0/organizations/{org}/teams/`
    CreateTeam { org: &'a str },
    /// `GET /api/0/teams/{org}/{team}/`
    RetrieveTeam { org: &'a str, team: &'a str },
    /// `PUT /api/0/teams/{org}/{team}/`
    UpdateTeam { org: &'a str, team: &'a str },
    /// `DELETE /api/0/teams/{org}/{team}/`
    DeleteTeam { org: &'a str, team: &'a str },
    /// `GET /api/0/organizations/{org}/`
    RetrieveOrganization { org: &'a str },
    /// `PUT /api/0/organizations/{org}/`
    UpdateOrganization { org: &'a str },
    /// `POST /api/0/projects/{org}/{project}/keys/`
    CreateClientKey { org: &'a str, project: &'a str },
    /// `PUT /api/0/projects/{org}/{project}/keys/{key}/`
    UpdateClientKey {
        org: &'a str,
        project: &'a str,
        key: &'a str,
    },
    /// `DELETE /api/0/projects/{org}/{project}/keys/{key}/`
    DeleteClientKey {
        org: &'a str,
        project: &'a str,
        key: &'a str,
    },
    /// `POST /api/0/projects/{org}/{project}/hooks/`
    CreateServiceHook { org: &'a str, project: &'a str },
    /// `PUT /api/0/projects/{org}/{project}/hooks/{hook_id}/`
    UpdateServiceHook {
        org: &'a str,
        project: &'a str,
        hook_id: &'a str,
    },
    /// `DELETE /api/0/projects/{org}/{project}/hooks/{hook_id}/`
    DeleteServiceHook {
        org: &'a str,
        project: &'a str,
        hook_id: &'a str,
    },
}

impl Endpoint<'_> {
    /// Resource kind addressed by this endpoint.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::CreateProject { .. }
            | Self::RetrieveProject { .. }
            | Self::UpdateProject { .. }
            | Self::DeleteProject { .. } => ResourceKind::Project,
            Self::CreateTeam { .. }
            | Self::RetrieveTeam { .. }
            | Self::UpdateTeam { .. }
            | Self::DeleteTeam { .. } => ResourceKind::Team,
            Self::RetrieveOrganization { .. } | Self::UpdateOrganization { .. } => {
                ResourceKind::Organization
            }
            Self::CreateClientKey { .. }
            | Self::UpdateClientKey { .. }
            | Self::DeleteClientKey { .. } => ResourceKind::ClientKey,
            Self::CreateServiceHook { .. }
            | Self::UpdateServiceHook { .. }
            | Self::DeleteServiceHook { .. } => ResourceKind::ServiceHook,
        }
    }

    /// Operation performed by this endpoint.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::CreateProject { .. }
            | Self::CreateTeam { .. }
            | Self::CreateClientKey { .. }
            | Self::CreateServiceHook { .. } => Operation::Create,
            Self::RetrieveProject { .. }
            | Self::RetrieveTeam { .. }
            | Self::RetrieveOrganization { .. } => Operation::Retrieve,
            Self::UpdateProject { .. }
            | Self::UpdateTeam { .. }
            | Self::UpdateOrganization { .. }
            | Self::UpdateClientKey { .. }
            | Self::UpdateServiceHook { .. } => Operation::Update,
            Self::DeleteProject { .. }
            | Self::DeleteTeam { .. }
            | Self::DeleteClientKey { .. }
            | Self::DeleteServiceHook { .. } => Operation::Delete,
        }
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.operation().method()
    }

    /// Status code that marks the call as successful.
    #[must_use]
    pub fn expected_status(&self) -> u16 {
        self.operation().expected_status()
    }

    /// API path, relative to the host.
    #[must_use]
    pub fn path(&self) -> String {
        match *self {
            Self::CreateProject { org, team } => format!("/api/0/teams/{org}/{team}/projects/"),
            Self::RetrieveProject { org, project }
            | Self::UpdateProject { org, project }
            | Self::DeleteProject { org, project } => format!("/api/0/projects/{org}/{project}/"),
            Self::CreateTeam { org } => format!("/api/0/organizations/{org}/teams/"),
            Self::RetrieveTeam { org, team }
            | Self::UpdateTeam { org, team }
            | Self::DeleteTeam { org, team } => format!("/api/0/teams/{org}/{team}/"),
            Self::RetrieveOrganization { org } | Self::UpdateOrganization { org } => {
                format!("/api/0/organizations/{org}/")
            }
            Self::CreateClientKey { org, project } => {
                format!("/api/0/projects/{org}/{project}/keys/")
            }
            Self::UpdateClientKey { org, project, key }
            | Self::DeleteClientKey { org, project, key } => {
                format!("/api/0/projects/{org}/{project}/keys/{key}/")
            }
            Self::CreateServiceHook { org, project } => {
                format!("/api/0/projects/{org}/{project}/hooks/")
            }
            Self::UpdateServiceHook {
                org,
                project,
                hook_id,
            }
            | Self::DeleteServiceHook {
                org,
                project,
                hook_id,
            } => format!("/api/0/projects/{org}/{project}/hooks/{hook_id}/"),
        }
    }

    /// Message reported when the call succeeds.
    #[must_use]
    pub fn success_message(&self) -> String {
        let label = self.kind().label();
        match self.operation() {
            Operation::Retrieve => format!("{label} is available"),
            op => format!("{label} has been {}", op.past()),
        }
    }

    /// Message reported when the call returns an unexpected status.
    #[must_use]
    pub fn failure_message(&self) -> String {
        format!("Can't {} {}", self.operation(), self.kind())
    }
}
