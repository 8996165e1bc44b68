use log::info;
use serde::{Deserialize, Serialize};

use super::{Probe, Reconcile, require};
use crate::client::{ProjectUpdate, ResourceClient};
use crate::endpoint::ResourceKind;
use crate::error::Result;
use crate::types::{OperationResult, TargetState};

/// Declared state of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    /// Owning organization.
    pub organization_slug: String,
    /// Slug of an existing project to update or delete; defaults to `slug`.
    pub project_slug: Option<String>,
    /// Team the project is created under (required to create).
    pub team_slug: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Desired slug.
    pub slug: Option<String>,
    /// Platform identifier.
    pub platform: Option<String>,
    /// Bookmark flag.
    pub is_bookmarked: Option<bool>,
    /// Target state.
    #[serde(default)]
    pub state: TargetState,
}

impl ProjectSpec {
    fn identity(&self) -> Option<&str> {
        self.project_slug.as_deref().or(self.slug.as_deref())
    }
}

impl Reconcile for ProjectSpec {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Project
    }

    fn id(&self) -> String {
        format!(
            "{}/{}",
            self.organization_slug,
            self.identity().unwrap_or("?")
        )
    }

    fn target(&self) -> TargetState {
        self.state
    }

    fn reconcile(&self, client: &ResourceClient) -> Result<OperationResult> {
        let org = require(
            ResourceKind::Project,
            "organization_slug",
            Some(self.organization_slug.as_str()),
        )?;
        let project = require(ResourceKind::Project, "project_slug", self.identity())?;

        if self.state == TargetState::Absent {
            info!("deleting project {org}/{project}");
            return client.delete_project(org, project);
        }

        match Probe::from(client.retrieve_project(org, project)?) {
            Probe::Found(_) => {
                info!("project {org}/{project} exists, updating");
                let fields = ProjectUpdate {
                    name: self.name.as_deref(),
                    slug: self.slug.as_deref(),
                    team_slug: self.team_slug.as_deref(),
                    platform: self.platform.as_deref(),
                    is_bookmarked: self.is_bookmarked,
                };
                client.update_project(org, project, &fields)
            }
            Probe::NotFound(_) => {
                let team = require(ResourceKind::Project, "team_slug", self.team_slug.as_deref())?;
                info!("project {org}/{project} not found, creating under team {team}");
                client.create_project(org, team, self.name.as_deref(), self.slug.as_deref())
            }
            Probe::Failed(result) => Ok(result),
        }
    }
}
