use log::info;
use serde::{Deserialize, Serialize};

use super::{Intent, Reconcile, require};
use crate::client::ResourceClient;
use crate::endpoint::ResourceKind;
use crate::error::{Error, Result};
use crate::types::{OperationResult, TargetState};

/// Declared state of a project service hook.
///
/// Like client keys, hooks are addressed by a server-generated id: omit
/// `hook_id` (or leave it empty) to create, supply it to update or delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceHookSpec {
    /// Owning organization.
    pub organization_slug: String,
    /// Owning project.
    pub project_slug: String,
    /// Identifier of an existing hook.
    pub hook_id: Option<String>,
    /// Target URL the hook posts to.
    pub hook_url: Option<String>,
    /// Events that trigger the hook (e.g. `event.alert`).
    pub hook_events: Option<Vec<String>>,
    /// Target state.
    #[serde(default)]
    pub state: TargetState,
}

impl Reconcile for ServiceHookSpec {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ServiceHook
    }

    fn id(&self) -> String {
        format!(
            "{}/{}/{}",
            self.organization_slug,
            self.project_slug,
            self.hook_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .unwrap_or("(new)")
        )
    }

    fn target(&self) -> TargetState {
        self.state
    }

    fn reconcile(&self, client: &ResourceClient) -> Result<OperationResult> {
        let kind = ResourceKind::ServiceHook;
        let org = require(kind, "organization_slug", Some(self.organization_slug.as_str()))?;
        let project = require(kind, "project_slug", Some(self.project_slug.as_str()))?;
        let intent = Intent::from_identifier(self.hook_id.as_deref(), "hook_id")?;
        let url = self.hook_url.as_deref();
        let events = self.hook_events.as_deref();

        match (self.state, intent) {
            (TargetState::Present, Intent::Create) => {
                info!("creating service hook in {org}/{project}");
                client.create_service_hook(org, project, url, events)
            }
            (TargetState::Present, Intent::Update(hook_id)) => {
                info!("updating service hook {hook_id} in {org}/{project}");
                client.update_service_hook(org, project, &hook_id, url, events)
            }
            (TargetState::Absent, Intent::Update(hook_id)) => {
                info!("deleting service hook {hook_id} in {org}/{project}");
                client.delete_service_hook(org, project, &hook_id)
            }
            (TargetState::Absent, Intent::Create) => Err(Error::MissingIdentifier {
                kind,
                field: "hook_id",
            }),
        }
    }
}
