use log::info;
use serde::{Deserialize, Serialize};

use super::{Intent, Reconcile, require};
use crate::client::ResourceClient;
use crate::endpoint::ResourceKind;
use crate::error::{Error, Result};
use crate::types::{OperationResult, TargetState};

/// Declared state of a project client key.
///
/// Without `client_key` (or with an empty one), a `present` declaration
/// creates a new key every time it is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientKeySpec {
    /// Owning organization.
    pub organization_slug: String,
    /// Owning project.
    pub project_slug: String,
    /// Identifier of an existing key.
    pub client_key: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Active flag (update only).
    pub is_active: Option<bool>,
    /// Target state.
    #[serde(default)]
    pub state: TargetState,
}

impl Reconcile for ClientKeySpec {
    fn kind(&self) -> ResourceKind {
        ResourceKind::ClientKey
    }

    fn id(&self) -> String {
        format!(
            "{}/{}/{}",
            self.organization_slug,
            self.project_slug,
            self.client_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .unwrap_or("(new)")
        )
    }

    fn target(&self) -> TargetState {
        self.state
    }

    fn reconcile(&self, client: &ResourceClient) -> Result<OperationResult> {
        let kind = ResourceKind::ClientKey;
        let org = require(kind, "organization_slug", Some(self.organization_slug.as_str()))?;
        let project = require(kind, "project_slug", Some(self.project_slug.as_str()))?;
        let intent = Intent::from_identifier(self.client_key.as_deref(), "client_key")?;
        let name = self.name.as_deref();

        match (self.state, intent) {
            (TargetState::Present, Intent::Create) => {
                info!("creating client key in {org}/{project}");
                client.create_client_key(org, project, name)
            }
            (TargetState::Present, Intent::Update(key)) => {
                info!("updating client key {key} in {org}/{project}");
                client.update_client_key(org, project, &key, name, self.is_active)
            }
            (TargetState::Absent, Intent::Update(key)) => {
                info!("deleting client key {key} in {org}/{project}");
                client.delete_client_key(org, project, &key)
            }
            (TargetState::Absent, Intent::Create) => Err(Error::MissingIdentifier {
                kind,
                field: "client_key",
            }),
        }
    }
}
