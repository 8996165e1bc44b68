use log::info;
use serde::{Deserialize, Serialize};

use super::{Probe, Reconcile, require};
use crate::client::ResourceClient;
use crate::endpoint::{Operation, ResourceKind};
use crate::error::{Error, Result};
use crate::types::{OperationResult, TargetState};

/// Declared state of an organization.
///
/// Organizations can only be updated: there is no create or delete path,
/// and a failed probe is terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationSpec {
    /// Slug of the existing organization.
    pub organization_slug: String,
    /// New name.
    pub name: Option<String>,
    /// New slug.
    pub slug: Option<String>,
    /// Must be `present`.
    #[serde(default)]
    pub state: TargetState,
}

impl Reconcile for OrganizationSpec {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Organization
    }

    fn id(&self) -> String {
        self.organization_slug.clone()
    }

    fn target(&self) -> TargetState {
        self.state
    }

    fn reconcile(&self, client: &ResourceClient) -> Result<OperationResult> {
        if self.state == TargetState::Absent {
            return Err(Error::Unsupported {
                kind: ResourceKind::Organization,
                operation: Operation::Delete,
            });
        }

        let org = require(
            ResourceKind::Organization,
            "organization_slug",
            Some(self.organization_slug.as_str()),
        )?;

        match Probe::from(client.retrieve_organization(org)?) {
            Probe::Found(_) => {
                info!("organization {org} exists, updating");
                client.update_organization(org, self.name.as_deref(), self.slug.as_deref())
            }
            Probe::NotFound(result) | Probe::Failed(result) => {
                info!(
                    "organization {org} probe returned {}, not updating",
                    result.status_code
                );
                Ok(result)
            }
        }
    }
}
