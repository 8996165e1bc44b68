//! Desired-state manifest: the resources to converge, in TOML.
//!
//! ```toml
//! [[team]]
//! organization_slug = "sentry"
//! name = "Backend Team"
//! slug = "backend-team"
//!
//! [[service_hook]]
//! organization_slug = "sentry"
//! project_slug = "selamat-sore"
//! hook_url = "https://example.com/sentry_hook/"
//! hook_events = ["event.alert", "event.created"]
//! ```

use anyhow::{Context, Result};
use sentrykit::{
    ClientKeySpec, OrganizationSpec, ProjectSpec, Reconcile, ResourceKind, ServiceHookSpec,
    TeamSpec,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub organization: Vec<OrganizationSpec>,
    #[serde(default)]
    pub team: Vec<TeamSpec>,
    #[serde(default)]
    pub project: Vec<ProjectSpec>,
    #[serde(default)]
    pub client_key: Vec<ClientKeySpec>,
    #[serde(default)]
    pub service_hook: Vec<ServiceHookSpec>,
}

impl Manifest {
    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    /// Parse a manifest from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// All declared resources, in [`ResourceKind::all`] order
    pub fn resources(&self) -> Vec<&dyn Reconcile> {
        ResourceKind::all()
            .iter()
            .flat_map(|kind| self.declared(*kind))
            .collect()
    }

    /// Declared resources of one kind, in file order
    pub fn declared(&self, kind: ResourceKind) -> Vec<&dyn Reconcile> {
        fn erase<T: Reconcile + 'static>(items: &[T]) -> Vec<&dyn Reconcile> {
            items.iter().map(|item| item as &dyn Reconcile).collect()
        }

        match kind {
            ResourceKind::Organization => erase(&self.organization),
            ResourceKind::Team => erase(&self.team),
            ResourceKind::Project => erase(&self.project),
            ResourceKind::ClientKey => erase(&self.client_key),
            ResourceKind::ServiceHook => erase(&self.service_hook),
        }
    }

    pub fn len(&self) -> usize {
        self.organization.len()
            + self.team.len()
            + self.project.len()
            + self.client_key.len()
            + self.service_hook.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
