use log::info;
use serde::{Deserialize, Serialize};

use super::{Probe, Reconcile, require};
use crate::client::ResourceClient;
use crate::endpoint::ResourceKind;
use crate::error::Result;
use crate::types::{OperationResult, TargetState};

/// Declared state of a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamSpec {
    /// Owning organization.
    pub organization_slug: String,
    /// Slug of an existing team to update or delete; defaults to `slug`.
    pub team_slug: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Desired slug.
    pub slug: Option<String>,
    /// Target state.
    #[serde(default)]
    pub state: TargetState,
}

impl TeamSpec {
    /// Slug used to address the team remotely.
    fn identity(&self) -> Option<&str> {
        self.team_slug.as_deref().or(self.slug.as_deref())
    }
}

impl Reconcile for TeamSpec {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Team
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
            ResourceKind::Team,
            "organization_slug",
            Some(self.organization_slug.as_str()),
        )?;
        let team = require(ResourceKind::Team, "team_slug", self.identity())?;
        let name = self.name.as_deref();
        let slug = self.slug.as_deref();

        match self.state {
            TargetState::Present => match Probe::from(client.retrieve_team(org, team)?) {
                Probe::Found(_) => {
                    info!("team {org}/{team} exists, updating");
                    client.update_team(org, team, name, slug)
                }
                Probe::NotFound(_) => {
                    info!("team {org}/{team} not found, creating");
                    client.create_team(org, name, slug)
                }
                Probe::Failed(result) => Ok(result),
            },
            TargetState::Absent => {
                info!("deleting team {org}/{team}");
                client.delete_team(org, team)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Method;
    use crate::error::Error;
    use crate::reconcile::testing::client_with;
    use crate::transport::{ApiResponse, MockTransport};
    use serde_json::json;

    fn backend_team() -> TeamSpec {
        TeamSpec {
            organization_slug: "sentry".to_string(),
            team_slug: None,
            name: Some("Backend Team".to_string()),
            slug: Some("backend-team".to_string()),
            state: TargetState::Present,
        }
    }

    #[test]
    fn test_not_found_creates() {
        let mock = MockTransport::new();
        mock.push_json(404, json!({"detail": "The requested resource does not exist"}));
        mock.push_json(201, json!({"slug": "backend-team"}));

        let result = backend_team().reconcile(&client_with(&mock)).unwrap();
        assert!(result.changed);
        assert!(!result.failed);
        assert_eq!(result.status_code, 201);

        let sent = mock.requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].url, "http://localhost:9000/api/0/teams/sentry/backend-team/");
        assert_eq!(sent[1].method, Method::Post);
        assert_eq!(sent[1].url, "http://localhost:9000/api/0/organizations/sentry/teams/");
        assert_eq!(
            sent[1].body,
            Some(json!({"name": "Backend Team", "slug": "backend-team"}))
        );
    }

    #[test]
    fn test_found_updates_existing_slug() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"slug": "backend-team"}));
        mock.push_json(200, json!({"slug": "backend-dev-team"}));

        let spec = TeamSpec {
            team_slug: Some("backend-team".to_string()),
            name: Some("Backend Developer Team".to_string()),
            slug: Some("backend-dev-team".to_string()),
            ..backend_team()
        };
        let result = spec.reconcile(&client_with(&mock)).unwrap();
        assert!(result.changed);
        assert_eq!(result.message, "Team has been updated");

        let sent = mock.requests();
        assert_eq!(sent[1].method, Method::Put);
        assert_eq!(sent[1].url, "http://localhost:9000/api/0/teams/sentry/backend-team/");
    }

    #[test]
    fn test_present_twice_creates_then_updates() {
        let mock = MockTransport::new();
        mock.push_json(404, json!({}));
        mock.push_json(201, json!({"slug": "backend-team"}));
        mock.push_json(200, json!({"slug": "backend-team"}));
        mock.push_json(200, json!({"slug": "backend-team"}));
        let client = client_with(&mock);

        let first = backend_team().reconcile(&client).unwrap();
        let second = backend_team().reconcile(&client).unwrap();
        assert_eq!(first.message, "Team has been created");
        assert_eq!(second.message, "Team has been updated");
        assert!(!second.failed);

        let methods: Vec<Method> = mock.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, [Method::Get, Method::Post, Method::Get, Method::Put]);
    }

    #[test]
    fn test_probe_failure_is_terminal() {
        let mock = MockTransport::new();
        mock.push_json(500, json!({"detail": "Internal Error"}));

        let result = backend_team().reconcile(&client_with(&mock)).unwrap();
        assert!(result.failed);
        assert!(!result.changed);
        assert_eq!(result.status_code, 500);
        assert_eq!(result.message, "Can't retrieve team");
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_update_failure_after_found() {
        let mock = MockTransport::new();
        mock.push_json(200, json!({"slug": "backend-team"}));
        mock.push_json(400, json!({"slug": ["This slug is already in use."]}));

        let spec = TeamSpec {
            team_slug: Some("backend-team".to_string()),
            slug: Some("frontend-team".to_string()),
            ..backend_team()
        };
        let result = spec.reconcile(&client_with(&mock)).unwrap();
        assert!(result.failed);
        assert!(!result.changed);
        assert_eq!(result.status_code, 400);
        assert_eq!(result.message, "Can't update team");
        assert_eq!(result.url, "http://localhost:9000/api/0/teams/sentry/backend-team/");
        assert_eq!(result.response["slug"][0], json!("This slug is already in use."));

        let methods: Vec<Method> = mock.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, [Method::Get, Method::Put]);
    }

    #[test]
    fn test_absent_deletes_without_probe() {
        let mock = MockTransport::new();
        mock.push(ApiResponse::new(204, ""));

        let spec = TeamSpec {
            team_slug: Some("backend-dev-team".to_string()),
            state: TargetState::Absent,
            ..backend_team()
        };
        let result = spec.reconcile(&client_with(&mock)).unwrap();
        assert!(result.changed);
        assert_eq!(result.response, json!({"detail": "Success"}));

        let sent = mock.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Delete);
        assert_eq!(sent[0].url, "http://localhost:9000/api/0/teams/sentry/backend-dev-team/");
    }

    #[test]
    fn test_absent_twice_reports_failure() {
        let mock = MockTransport::new();
        mock.push(ApiResponse::new(204, ""));
        mock.push_json(404, json!({"detail": "The requested resource does not exist"}));
        let client = client_with(&mock);

        let spec = TeamSpec {
            state: TargetState::Absent,
            ..backend_team()
        };
        assert!(spec.reconcile(&client).unwrap().changed);
        let second = spec.reconcile(&client).unwrap();
        assert!(second.failed);
        assert_eq!(second.status_code, 404);
    }

    #[test]
    fn test_no_identity_is_error() {
        let mock = MockTransport::new();
        let spec = TeamSpec {
            slug: None,
            ..backend_team()
        };
        let err = spec.reconcile(&client_with(&mock)).unwrap_err();
        assert!(matches!(err, Error::MissingIdentifier { field: "team_slug", .. }));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_description() {
        assert_eq!(backend_team().description(), "team sentry/backend-team (present)");
    }
}
