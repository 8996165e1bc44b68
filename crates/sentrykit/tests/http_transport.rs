//! End-to-end tests of the HTTP transport against a local mock server.

use std::time::Duration;

use sentrykit::{
    ClientConfig, Error, OperationResult, Reconcile, ResourceClient, ServiceHookSpec, TargetState,
    TeamSpec,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "8702e9c2d5224b60b24d2f7a9fa486f0";

/// Run a reconciliation on a blocking thread; the transport is synchronous.
async fn reconcile<R>(server_uri: String, spec: R) -> sentrykit::Result<OperationResult>
where
    R: Reconcile + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let config = ClientConfig::new(server_uri, TOKEN).timeout(Duration::from_secs(2));
        spec.reconcile(&ResourceClient::new(config))
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_team_created_when_probe_returns_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/teams/sentry/backend-team/"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "The requested resource does not exist"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/0/organizations/sentry/teams/"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Backend Team", "slug": "backend-team"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"slug": "backend-team"})))
        .expect(1)
        .mount(&server)
        .await;

    let spec = TeamSpec {
        organization_slug: "sentry".to_string(),
        name: Some("Backend Team".to_string()),
        slug: Some("backend-team".to_string()),
        ..Default::default()
    };

    let result = reconcile(server.uri(), spec).await.unwrap();
    assert!(result.changed);
    assert!(!result.failed);
    assert_eq!(result.status_code, 201);
    assert_eq!(result.url, format!("{}/api/0/organizations/sentry/teams/", server.uri()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_service_hook_delete_normalizes_empty_204() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(
            "/api/0/projects/sentry/selamat-sore/hooks/4451ffd8134440d9a5e0c20e7d635234/",
        ))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let spec = ServiceHookSpec {
        organization_slug: "sentry".to_string(),
        project_slug: "selamat-sore".to_string(),
        hook_id: Some("4451ffd8134440d9a5e0c20e7d635234".to_string()),
        state: TargetState::Absent,
        ..Default::default()
    };

    let result = reconcile(server.uri(), spec).await.unwrap();
    assert!(result.changed);
    assert_eq!(result.status_code, 204);
    assert_eq!(result.response, json!({"detail": "Success"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_is_a_result_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/0/teams/sentry/ghost/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "The requested resource does not exist"})),
        )
        .mount(&server)
        .await;

    let spec = TeamSpec {
        organization_slug: "sentry".to_string(),
        team_slug: Some("ghost".to_string()),
        state: TargetState::Absent,
        ..Default::default()
    };

    let result = reconcile(server.uri(), spec).await.unwrap();
    assert!(result.failed);
    assert!(!result.changed);
    assert_eq!(result.status_code, 404);
    assert_eq!(
        result.response["detail"],
        json!("The requested resource does not exist")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/teams/sentry/backend-team/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let spec = TeamSpec {
        organization_slug: "sentry".to_string(),
        team_slug: Some("backend-team".to_string()),
        ..Default::default()
    };

    let err = reconcile(server.uri(), spec).await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { status: 502, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_host_is_transport_error() {
    // Bind and drop a listener so nothing accepts on the port.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let spec = TeamSpec {
        organization_slug: "sentry".to_string(),
        team_slug: Some("backend-team".to_string()),
        ..Default::default()
    };

    let err = reconcile(uri, spec).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/0/organizations/sentry/"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let spec = sentrykit::OrganizationSpec {
        organization_slug: "sentry".to_string(),
        ..Default::default()
    };

    let err = reconcile(server.uri(), spec).await.unwrap_err();
    assert!(matches!(err, Error::Timeout { .. }));
}
