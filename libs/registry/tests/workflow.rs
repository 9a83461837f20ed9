//! Integration tests for the login/pull workflow with a mock runtime.

use hubpull_registry::workflow::{login_locally, pull_all, pull_latest};
use hubpull_registry::{Credentials, HubClient, HubConfig, RegistryError, Repository};
use hubpull_runtime::{MockRuntime, RuntimeCall};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn connected(server: &MockServer) -> HubClient {
    Mock::given(method("PUT"))
        .and(path("/v2/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok" })))
        .mount(server)
        .await;

    let config = HubConfig::new(Credentials::new("acme", "secret").unwrap()).with_api_url(server.uri());
    HubClient::connect(&config).await.unwrap()
}

async fn mount_tags(server: &MockServer, repo: &str, tags: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/repositories/acme/{}/tags/", repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "next": null,
            "previous": null,
            "results": tags,
        })))
        .mount(server)
        .await;
}

fn repo(name: &str) -> Repository {
    serde_json::from_value(json!({ "name": name, "namespace": "acme" })).unwrap()
}

fn pullable(name: &str) -> serde_json::Value {
    json!({ "name": name, "images": [{ "architecture": "amd64", "os": "linux" }] })
}

fn empty(name: &str) -> serde_json::Value {
    json!({ "name": name, "images": [] })
}

#[tokio::test]
async fn test_login_locally_uses_client_credentials() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    let runtime = MockRuntime::new();

    login_locally(&client, &runtime).await.unwrap();

    assert_eq!(
        runtime.calls(),
        vec![RuntimeCall::Login {
            username: "acme".to_string()
        }]
    );
}

#[tokio::test]
async fn test_pull_latest_pulls_selected_reference() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_tags(&server, "widget", json!([empty("edge"), pullable("v1.2"), pullable("v1.1")])).await;
    let runtime = MockRuntime::new();

    let pulled = pull_latest(&client, &runtime, &repo("widget")).await.unwrap();

    assert_eq!(pulled.as_deref(), Some("acme/widget:v1.2"));
    assert_eq!(runtime.pulled(), vec!["acme/widget:v1.2".to_string()]);
}

#[tokio::test]
async fn test_pull_latest_skips_without_pullable_tag() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_tags(&server, "widget", json!([empty("edge"), empty("latest")])).await;
    let runtime = MockRuntime::new();

    let pulled = pull_latest(&client, &runtime, &repo("widget")).await.unwrap();

    assert_eq!(pulled, None);
    assert!(runtime.calls().is_empty());
}

#[tokio::test]
async fn test_pull_not_invoked_when_listing_fails() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    Mock::given(method("GET"))
        .and(path("/v2/repositories/acme/widget/tags/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream error"))
        .mount(&server)
        .await;
    let runtime = MockRuntime::new();

    let err = pull_latest(&client, &runtime, &repo("widget")).await.unwrap_err();

    assert!(matches!(err, RegistryError::Api { status: 500, .. }));
    assert!(runtime.calls().is_empty());
}

#[tokio::test]
async fn test_runtime_exit_code_propagates() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_tags(&server, "widget", json!([pullable("v1")])).await;
    let runtime = MockRuntime::failing(125);

    let err = pull_latest(&client, &runtime, &repo("widget")).await.unwrap_err();

    match err {
        RegistryError::Runtime(runtime_err) => assert_eq!(runtime_err.exit_code(), Some(125)),
        other => panic!("expected runtime error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_pull_all_reports_pulled_and_skipped() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_tags(&server, "widget", json!([pullable("v2")])).await;
    mount_tags(&server, "gadget", json!([empty("v0")])).await;
    mount_tags(&server, "gizmo", json!([empty("edge"), pullable("stable")])).await;
    let runtime = MockRuntime::new();

    let summary = pull_all(
        &client,
        &runtime,
        &[repo("widget"), repo("gadget"), repo("gizmo")],
    )
    .await
    .unwrap();

    assert_eq!(summary.pulled, vec!["acme/widget:v2", "acme/gizmo:stable"]);
    assert_eq!(summary.skipped, vec!["acme/gadget"]);
    assert_eq!(runtime.pulled(), summary.pulled);
}

#[tokio::test]
async fn test_pull_all_stops_at_first_failure() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_tags(&server, "widget", json!([pullable("v2")])).await;
    mount_tags(&server, "gadget", json!([pullable("v1")])).await;
    let runtime = MockRuntime::failing(1);

    let result = pull_all(&client, &runtime, &[repo("widget"), repo("gadget")]).await;

    assert!(result.is_err());
    assert_eq!(runtime.pulled(), vec!["acme/widget:v2".to_string()]);
}
