//! Connected account resource and data source against a wiremock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use alicloudsecurity_common::{CamClient, CamConfig};
use terraform_provider_alicloudsecurity::error::has_error;
use terraform_provider_alicloudsecurity::state::get_string_attr;
use terraform_provider_alicloudsecurity::{AliCloudSecurityProvider, DynamicValue, Severity};

const RESOURCE: &str = "alicloudsecurity_connected_account";
const ACCOUNT_PATH: &str = "/v3.0/cam/alibabaAccounts/a1";

fn provider_for(server: &MockServer) -> AliCloudSecurityProvider {
    let config = CamConfig::new(server.uri(), "automation", "test-key", "tenant-1", "us");
    AliCloudSecurityProvider::with_client("test", Arc::new(CamClient::new(config).unwrap()))
}

fn planned() -> DynamicValue {
    DynamicValue::from(json!({
        "account_id": "a1",
        "role_arn": "acs:ram::123:role/x",
        "oidc_provider_id": "oidc-1",
        "parent_stack_region": "cn-hangzhou",
        "name": "prod",
        "description": null,
        "state": null,
        "created_date_time": null,
        "updated_date_time": null,
        "last_synced_date_time": null
    }))
}

fn remote_record(name: &str) -> serde_json::Value {
    json!({
        "id": "a1",
        "roleArn": "acs:ram::123:role/x",
        "oidcProviderId": "oidc-1",
        "parentStackRegion": "cn-hangzhou",
        "name": name,
        "state": "connected",
        "createdDateTime": "2024-05-01T10:00:00Z",
        "updatedDateTime": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_apply_create_reads_back_computed_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.0/cam/alibabaAccounts"))
        .and(body_json(json!({
            "accountId": "a1",
            "region": "cn-hangzhou",
            "roleArn": "acs:ram::123:role/x",
            "oidcProviderId": "oidc-1",
            "name": "prod"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_record("prod")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let plan = planned();
    let response = provider.apply_resource_change(RESOURCE, None, Some(&plan)).await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.new_state.unwrap();
    assert_eq!(get_string_attr(&state, "account_id"), "a1");
    assert_eq!(get_string_attr(&state, "state"), "connected");
    assert_eq!(get_string_attr(&state, "created_date_time"), "2024-05-01T10:00:00Z");
    assert_eq!(get_string_attr(&state, "last_synced_date_time"), "");
    assert!(state.get("description").unwrap().is_null());
}

#[tokio::test]
async fn test_apply_create_missing_required_attribute() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let plan = DynamicValue::from(json!({ "account_id": "a1", "name": "prod" }));
    let response = provider.apply_resource_change(RESOURCE, None, Some(&plan)).await;

    assert!(response.new_state.is_none());
    let attrs: Vec<_> = response
        .diagnostics
        .iter()
        .filter_map(|d| d.attribute.as_deref())
        .collect();
    assert_eq!(attrs, vec!["role_arn", "oidc_provider_id", "parent_stack_region"]);
}

#[tokio::test]
async fn test_apply_create_backend_failure_becomes_diagnostic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.0/cam/alibabaAccounts"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "account already connected"})),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let plan = planned();
    let response = provider.apply_resource_change(RESOURCE, None, Some(&plan)).await;

    assert!(response.new_state.is_none());
    assert_eq!(response.diagnostics.len(), 1);
    assert_eq!(response.diagnostics[0].summary, "API Error");
    assert!(response.diagnostics[0].detail.contains("account already connected"));
}

#[tokio::test]
async fn test_apply_create_keeps_state_when_read_back_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3.0/cam/alibabaAccounts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "transient"})))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let plan = planned();
    let response = provider.apply_resource_change(RESOURCE, None, Some(&plan)).await;

    let state = response.new_state.expect("created account must stay in state");
    assert_eq!(get_string_attr(&state, "account_id"), "a1");
    assert_eq!(get_string_attr(&state, "role_arn"), "acs:ram::123:role/x");
    assert_eq!(get_string_attr(&state, "parent_stack_region"), "cn-hangzhou");
    assert_eq!(get_string_attr(&state, "name"), "prod");
    assert_eq!(get_string_attr(&state, "state"), "");

    assert_eq!(response.diagnostics.len(), 1);
    let diag = &response.diagnostics[0];
    assert_eq!(diag.severity, Severity::Warning);
    assert!(!has_error(&response.diagnostics));
    assert!(diag.detail.contains("transient"), "{}", diag.detail);
}

#[tokio::test]
async fn test_read_missing_account_removes_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider.read_resource(RESOURCE, &planned()).await;

    assert!(response.new_state.is_none());
    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_read_failure_keeps_state_and_reports() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let current = planned();
    let response = provider.read_resource(RESOURCE, &current).await;

    assert_eq!(response.new_state, Some(current));
    assert_eq!(response.diagnostics[0].summary, "API Error");
}

#[tokio::test]
async fn test_apply_update_patches_changed_name() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(ACCOUNT_PATH))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_record("renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let prior = planned();
    let plan = DynamicValue::from(json!({
        "account_id": "a1",
        "role_arn": "acs:ram::123:role/x",
        "oidc_provider_id": "oidc-1",
        "parent_stack_region": "cn-hangzhou",
        "name": "renamed",
        "description": null
    }));

    let response = provider
        .apply_resource_change(RESOURCE, Some(&prior), Some(&plan))
        .await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    assert_eq!(get_string_attr(&response.new_state.unwrap(), "name"), "renamed");
}

#[tokio::test]
async fn test_apply_update_rejects_immutable_change() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let prior = planned();
    let plan = DynamicValue::from(json!({
        "account_id": "a1",
        "role_arn": "acs:ram::123:role/other",
        "oidc_provider_id": "oidc-1",
        "parent_stack_region": "cn-hangzhou",
        "name": "prod"
    }));

    let response = provider
        .apply_resource_change(RESOURCE, Some(&prior), Some(&plan))
        .await;

    assert_eq!(response.new_state, Some(prior));
    assert_eq!(response.diagnostics[0].attribute.as_deref(), Some("role_arn"));
}

#[tokio::test]
async fn test_apply_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let prior = planned();
    let response = provider
        .apply_resource_change(RESOURCE, Some(&prior), Some(&DynamicValue::Null))
        .await;

    assert!(response.diagnostics.is_empty());
    assert_eq!(response.new_state, Some(DynamicValue::Null));
}

#[tokio::test]
async fn test_apply_delete_of_missing_account_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let prior = planned();
    let response = provider.apply_resource_change(RESOURCE, Some(&prior), None).await;

    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_import_reads_full_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_record("prod")))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider.import_resource_state(RESOURCE, "a1").await;

    assert!(response.diagnostics.is_empty());
    let imported = &response.imported_resources[0];
    assert_eq!(imported.type_name, RESOURCE);
    assert_eq!(get_string_attr(&imported.state, "role_arn"), "acs:ram::123:role/x");
    assert_eq!(get_string_attr(&imported.state, "parent_stack_region"), "cn-hangzhou");
}

#[tokio::test]
async fn test_import_missing_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.0/cam/alibabaAccounts/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider.import_resource_state(RESOURCE, "ghost").await;

    assert!(response.imported_resources.is_empty());
    assert_eq!(
        response.diagnostics[0].detail,
        "Cannot find connected account with ID: ghost"
    );
}

#[tokio::test]
async fn test_data_source_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_record("prod")))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let config = DynamicValue::from(json!({ "account_id": "a1" }));
    let response = provider.read_data_source(RESOURCE, &config).await;

    assert!(response.diagnostics.is_empty());
    let state = response.state.unwrap();
    assert_eq!(get_string_attr(&state, "connection_state"), "connected");
    assert_eq!(get_string_attr(&state, "name"), "prod");
    assert_eq!(get_string_attr(&state, "description"), "");
}

#[tokio::test]
async fn test_data_source_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let config = DynamicValue::from(json!({ "account_id": "a1" }));
    let response = provider.read_data_source(RESOURCE, &config).await;

    assert!(response.state.is_none());
    assert_eq!(response.diagnostics[0].summary, "Read Error");
    assert_eq!(
        response.diagnostics[0].detail,
        "Cannot find connected account with ID: a1"
    );
}

#[tokio::test]
async fn test_data_source_requires_account_id() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let config = DynamicValue::from(json!({ "account_id": null }));
    let response = provider.read_data_source(RESOURCE, &config).await;

    assert_eq!(response.diagnostics[0].summary, "Account ID is required");
}
