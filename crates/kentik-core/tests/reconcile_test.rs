// End-to-end reconcile tests against a wiremock Kentik API.
//
// Each test mounts the reference listings (plans/sites/labels), a device
// listing, and explicit expectations on the mutating endpoints — most
// importantly `.expect(0)` where a branch must not mutate.
#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kentik_api::Client;
use kentik_core::{Action, CoreError, DeviceSpec, Reconciler};

const DEVICE_PATH: &str = "/device/v202308beta1/device";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client =
        Client::with_base_urls(&server.uri(), &server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn spec(value: Value) -> DeviceSpec {
    serde_json::from_value(value).unwrap()
}

fn edge_spec(state: &str) -> DeviceSpec {
    spec(json!({
        "deviceName": "edge-1",
        "planName": "Gold",
        "siteName": "LA1",
        "sendingIps": ["10.0.0.1"],
        "state": state,
    }))
}

/// Remote representation matching `edge_spec` field-for-field.
fn matching_remote_device() -> Value {
    json!({
        "id": "99",
        "deviceName": "edge-1",
        "deviceSubtype": "router",
        "deviceSampleRate": "1",
        "sendingIps": ["10.0.0.1"],
        "minimizeSnmp": false,
        "deviceBgpType": "none",
        "site": { "id": 7, "title": "LA1" },
        "plan": { "id": 12345 },
        "labels": [],
    })
}

async fn mount_reference_listings(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v5/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plans": [{ "id": "12345", "name": "Gold" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site/v202211/sites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sites": [{ "id": 7, "title": "LA1" }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/label/v202210/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": [{ "id": 3, "name": "edge" }, { "id": 9, "name": "core" }]
        })))
        .mount(server)
        .await;
}

async fn mount_device_listing(server: &MockServer, devices: Value) {
    Mock::given(method("GET"))
        .and(path(DEVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": devices })))
        .mount(server)
        .await;
}

async fn mount_remote_device(server: &MockServer, device: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{DEVICE_PATH}/99")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "device": device })))
        .mount(server)
        .await;
}

/// Forbid every mutating verb for the remainder of the test.
async fn expect_no_mutations(server: &MockServer) {
    for verb in ["POST", "PUT", "DELETE"] {
        Mock::given(method(verb))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(server)
            .await;
    }
}

// ── State machine: create ───────────────────────────────────────────

#[tokio::test]
async fn absent_device_with_state_present_is_created() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path(DEVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": "201", "deviceName": "edge-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .reconcile(&edge_spec("present"))
        .await
        .unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.device_id, Some(201));
    assert_eq!(outcome.action, Action::Created);
}

#[tokio::test]
async fn create_with_labels_issues_one_replace_call() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([])).await;

    let mut desired = edge_spec("present");
    desired.labels = vec!["edge".into(), String::new(), "core".into()];

    Mock::given(method("POST"))
        .and(path(DEVICE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": 201, "deviceName": "edge-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("{DEVICE_PATH}/201/labels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": 201, "labels": [{ "id": 3 }, { "id": 9 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client).reconcile(&desired).await.unwrap();

    assert!(outcome.changed);
    assert!(outcome.labels_replaced);
}

// ── State machine: no-ops ───────────────────────────────────────────

#[tokio::test]
async fn absent_device_with_state_absent_is_a_noop() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([])).await;
    expect_no_mutations(&server).await;

    let outcome = Reconciler::new(&client)
        .reconcile(&edge_spec("absent"))
        .await
        .unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.action, Action::Unchanged);
}

#[tokio::test]
async fn matching_device_yields_changed_false() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": "99", "deviceName": "edge-1" }])).await;
    mount_remote_device(&server, matching_remote_device()).await;
    expect_no_mutations(&server).await;

    let outcome = Reconciler::new(&client)
        .reconcile(&edge_spec("present"))
        .await
        .unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.device_id, Some(99));
    assert_eq!(outcome.action, Action::Unchanged);
}

// ── State machine: update ───────────────────────────────────────────

#[tokio::test]
async fn drifted_description_triggers_exactly_one_update() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": 99, "deviceName": "edge-1" }])).await;

    let mut remote = matching_remote_device();
    remote["deviceDescription"] = json!("old description");
    mount_remote_device(&server, remote).await;

    let mut desired = edge_spec("present");
    desired.device_description = Some("new description".into());

    Mock::given(method("PUT"))
        .and(path(format!("{DEVICE_PATH}/99")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": 99, "deviceName": "edge-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client).reconcile(&desired).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Updated);
    assert!(!outcome.labels_replaced);
}

#[tokio::test]
async fn site_mismatch_triggers_update_regardless_of_other_fields() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": 99, "deviceName": "edge-1" }])).await;

    let mut remote = matching_remote_device();
    remote["site"] = json!({ "id": 8, "title": "NY1" });
    mount_remote_device(&server, remote).await;

    Mock::given(method("PUT"))
        .and(path(format!("{DEVICE_PATH}/99")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": 99, "deviceName": "edge-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .reconcile(&edge_spec("present"))
        .await
        .unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Updated);
}

// ── State machine: delete ───────────────────────────────────────────

#[tokio::test]
async fn existing_device_with_state_absent_is_deleted() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": "99", "deviceName": "edge-1" }])).await;

    Mock::given(method("DELETE"))
        .and(path(format!("{DEVICE_PATH}/99")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client)
        .reconcile(&edge_spec("absent"))
        .await
        .unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Deleted);
    assert_eq!(outcome.device_id, Some(99));
}

// ── Label reconciliation is orthogonal ──────────────────────────────

#[tokio::test]
async fn label_drift_alone_replaces_labels_and_sets_changed() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": 99, "deviceName": "edge-1" }])).await;
    mount_remote_device(&server, matching_remote_device()).await;

    let mut desired = edge_spec("present");
    desired.labels = vec!["edge".into()];

    Mock::given(method("PUT"))
        .and(path(format!("{DEVICE_PATH}/99/labels")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device": { "id": 99, "labels": [{ "id": 3 }] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Field update must not fire: only the labels differ.
    Mock::given(method("PUT"))
        .and(path(format!("{DEVICE_PATH}/99")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = Reconciler::new(&client).reconcile(&desired).await.unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Unchanged);
    assert!(outcome.labels_replaced);
}

#[tokio::test]
async fn matching_labels_do_not_replace() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": 99, "deviceName": "edge-1" }])).await;

    let mut remote = matching_remote_device();
    remote["labels"] = json!([{ "id": 3 }]);
    mount_remote_device(&server, remote).await;
    expect_no_mutations(&server).await;

    let mut desired = edge_spec("present");
    desired.labels = vec!["edge".into()];

    let outcome = Reconciler::new(&client).reconcile(&desired).await.unwrap();

    assert!(!outcome.changed);
    assert!(!outcome.labels_replaced);
}

// ── Reference resolution failures ───────────────────────────────────

#[tokio::test]
async fn unknown_plan_fails_before_any_mutation() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    expect_no_mutations(&server).await;

    let mut desired = edge_spec("present");
    desired.plan_name = "Platinum".into();

    let err = Reconciler::new(&client)
        .reconcile(&desired)
        .await
        .unwrap_err();

    match err {
        CoreError::NotFound { entity, name } => {
            assert_eq!(entity, "Plan");
            assert_eq!(name, "Platinum");
        }
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

#[tokio::test]
async fn unknown_label_fails_before_any_mutation() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    expect_no_mutations(&server).await;

    let mut desired = edge_spec("present");
    desired.labels = vec!["does-not-exist".into()];

    let err = Reconciler::new(&client)
        .reconcile(&desired)
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::NotFound { entity: "Label", .. }),
        "expected Label NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn unknown_site_fails_before_any_mutation() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    expect_no_mutations(&server).await;

    let mut desired = edge_spec("present");
    desired.site_name = Some("ATLANTIS".into());

    let err = Reconciler::new(&client)
        .reconcile(&desired)
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::NotFound { entity: "Site", .. }),
        "expected Site NotFound, got: {err:?}"
    );
}

// ── Check mode ──────────────────────────────────────────────────────

#[tokio::test]
async fn check_mode_reports_changes_without_mutating() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([{ "id": 99, "deviceName": "edge-1" }])).await;

    let mut remote = matching_remote_device();
    remote["deviceDescription"] = json!("old description");
    mount_remote_device(&server, remote).await;
    expect_no_mutations(&server).await;

    let mut desired = edge_spec("present");
    desired.device_description = Some("new description".into());

    let outcome = Reconciler::new(&client)
        .with_check_mode(true)
        .reconcile(&desired)
        .await
        .unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Updated);
}

#[tokio::test]
async fn check_mode_create_reports_changed_without_id() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([])).await;
    expect_no_mutations(&server).await;

    let outcome = Reconciler::new(&client)
        .with_check_mode(true)
        .reconcile(&edge_spec("present"))
        .await
        .unwrap();

    assert!(outcome.changed);
    assert_eq!(outcome.action, Action::Created);
    assert_eq!(outcome.device_id, None);
}

// ── Failure propagation ─────────────────────────────────────────────

#[tokio::test]
async fn failed_create_aborts_with_api_error() {
    let (server, client) = setup().await;
    mount_reference_listings(&server).await;
    mount_device_listing(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path(DEVICE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("sendingIps required"))
        .expect(1)
        .mount(&server)
        .await;

    let err = Reconciler::new(&client)
        .reconcile(&edge_spec("present"))
        .await
        .unwrap_err();

    match err {
        CoreError::Api(kentik_api::Error::Api {
            operation, status, ..
        }) => {
            assert_eq!(operation, "create_device");
            assert_eq!(status, 400);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
