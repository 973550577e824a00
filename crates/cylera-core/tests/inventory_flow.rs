//! Integration tests for the inventory endpoint family using wiremock.
//!
//! - GET /inventory/devices                     — get_devices
//! - GET /inventory/device/{mac}                — get_device
//! - GET /inventory/device_attributes/{mac}     — get_device_attributes

use cylera_core::auth::SessionData;
use cylera_core::inventory::{self, DeviceFilters};
use cylera_core::{Config, CyleraClient, CyleraError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: client with a preset fresh token pointed at the mock server.
fn mock_client(server: &MockServer) -> CyleraClient {
    CyleraClient::with_session(
        Config::new(&server.uri(), "user@example.com", "hunter2"),
        SessionData::new("mock-token".to_string()),
    )
    .unwrap()
}

#[tokio::test]
async fn devices_with_filters_sends_matching_query_params() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    let body = json!({
        "devices": [
            { "mac_address": "00:11:22:33:44:55", "vendor": "Philips" },
            { "mac_address": "66:77:88:99:aa:bb", "vendor": "Philips" }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/inventory/devices"))
        .and(query_param("page", "0"))
        .and(query_param("page_size", "2"))
        .and(query_param("vendor", "Philips"))
        .and(query_param_is_missing("mac_address"))
        .and(query_param_is_missing("class"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let filters = DeviceFilters {
        vendor: Some("Philips".to_string()),
        page_size: Some(2),
        ..Default::default()
    };
    let result = inventory::get_devices(&client, &filters).await.unwrap();

    // Pass-through: the response comes back verbatim.
    assert_eq!(result, body);
    assert_eq!(result["devices"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn filterless_devices_call_sends_only_pagination() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/devices"))
        .and(query_param("page", "0"))
        .and(query_param("page_size", "100"))
        .and(query_param_is_missing("vendor"))
        .and(query_param_is_missing("hostname"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "devices": [] })))
        .mount(&server)
        .await;

    let result = inventory::get_devices(&client, &DeviceFilters::default())
        .await
        .unwrap();

    // An empty collection is a success, not an error.
    assert_eq!(result["devices"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn device_lookup_uses_path_embedded_mac() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/device/00:11:22:33:44:55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mac_address": "00:11:22:33:44:55",
            "vendor": "GE Healthcare"
        })))
        .mount(&server)
        .await;

    let device = inventory::get_device(&client, "00:11:22:33:44:55")
        .await
        .unwrap();
    assert_eq!(device["vendor"], "GE Healthcare");
}

#[tokio::test]
async fn unknown_device_is_not_found_not_empty_success() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/device/de:ad:be:ef:00:00"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "no such device" })))
        .mount(&server)
        .await;

    let err = inventory::get_device(&client, "de:ad:be:ef:00:00")
        .await
        .unwrap_err();
    assert!(matches!(err, CyleraError::NotFound(_)));
}

#[tokio::test]
async fn device_attributes_lookup_and_miss() {
    let server = MockServer::start().await;
    let client = mock_client(&server);

    Mock::given(method("GET"))
        .and(path("/inventory/device_attributes/00:11:22:33:44:55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attributes": [{ "label": "Department", "value": "Radiology" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/inventory/device_attributes/de:ad:be:ef:00:00"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "no such device" })))
        .mount(&server)
        .await;

    let attrs = inventory::get_device_attributes(&client, "00:11:22:33:44:55")
        .await
        .unwrap();
    assert_eq!(attrs["attributes"][0]["value"], "Radiology");

    let err = inventory::get_device_attributes(&client, "de:ad:be:ef:00:00")
        .await
        .unwrap_err();
    assert!(matches!(err, CyleraError::NotFound(_)));
}
