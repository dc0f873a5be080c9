// Integration tests for `GatewayClient` using wiremock.
#![allow(clippy::unwrap_used)]

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cvaas_api::{Error, GatewayClient, Resource, ResourceChannel, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, GatewayClient) {
    let server = MockServer::start().await;
    let client = GatewayClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn ndjson(frames: &[serde_json::Value]) -> String {
    frames
        .iter()
        .map(|f| format!("{f}\n"))
        .collect::<String>()
}

// ── Streaming ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_all_streams_results_in_order() {
    let (server, client) = setup().await;

    let body = ndjson(&[
        json!({"result": {"value": {"key": {"deviceId": "A"}}, "type": "INITIAL"}}),
        json!({"result": {"value": {"key": {"deviceId": "B"}}, "type": "INITIAL"}}),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/resources/inventory/v1/Device/all"))
        .and(body_json(json!({"partialEqFilter": [{"modelName": "cEOSLab"}]})))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let stream = client
        .get_all(
            Resource::Device,
            json!({"partialEqFilter": [{"modelName": "cEOSLab"}]}),
        )
        .await
        .unwrap();
    let results: Vec<_> = stream.collect().await;

    assert_eq!(results.len(), 2);
    let ids: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().value["key"]["deviceId"].clone())
        .collect();
    assert_eq!(ids, vec![json!("A"), json!("B")]);
}

#[tokio::test]
async fn test_empty_stream_yields_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/Workspace/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let stream = client.get_all(Resource::Workspace, json!({})).await.unwrap();
    let results: Vec<_> = stream.collect().await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_in_band_error_frame_surfaces_as_rpc_error() {
    let (server, client) = setup().await;

    let body = ndjson(&[
        json!({"result": {"value": {"key": {"workspaceId": "ws-1"}}}}),
        json!({"error": {"code": 13, "message": "stream broken"}}),
    ]);

    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/Workspace/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let stream = client.get_all(Resource::Workspace, json!({})).await.unwrap();
    let results: Vec<_> = stream.collect().await;

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(Error::Rpc { code, message, status }) => {
            assert_eq!(*code, 13);
            assert_eq!(message, "stream broken");
            assert_eq!(*status, None);
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

// ── Unary ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_posts_value_and_returns_ack() {
    let (server, client) = setup().await;

    let value = json!({
        "key": {"workspaceId": "ws-1"},
        "displayName": "Demo",
        "requestParams": {"requestId": "req-1"}
    });
    let ack = json!({"value": value.clone(), "time": "2026-01-01T00:00:00Z"});

    Mock::given(method("POST"))
        .and(path("/api/resources/workspace/v1/WorkspaceConfig"))
        .and(body_json(value.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(&ack))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.set(Resource::WorkspaceConfig, value).await.unwrap();
    assert_eq!(resp, ack);
}

#[tokio::test]
async fn test_set_with_empty_body_returns_null() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/resources/tag/v2/TagConfig"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resp = client.set(Resource::TagConfig, json!({})).await.unwrap();
    assert_eq!(resp, serde_json::Value::Null);
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_status_body_is_decoded() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/resources/tag/v2/TagAssignmentConfig"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 3,
            "message": "unknown device"
        })))
        .mount(&server)
        .await;

    let err = client
        .set(Resource::TagAssignmentConfig, json!({}))
        .await
        .unwrap_err();

    match err {
        Error::Rpc { code, message, status } => {
            assert_eq!(code, 3);
            assert_eq!(message, "unknown device");
            assert_eq!(status, Some(400));
        }
        other => panic!("expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_without_body_maps_to_unauthenticated() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/resources/inventory/v1/Device/all"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.get_all(Resource::Device, json!({})).await.err().unwrap();
    assert!(
        matches!(err, Error::Rpc { code: 16, status: Some(401), .. }),
        "expected UNAUTHENTICATED, got {err:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_connect_error() {
    // Bind then drop a listener so the port is known to be closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client =
        GatewayClient::from_reqwest(&format!("http://{addr}"), reqwest::Client::new()).unwrap();

    let err = client.set(Resource::TagConfig, json!({})).await.unwrap_err();
    assert!(err.is_connect(), "expected connect error, got {err:?}");
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent_on_every_call() {
    let server = MockServer::start().await;
    let token = SecretString::from("s3cr3t".to_owned());
    let client =
        GatewayClient::from_token(&server.uri(), &token, &TransportConfig::default()).unwrap();

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer s3cr3t"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    client.set(Resource::TagConfig, json!({})).await.unwrap();
    let stream = client.get_all(Resource::Device, json!({})).await.unwrap();
    assert_eq!(stream.count().await, 0);
}
