use std::sync::Arc;

use lowstock::adapter::outbound::auth::{MetadataTokenSource, StaticTokenSource};
use lowstock::adapter::outbound::fcm::FcmGateway;
use lowstock::adapter::outbound::firestore::FirestoreStore;
use lowstock::domain::{AlertRouting, EventId, NotificationRecord, ProductId, PushMessage};
use lowstock::error::Error;
use lowstock::port::{NotificationStore, PushGateway, TokenSource};
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMIT_PATH: &str = "/v1/projects/demo/databases/(default)/documents:commit";
const SEND_PATH: &str = "/v1/projects/demo/messages:send";
const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

fn record() -> NotificationRecord {
    NotificationRecord::low_stock(
        ProductId::new("sp-9"),
        &EventId::new("evt-9"),
        "Timing Belt".into(),
        "https://img/belt.png".into(),
        3.0,
        5.0,
    )
}

fn tokens() -> Arc<dyn TokenSource> {
    Arc::new(StaticTokenSource::new("test-token"))
}

fn root(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).unwrap()
}

fn firestore(server: &MockServer) -> FirestoreStore {
    FirestoreStore::new(
        Client::new(),
        &root(server),
        "demo",
        "(default)",
        "notification",
        tokens(),
    )
    .unwrap()
}

fn fcm(server: &MockServer) -> FcmGateway {
    FcmGateway::new(Client::new(), &root(server), "demo", tokens()).unwrap()
}

#[tokio::test]
async fn firestore_commit_merges_record_with_server_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "writes": [{
                "update": {
                    "name": "projects/demo/databases/(default)/documents/notification/sp-9_evt-9",
                    "fields": {
                        "notifId": {"stringValue": "sp-9_evt-9"},
                        "productName": {"stringValue": "Timing Belt"},
                        "stock": {"integerValue": "3"},
                        "stockThreshold": {"integerValue": "5"},
                        "read": {"booleanValue": false}
                    }
                },
                "updateTransforms": [
                    {"fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME"}
                ]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"commitTime": "2026-01-01T00:00:00Z"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    firestore(&server).upsert(&record()).await.unwrap();
}

#[tokio::test]
async fn firestore_update_mask_lists_record_fields_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    firestore(&server).upsert(&record()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let mut paths: Vec<&str> = body["writes"][0]["updateMask"]["fieldPaths"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    paths.sort_unstable();

    assert_eq!(
        paths,
        vec![
            "body",
            "imageUrl",
            "notifId",
            "productId",
            "productName",
            "read",
            "stock",
            "stockThreshold",
            "title",
        ]
    );
}

#[tokio::test]
async fn firestore_rejection_is_a_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let err = firestore(&server).upsert(&record()).await.unwrap_err();
    match err {
        Error::Store(message) => assert!(message.contains("PERMISSION_DENIED")),
        other => panic!("expected store error, got {other}"),
    }
}

#[tokio::test]
async fn fcm_send_returns_message_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "message": {
                "topic": "lowStockTopic",
                "notification": {"title": "Low Stock Alert !!!"},
                "android": {"notification": {
                    "channel_id": "default_channel",
                    "click_action": "FLUTTER_NOTIFICATION_CLICK"
                }},
                "data": {
                    "notifId": "sp-9_evt-9",
                    "stock": "3",
                    "stockThreshold": "5",
                    "route": "spare_part_detail"
                }
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "projects/demo/messages/0:42"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = PushMessage::for_record(&record(), &AlertRouting::default());
    let name = fcm(&server).publish(&message).await.unwrap();
    assert_eq!(name, "projects/demo/messages/0:42");
}

#[tokio::test]
async fn fcm_rejection_is_a_push_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("INTERNAL"))
        .mount(&server)
        .await;

    let message = PushMessage::for_record(&record(), &AlertRouting::default());
    let err = fcm(&server).publish(&message).await.unwrap_err();
    assert!(matches!(err, Error::Push(_)));
}

#[tokio::test]
async fn metadata_token_is_fetched_once_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .and(header("metadata-flavor", "Google"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.token",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source = MetadataTokenSource::new(Client::new(), &root(&server)).unwrap();
    assert_eq!(source.token().await.unwrap(), "ya29.token");
    assert_eq!(source.token().await.unwrap(), "ya29.token");
}

#[tokio::test]
async fn metadata_failure_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = MetadataTokenSource::new(Client::new(), &root(&server)).unwrap();
    assert!(matches!(source.token().await, Err(Error::Auth(_))));
}

#[tokio::test]
async fn token_failure_stops_the_write() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMMIT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let metadata = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&metadata)
        .await;
    let tokens: Arc<dyn TokenSource> =
        Arc::new(MetadataTokenSource::new(Client::new(), &root(&metadata)).unwrap());

    let store = FirestoreStore::new(
        Client::new(),
        &root(&server),
        "demo",
        "(default)",
        "notification",
        tokens,
    )
    .unwrap();

    assert!(store.upsert(&record()).await.is_err());
}
