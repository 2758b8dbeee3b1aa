use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use lowstock::adapter::inbound::http::{router, ReceiverState};
use lowstock::application::LowStockNotifier;
use lowstock::domain::AlertRouting;
use lowstock::testkit::push::RecordingPush;
use lowstock::testkit::store::{FailingStore, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const UPDATED: &str = "google.cloud.firestore.document.v1.updated";

fn doc_name(collection: &str, id: &str) -> String {
    format!("projects/demo/databases/(default)/documents/{collection}/{id}")
}

fn update_body(collection: &str, id: &str, before: i64, after: i64, threshold: i64) -> Value {
    let name = doc_name(collection, id);
    json!({
        "oldValue": {
            "name": name,
            "fields": {"stock": {"integerValue": before.to_string()}}
        },
        "value": {
            "name": name,
            "fields": {
                "name": {"stringValue": "Air Filter"},
                "stock": {"integerValue": after.to_string()},
                "stockThreshold": {"integerValue": threshold.to_string()}
            }
        }
    })
}

fn event(event_id: &str, event_type: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .header("ce-id", event_id)
        .header("ce-type", event_type)
        .header("ce-source", "//firestore.googleapis.com/projects/demo/databases/(default)")
        .header("ce-specversion", "1.0")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn app(store: Arc<MemoryStore>, push: Arc<RecordingPush>) -> Router {
    let notifier = LowStockNotifier::new(store, push, AlertRouting::default());
    router(Arc::new(ReceiverState::new(Arc::new(notifier), "spare_part")))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn crossing_event_is_notified() {
    let store = Arc::new(MemoryStore::new());
    let push = Arc::new(RecordingPush::new());
    let app = app(store.clone(), push.clone());

    let response = app
        .oneshot(event("evt-100", UPDATED, &update_body("spare_part", "sp-1", 12, 7, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["outcome"], "notified");
    assert_eq!(body["notif_id"], "sp-1_evt-100");
    assert_eq!(body["push"]["status"], "sent");

    let doc = store.get("sp-1_evt-100").unwrap();
    assert_eq!(doc["productName"], "Air Filter");
    assert_eq!(push.len(), 1);
}

#[tokio::test]
async fn auth_context_variant_is_accepted() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone(), Arc::new(RecordingPush::new()));

    let response = app
        .oneshot(event(
            "evt-101",
            "google.cloud.firestore.document.v1.updated.withAuthContext",
            &update_body("spare_part", "sp-1", 12, 7, 10),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn no_crossing_is_acknowledged_as_skip() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone(), Arc::new(RecordingPush::new()));

    let response = app
        .oneshot(event("evt-102", UPDATED, &update_body("spare_part", "sp-1", 20, 20, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["outcome"], "skipped");
    assert_eq!(body["reason"], "no_crossing");
    assert!(store.is_empty());
}

#[tokio::test]
async fn foreign_collection_is_acknowledged_without_handling() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone(), Arc::new(RecordingPush::new()));

    let response = app
        .oneshot(event("evt-103", UPDATED, &update_body("orders", "o-1", 12, 7, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["reason"], "foreign_collection");
    assert!(store.is_empty());
}

#[tokio::test]
async fn deletion_event_is_acknowledged() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone(), Arc::new(RecordingPush::new()));
    let body = json!({
        "oldValue": {
            "name": doc_name("spare_part", "sp-1"),
            "fields": {"stock": {"integerValue": "4"}}
        }
    });

    let response = app
        .oneshot(event(
            "evt-104",
            "google.cloud.firestore.document.v1.deleted",
            &body,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["outcome"], "deleted");
    assert!(store.is_empty());
}

#[tokio::test]
async fn missing_event_id_is_rejected() {
    let app = app(Arc::new(MemoryStore::new()), Arc::new(RecordingPush::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("ce-type", UPDATED)
        .body(Body::from(
            update_body("spare_part", "sp-1", 12, 7, 10).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn unrelated_event_type_is_rejected() {
    let app = app(Arc::new(MemoryStore::new()), Arc::new(RecordingPush::new()));

    let response = app
        .oneshot(event(
            "evt-105",
            "google.cloud.storage.object.v1.finalized",
            &update_body("spare_part", "sp-1", 12, 7, 10),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn garbage_body_is_rejected() {
    let app = app(Arc::new(MemoryStore::new()), Arc::new(RecordingPush::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("ce-id", "evt-106")
        .header("ce-type", UPDATED)
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn store_failure_requests_redelivery() {
    let notifier = LowStockNotifier::new(
        Arc::new(FailingStore),
        Arc::new(RecordingPush::new()),
        AlertRouting::default(),
    );
    let app = router(Arc::new(ReceiverState::new(Arc::new(notifier), "spare_part")));

    let response = app
        .oneshot(event("evt-107", UPDATED, &update_body("spare_part", "sp-1", 12, 7, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = app(Arc::new(MemoryStore::new()), Arc::new(RecordingPush::new()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}
