//! End-to-end upsert behaviour of `DogSync` against a wiremock Admin API.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dogsync_shopify::{
    DogSync, LocateOutcome, ShopifyAdminClient, SyncAction, SyncError, SyncObserver, SyncOutcome,
    WriteKind,
};

fn sync_for(server: &MockServer) -> DogSync {
    let client = ShopifyAdminClient::with_base_url("shpat_test", 5, "dogsync-test/0.1", &server.uri())
        .expect("client construction should not fail");
    DogSync::new(client)
}

fn maple() -> Value {
    json!({
        "Id": "24-108",
        "DogName": "Maple",
        "Breed": "Shepherd mix",
        "Code": "Nursery - accepting deposits",
        "MainPhoto": [{"File": "https://files.example/maple.jpg?token=abc"}]
    })
}

#[tokio::test]
async fn first_sync_creates_then_second_sync_updates_same_product() {
    let server = MockServer::start().await;

    // First lookup finds nothing; every later lookup sees the created product.
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("handle", "dog-24-108"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("handle", "dog-24-108"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 9001, "handle": "dog-24-108", "title": "Maple"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products.json"))
        .and(body_partial_json(json!({"product": {"handle": "dog-24-108"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "product": {"id": 9001, "handle": "dog-24-108", "title": "Maple"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/products/9001.json"))
        .and(body_partial_json(json!({
            "product": {"id": 9001, "handle": "dog-24-108", "title": "Maple Leaf"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {"id": 9001, "handle": "dog-24-108", "title": "Maple Leaf"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sync = sync_for(&server);

    let created = sync.run(&maple()).await.expect("first sync should create");
    assert_eq!(created.action, SyncAction::Created);
    assert_eq!(created.handle, "dog-24-108");
    assert_eq!(created.product["id"], 9001);

    let mut renamed = maple();
    renamed["DogName"] = json!("Maple Leaf");
    let updated = sync.run(&renamed).await.expect("second sync should update");
    assert_eq!(updated.action, SyncAction::Updated);
    assert_eq!(updated.handle, "dog-24-108");
    assert_eq!(updated.product["id"], 9001);
}

#[tokio::test]
async fn create_payload_carries_mapped_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products.json"))
        .and(body_partial_json(json!({
            "product": {
                "title": "Maple",
                "handle": "dog-24-108",
                "tags": "Available Soon: Nursery, Breed: Shepherd mix",
                "images": [{"src": "https://files.example/maple.jpg?token=abc"}],
                "status": "active",
                "product_type": "Dog"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"product": {"id": 1}})))
        .expect(1)
        .mount(&server)
        .await;

    sync_for(&server)
        .run(&maple())
        .await
        .expect("sync should succeed");
}

#[tokio::test]
async fn missing_identifier_makes_no_downstream_calls() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = sync_for(&server)
        .run(&json!({"DogName": "Nameless"}))
        .await
        .unwrap_err();
    assert!(
        matches!(err, SyncError::MissingIdentifier { .. }),
        "expected MissingIdentifier, got: {err:?}"
    );
}

#[tokio::test]
async fn failed_lookup_falls_back_to_create() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "product": {"id": 5, "handle": "dog-24-108"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = sync_for(&server).run(&maple()).await.expect("create should proceed");
    assert_eq!(outcome.action, SyncAction::Created);
}

#[tokio::test]
async fn rejected_create_reports_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(422).set_body_string("handle already taken"))
        .mount(&server)
        .await;

    let err = sync_for(&server).run(&maple()).await.unwrap_err();
    match err {
        SyncError::DownstreamWrite {
            kind,
            status,
            body,
            handle,
            product_id,
        } => {
            assert_eq!(kind, WriteKind::Create);
            assert_eq!(status, 422);
            assert_eq!(body, "handle already taken");
            assert_eq!(handle, "dog-24-108");
            assert_eq!(product_id, None);
        }
        other => panic!("expected DownstreamWrite, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_update_reports_product_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 31, "handle": "dog-24-108"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/31.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = sync_for(&server).run(&maple()).await.unwrap_err();
    assert!(
        matches!(
            err,
            SyncError::DownstreamWrite { kind: WriteKind::Update, status: 500, product_id: Some(31), .. }
        ),
        "expected DownstreamWrite(update), got: {err:?}"
    );
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl SyncObserver for Recorder {
    fn received(&self, _raw: &Value) {
        self.events.lock().unwrap().push("received".to_owned());
    }

    fn mapped(&self, _record: &dogsync_core::DogRecord) {
        self.events.lock().unwrap().push("mapped".to_owned());
    }

    fn located(&self, handle: &str, outcome: &LocateOutcome) {
        let kind = match outcome {
            LocateOutcome::Found(_) => "found",
            LocateOutcome::NotFound => "not_found",
            LocateOutcome::Degraded(_) => "degraded",
        };
        self.events
            .lock()
            .unwrap()
            .push(format!("located:{handle}:{kind}"));
    }

    fn written(&self, outcome: &SyncOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(format!("written:{}", outcome.action));
    }
}

#[tokio::test]
async fn observer_sees_each_lifecycle_stage() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"product": {"id": 1}})))
        .mount(&server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let client = ShopifyAdminClient::with_base_url("shpat_test", 5, "dogsync-test/0.1", &server.uri())
        .unwrap();
    let sync = DogSync::with_observer(client, recorder.clone());

    sync.run(&maple()).await.expect("sync should succeed");

    assert_eq!(
        *recorder.events.lock().unwrap(),
        vec![
            "received".to_owned(),
            "mapped".to_owned(),
            "located:dog-24-108:degraded".to_owned(),
            "written:created".to_owned(),
        ]
    );
}
