//! Exercises the HTTP gateway against a live router bound to an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use jobfunnel::funnel::FunnelStage;
use jobfunnel::tracker::{
    application_router, ApplicationDraft, ApplicationGateway, ApplicationId, ApplicationPatch,
    ApplicationStatus, ApplicationStore, GatewayError, HttpGateway, InMemoryGateway,
    ValidationError,
};

async fn spawn_server() -> SocketAddr {
    let today = NaiveDate::from_ymd_opt(2025, 8, 1).expect("valid date");
    let gateway = Arc::new(InMemoryGateway::new().with_today(today));
    let store = Arc::new(ApplicationStore::new(gateway));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, application_router(store))
            .await
            .expect("server runs");
    });

    addr
}

fn remote(addr: SocketAddr) -> HttpGateway {
    HttpGateway::new(format!("http://{addr}"), Duration::from_secs(5)).expect("client builds")
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_store_mirrors_server_state() {
    let addr = spawn_server().await;

    let edges = tokio::task::spawn_blocking(move || {
        let store = ApplicationStore::new(Arc::new(remote(addr)));
        let date = NaiveDate::from_ymd_opt(2025, 8, 4).expect("valid date");

        store
            .create(ApplicationDraft::new("Acme", "SRE"))
            .expect("remote create");
        let created = store
            .create(
                ApplicationDraft::new("Globex", "SRE")
                    .with_status(date, ApplicationStatus::Applied)
                    .with_status(date, ApplicationStatus::Screen),
            )
            .expect("remote create");

        assert_eq!(store.snapshot().len(), 2);
        assert!(store.last_error().is_none());

        let fetched = store.get(&created.id).expect("remote fetch");
        assert_eq!(fetched, created);

        store
            .update(
                &created.id,
                ApplicationPatch {
                    recruiter_company: Some("Talent Partners".to_string()),
                    ..ApplicationPatch::default()
                },
            )
            .expect("remote update");

        store.edges()
    })
    .await
    .expect("blocking task joins");

    assert!(edges
        .iter()
        .any(|edge| edge.from == FunnelStage::Applied && edge.to == FunnelStage::NoResponse));
    assert!(edges
        .iter()
        .any(|edge| edge.from == FunnelStage::Responded && edge.to == FunnelStage::Interview));
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_errors_map_onto_gateway_taxonomy() {
    let addr = spawn_server().await;

    tokio::task::spawn_blocking(move || {
        let gateway = remote(addr);

        match gateway.create(ApplicationDraft::new("", "SRE")) {
            Err(GatewayError::Validation(ValidationError::Rejected(message))) => {
                assert!(message.contains("company"))
            }
            other => panic!("expected validation rejection, got {other:?}"),
        }

        let missing = ApplicationId::from("app-404404");
        match gateway.delete(&missing) {
            Err(GatewayError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected not found, got {other:?}"),
        }
    })
    .await
    .expect("blocking task joins");
}

/// Builds the blocking client off the async workers.
async fn remote_store(base_url: String) -> Arc<ApplicationStore<HttpGateway>> {
    tokio::task::spawn_blocking(move || {
        let gateway = HttpGateway::new(base_url, Duration::from_millis(500)).expect("client builds");
        Arc::new(ApplicationStore::new(Arc::new(gateway)))
    })
    .await
    .expect("blocking task joins")
}

async fn release(store: Arc<ApplicationStore<HttpGateway>>) {
    tokio::task::spawn_blocking(move || drop(store))
        .await
        .expect("blocking task joins");
}

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route responds");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json payload")
    };
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

#[tokio::test(flavor = "multi_thread")]
async fn router_over_remote_gateway_proxies_requests() {
    let addr = spawn_server().await;
    let store = remote_store(format!("http://{addr}")).await;
    let router = application_router(store.clone());

    let create = Request::post("/api/v1/applications")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "company": "Acme", "role": "SRE" }).to_string(),
        ))
        .expect("request");
    let (status, created) = call(&router, create).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "app-000001");

    let (status, fetched) = call(&router, get("/api/v1/applications/app-000001")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["company"], "Acme");

    let (status, _) = call(&router, get("/api/v1/applications/app-404404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, graph) = call(&router, get("/api/v1/reports/funnel")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(graph["totalApplications"], 1);

    drop(router);
    release(store).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn router_over_unreachable_gateway_answers_bad_gateway() {
    let store = remote_store("http://127.0.0.1:9".to_string()).await;
    let router = application_router(store.clone());

    let (status, body) = call(&router, get("/api/v1/applications/app-000001")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().is_some());

    drop(router);
    release(store).await;
}
