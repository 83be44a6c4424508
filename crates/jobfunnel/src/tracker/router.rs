use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{ApplicationDraft, ApplicationId, ApplicationPatch};
use super::gateway::{ApplicationGateway, GatewayError};
use super::store::ApplicationStore;

/// Router exposing CRUD over the store plus the funnel report.
///
/// Gateway calls run on tokio's blocking pool, so blocking gateways such as
/// [`HttpGateway`](super::HttpGateway) are safe to mount.
pub fn application_router<G>(store: Arc<ApplicationStore<G>>) -> Router
where
    G: ApplicationGateway + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            get(list_handler::<G>).post(create_handler::<G>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(fetch_handler::<G>)
                .patch(update_handler::<G>)
                .delete(delete_handler::<G>),
        )
        .route("/api/v1/reports/funnel", get(funnel_handler::<G>))
        .with_state(store)
}

fn error_response(error: GatewayError) -> Response {
    let status = match &error {
        GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
        GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GatewayError::Transport(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

/// Runs a store call off the async workers and maps its failure to a response.
async fn with_store<G, T, F>(store: Arc<ApplicationStore<G>>, call: F) -> Result<T, Response>
where
    G: ApplicationGateway + 'static,
    T: Send + 'static,
    F: FnOnce(&ApplicationStore<G>) -> Result<T, GatewayError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&store)).await {
        Ok(result) => result.map_err(error_response),
        Err(join_error) => {
            error!(error = %join_error, "store task failed");
            let payload = json!({ "error": "internal server error" });
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response())
        }
    }
}

pub(crate) async fn list_handler<G>(State(store): State<Arc<ApplicationStore<G>>>) -> Response
where
    G: ApplicationGateway + 'static,
{
    let snapshot = store.snapshot();
    (StatusCode::OK, Json(snapshot.to_vec())).into_response()
}

pub(crate) async fn create_handler<G>(
    State(store): State<Arc<ApplicationStore<G>>>,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    G: ApplicationGateway + 'static,
{
    match with_store(store, move |store| store.create(draft)).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn fetch_handler<G>(
    State(store): State<Arc<ApplicationStore<G>>>,
    Path(application_id): Path<String>,
) -> Response
where
    G: ApplicationGateway + 'static,
{
    let id = ApplicationId(application_id);
    match with_store(store, move |store| store.get(&id)).await {
        Ok(application) => (StatusCode::OK, Json(application)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn update_handler<G>(
    State(store): State<Arc<ApplicationStore<G>>>,
    Path(application_id): Path<String>,
    Json(patch): Json<ApplicationPatch>,
) -> Response
where
    G: ApplicationGateway + 'static,
{
    let id = ApplicationId(application_id);
    match with_store(store, move |store| store.update(&id, patch)).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn delete_handler<G>(
    State(store): State<Arc<ApplicationStore<G>>>,
    Path(application_id): Path<String>,
) -> Response
where
    G: ApplicationGateway + 'static,
{
    let id = ApplicationId(application_id);
    match with_store(store, move |store| store.delete(&id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn funnel_handler<G>(State(store): State<Arc<ApplicationStore<G>>>) -> Response
where
    G: ApplicationGateway + 'static,
{
    (StatusCode::OK, Json(store.funnel())).into_response()
}
