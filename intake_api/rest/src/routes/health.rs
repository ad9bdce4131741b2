use std::sync::Arc;

use aide::{
    axum::{routing, ApiRouter},
    transform::TransformOperation,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core_health_contracts::{HealthFeatureService, HealthStatus};
use schemars::JsonSchema;
use serde::Serialize;

use crate::docs::TransformOperationExt;

pub const TAG: &str = "Health";

pub fn router(service: Arc<impl HealthFeatureService>) -> ApiRouter<()> {
    ApiRouter::new()
        .api_route("/health", routing::get_with(health, health_docs))
        .with_state(service)
        .with_path_items(|op| op.tag(TAG))
}

#[derive(Serialize, JsonSchema)]
struct HealthResponse {
    /// Always `true` if the server responds at all
    http: bool,
    /// Whether the queue backend is reachable
    queue: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;
    let HealthStatus { queue } = status;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(HealthResponse { http: true, queue })).into_response()
}

fn health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Return the health status of the service.")
        .add_response::<HealthResponse>(StatusCode::OK, "All backends are reachable.")
        .add_response::<HealthResponse>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "At least one backend is unreachable.",
        )
}
