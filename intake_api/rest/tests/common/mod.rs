#![allow(dead_code, reason = "not every test binary uses every helper")]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use intake_api_rest::{RestServer, RestServerConfig, ValidationLogPolicy};
use intake_core_health_contracts::MockHealthFeatureService;
use intake_core_submission_contracts::MockSubmissionFeatureService;
use tower::ServiceExt;

pub fn router(
    health: MockHealthFeatureService,
    submission: MockSubmissionFeatureService,
) -> Router {
    RestServer {
        health,
        submission,
        config: RestServerConfig {
            validation_log_policy: ValidationLogPolicy::Json,
        },
    }
    .router()
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("accept", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}
