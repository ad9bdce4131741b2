use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{router, send};
use intake_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use intake_core_submission_contracts::MockSubmissionFeatureService;
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;

fn request() -> Request<Body> {
    Request::get("/health").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthy() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { queue: true });
    let router = router(health, MockSubmissionFeatureService::new());

    // Act
    let (status, body) = send(router, request()).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "http": true, "queue": true }));
}

#[tokio::test]
async fn queue_unavailable() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { queue: false });
    let router = router(health, MockSubmissionFeatureService::new());

    // Act
    let (status, body) = send(router, request()).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "http": true, "queue": false }));
}
