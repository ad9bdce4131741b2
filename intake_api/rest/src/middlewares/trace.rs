use std::time::Duration;

use axum::{
    extract::{MatchedPath, Request},
    response::Response,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, Span};

use super::request_id::RequestId;

/// Wrap every request in a `http-request` span and log its start and end.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(|_: &Request, _: &Span| debug!("request received"))
            .on_response(log_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn request_span(request: &Request) -> Span {
    let extensions = request.extensions();
    let request_id = extensions.get::<RequestId>().copied();
    let route = extensions
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or_default();

    tracing::debug_span!(
        "http-request",
        method = %request.method(),
        uri = %request.uri(),
        route,
        request_id = request_id.map(tracing::field::display),
    )
}

fn log_response(response: &Response, latency: Duration, _span: &Span) {
    debug!(?latency, status = %response.status(), "response sent")
}
