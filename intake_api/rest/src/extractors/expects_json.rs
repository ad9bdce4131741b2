use std::convert::Infallible;

use aide::OperationInput;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts, HeaderMap},
};

/// Whether the client asked for a JSON response.
///
/// This is the case if the preferred media type in `Accept` is JSON, or if
/// the request was sent by a script (`X-Requested-With: XMLHttpRequest`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectsJson(pub bool);

impl ExpectsJson {
    fn from_headers(headers: &HeaderMap) -> Self {
        let ajax = headers
            .get("x-requested-with")
            .is_some_and(|x| x.as_bytes().eq_ignore_ascii_case(b"XMLHttpRequest"));

        let wants_json = headers
            .get(ACCEPT)
            .and_then(|x| x.to_str().ok())
            .and_then(|x| x.split(',').next())
            .and_then(|x| x.split(';').next())
            .map(|x| x.trim().to_ascii_lowercase())
            .is_some_and(|x| x.ends_with("/json") || x.ends_with("+json"));

        Self(ajax || wants_json)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ExpectsJson {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl OperationInput for ExpectsJson {}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn expects_json(headers: &[(&'static str, &'static str)]) -> bool {
        let headers = headers
            .iter()
            .map(|&(k, v)| (k.parse().unwrap(), HeaderValue::from_static(v)))
            .collect::<HeaderMap>();
        ExpectsJson::from_headers(&headers).0
    }

    #[test]
    fn accept() {
        assert!(expects_json(&[("accept", "application/json")]));
        assert!(expects_json(&[("accept", "application/problem+json")]));
        assert!(expects_json(&[("accept", "Application/JSON; charset=utf-8")]));
        assert!(expects_json(&[("accept", "application/json, text/html")]));
        assert!(!expects_json(&[("accept", "text/html, application/json")]));
        assert!(!expects_json(&[("accept", "*/*")]));
        assert!(!expects_json(&[]));
    }

    #[test]
    fn ajax() {
        assert!(expects_json(&[("x-requested-with", "XMLHttpRequest")]));
        assert!(expects_json(&[
            ("accept", "text/html"),
            ("x-requested-with", "xmlhttprequest"),
        ]));
        assert!(!expects_json(&[("x-requested-with", "fetch")]));
    }
}
