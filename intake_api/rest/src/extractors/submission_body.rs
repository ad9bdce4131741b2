use aide::{gen::GenContext, openapi::Operation, OperationInput};
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use intake_models::submission::{RawSubmission, RawValue, Submission};
use serde_json::{Map, Value};

/// The unvalidated body of a submission, sent either as JSON or as an url
/// encoded form.
///
/// A JSON body that is malformed or not an object yields an empty submission,
/// so the client gets the usual validation errors instead of a parser error.
#[derive(Debug)]
pub struct SubmissionBody(pub RawSubmission);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for SubmissionBody {
    type Rejection = BytesRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&request) {
            let fields = Form::<Vec<(String, String)>>::from_request(request, state)
                .await
                .map(|Form(fields)| fields)
                .unwrap_or_default();
            return Ok(Self(fields.into_iter().collect()));
        }

        let body = Bytes::from_request(request, state).await?;
        Ok(Self(from_json(&body)))
    }
}

impl OperationInput for SubmissionBody {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<Submission>::operation_input(ctx, operation);
    }
}

fn is_form(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.split(';').next())
        .is_some_and(|x| {
            x.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

fn from_json(body: &[u8]) -> RawSubmission {
    serde_json::from_slice::<Map<String, Value>>(body)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(text) => RawValue::Text(text),
                _ => RawValue::Other,
            };
            Some((key, value))
        })
        .collect()
}
