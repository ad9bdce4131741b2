use std::sync::Arc;

use aide::{
    axum::{routing, ApiRouter},
    transform::TransformOperation,
};
use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core_submission_contracts::{SubmissionFeatureService, SubmissionSubmitError};

use crate::{
    const_schema,
    docs::TransformOperationExt,
    errors::{
        internal_server_error_docs, validation_error_docs, ErrorReporter, Failure,
        SubmissionFailedMessage,
    },
    extractors::{expects_json::ExpectsJson, submission_body::SubmissionBody},
    models::ApiMessage,
};

pub const TAG: &str = "Submission";

const_schema! {
    SubmittedMessage("Submitted successfully");
}

pub fn router(
    service: Arc<impl SubmissionFeatureService>,
    reporter: ErrorReporter,
) -> ApiRouter<()> {
    ApiRouter::new()
        .api_route("/api/submit", routing::post_with(submit, submit_docs))
        .with_state((service, reporter))
        .with_path_items(|op| op.tag(TAG))
}

async fn submit(
    State((service, reporter)): State<(Arc<impl SubmissionFeatureService>, ErrorReporter)>,
    expects_json: ExpectsJson,
    body: Result<SubmissionBody, BytesRejection>,
) -> Response {
    let SubmissionBody(submission) = match body {
        Ok(body) => body,
        Err(err) => return reporter.report(Failure::Unhandled(err.into()), expects_json),
    };

    match service.submit(submission).await {
        Ok(()) => Json(ApiMessage {
            message: SubmittedMessage,
        })
        .into_response(),
        Err(SubmissionSubmitError::Invalid(errors)) => {
            reporter.report(Failure::Validation(errors), expects_json)
        }
        Err(SubmissionSubmitError::Dispatch(err)) => {
            reporter.report(Failure::Dispatch(err), expects_json)
        }
    }
}

fn submit_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Submit a message.")
        .description(
            "Validate the submission and queue it for processing. The body may be sent as JSON \
             or as an url encoded form.",
        )
        .add_response::<ApiMessage<SubmittedMessage>>(
            StatusCode::OK,
            "The submission has been queued.",
        )
        .with(validation_error_docs)
        .add_response::<ApiMessage<SubmissionFailedMessage>>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "The submission could not be queued.",
        )
        .with(internal_server_error_docs)
}
