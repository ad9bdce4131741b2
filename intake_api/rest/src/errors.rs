//! Mapping of request failures to responses.

use aide::transform::TransformOperation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core_submission_contracts::dispatch::SubmissionDispatchError;
use intake_models::submission::ValidationErrors;
use tracing::error;

use crate::{
    const_schema,
    docs::TransformOperationExt,
    extractors::expects_json::ExpectsJson,
    models::{ApiMessage, ApiValidationError},
};

const_schema! {
    pub SubmissionFailedMessage("Submission Failed");
    pub ServerErrorMessage("Server Error");
}

/// A failure that ends the handling of a request.
#[derive(Debug)]
pub enum Failure {
    /// One or more fields of the request body are invalid.
    Validation(ValidationErrors),
    /// The queue backend did not accept a submission.
    Dispatch(SubmissionDispatchError),
    /// Anything else.
    Unhandled(anyhow::Error),
}

/// Whether validation failures are written to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationLogPolicy {
    /// Only if the client expects a JSON response.
    #[default]
    Json,
    Always,
    Never,
}

impl ValidationLogPolicy {
    fn should_log(self, expects_json: ExpectsJson) -> bool {
        match self {
            Self::Json => expects_json.0,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Turns failures into responses and writes internal details to the log.
///
/// | failure    | status | body                                  | log                           |
/// |------------|--------|---------------------------------------|-------------------------------|
/// | Validation | 422    | `{"message": ..., "errors": {...}}`   | `Validation error: ...` (policy) |
/// | Dispatch   | 500    | `{"message": "Submission Failed"}`    | the error chain               |
/// | Unhandled  | 500    | `{"message": "Server Error"}`         | the error chain               |
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter {
    pub validation_log_policy: ValidationLogPolicy,
}

impl ErrorReporter {
    pub fn report(self, failure: Failure, expects_json: ExpectsJson) -> Response {
        match failure {
            Failure::Validation(errors) => {
                if self.validation_log_policy.should_log(expects_json) {
                    error!("Validation error: {errors}");
                }
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiValidationError::from(errors)),
                )
                    .into_response()
            }
            Failure::Dispatch(err) => {
                error!("{err:#}");
                message(StatusCode::INTERNAL_SERVER_ERROR, SubmissionFailedMessage)
            }
            Failure::Unhandled(err) => internal_server_error(err),
        }
    }
}

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    error!("internal server error: {err:#}");
    message(StatusCode::INTERNAL_SERVER_ERROR, ServerErrorMessage)
}

pub fn internal_server_error_docs(op: TransformOperation) -> TransformOperation {
    op.add_response::<ApiMessage<ServerErrorMessage>>(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An unexpected error occurred.",
    )
}

pub fn validation_error_docs(op: TransformOperation) -> TransformOperation {
    op.add_response::<ApiValidationError>(
        StatusCode::UNPROCESSABLE_ENTITY,
        "The request body is invalid.",
    )
}

pub fn message(code: StatusCode, message: impl serde::Serialize) -> Response {
    (code, Json(ApiMessage { message })).into_response()
}
