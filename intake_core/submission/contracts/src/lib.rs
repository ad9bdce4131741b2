use std::future::Future;

use intake_models::submission::{RawSubmission, ValidationErrors};
use thiserror::Error;

use crate::dispatch::SubmissionDispatchError;

pub mod dispatch;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionFeatureService: Send + Sync + 'static {
    /// Validate a submission and enqueue it for processing.
    ///
    /// Nothing is enqueued unless every field is valid.
    fn submit(
        &self,
        submission: RawSubmission,
    ) -> impl Future<Output = Result<(), SubmissionSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmissionSubmitError {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error("Failed to dispatch submission.")]
    Dispatch(#[from] SubmissionDispatchError),
}

#[cfg(feature = "mock")]
impl MockSubmissionFeatureService {
    pub fn with_submit(
        mut self,
        submission: RawSubmission,
        result: Result<(), SubmissionSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
