use std::future::Future;

use intake_models::submission::Submission;
use thiserror::Error;

/// Hands validated submissions over to the work queue.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionDispatchService: Send + Sync + 'static {
    /// Enqueue a submission for out-of-band processing.
    ///
    /// Returns once the queue backend has accepted the job. Failures are not
    /// retried.
    fn dispatch(
        &self,
        submission: Submission,
    ) -> impl Future<Output = Result<(), SubmissionDispatchError>> + Send;
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct SubmissionDispatchError(#[from] pub anyhow::Error);

#[cfg(feature = "mock")]
impl MockSubmissionDispatchService {
    pub fn with_dispatch(mut self, submission: Submission) -> Self {
        self.expect_dispatch()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_dispatch_error(mut self, submission: Submission, error: &'static str) -> Self {
        self.expect_dispatch()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(Err(SubmissionDispatchError(
                    anyhow::anyhow!(error),
                ))))
            });
        self
    }
}
