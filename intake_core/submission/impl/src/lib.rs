use intake_core_submission_contracts::{
    dispatch::SubmissionDispatchService, SubmissionFeatureService, SubmissionSubmitError,
};
use intake_di::Build;
use intake_models::submission::{RawSubmission, Validation};
use intake_utils::trace_instrument;

pub mod dispatch;
pub mod validation;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build, Default)]
pub struct SubmissionFeatureServiceImpl<Dispatch> {
    dispatch: Dispatch,
}

impl<Dispatch> SubmissionFeatureService for SubmissionFeatureServiceImpl<Dispatch>
where
    Dispatch: SubmissionDispatchService,
{
    #[trace_instrument(skip(self))]
    async fn submit(&self, submission: RawSubmission) -> Result<(), SubmissionSubmitError> {
        let submission = match validation::validate(&submission) {
            Validation::Valid(submission) => submission,
            Validation::Invalid(errors) => return Err(SubmissionSubmitError::Invalid(errors)),
        };

        self.dispatch.dispatch(submission).await?;

        Ok(())
    }
}
