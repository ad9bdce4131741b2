use std::sync::Arc;

use anyhow::Context;
use intake_core_submission_contracts::dispatch::{
    SubmissionDispatchError, SubmissionDispatchService,
};
use intake_di::Build;
use intake_models::{job::Job, submission::Submission};
use intake_queue_contracts::QueueService;
use intake_shared_contracts::{id::IdService, time::TimeService};
use intake_utils::trace_instrument;
use tracing::debug;

#[derive(Debug, Clone, Build)]
pub struct SubmissionDispatchServiceImpl<Id, Time, Queue> {
    id: Id,
    time: Time,
    queue: Queue,
    config: SubmissionDispatchConfig,
}

#[derive(Debug, Clone)]
pub struct SubmissionDispatchConfig {
    /// Name of the queue submissions are pushed onto.
    pub queue: Arc<str>,
}

impl<Id, Time, Queue> SubmissionDispatchService for SubmissionDispatchServiceImpl<Id, Time, Queue>
where
    Id: IdService,
    Time: TimeService,
    Queue: QueueService,
{
    #[trace_instrument(skip(self))]
    async fn dispatch(&self, submission: Submission) -> Result<(), SubmissionDispatchError> {
        let job = Job::process_submission(self.id.generate(), submission, self.time.now());

        self.queue
            .push(&self.config.queue, &job)
            .await
            .context("Failed to enqueue submission")?;

        debug!(job.id = %job.id, queue = %self.config.queue, "submission queued");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use intake_demo::{
        job::{JOB1, QUEUED_AT},
        submission::SUBMISSION1,
    };
    use intake_queue_contracts::MockQueueService;
    use intake_shared_contracts::{id::MockIdService, time::MockTimeService};

    use super::*;

    fn config() -> SubmissionDispatchConfig {
        SubmissionDispatchConfig {
            queue: "submissions".into(),
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let id = MockIdService::new().with_generate(JOB1.id);
        let time = MockTimeService::new().with_now(*QUEUED_AT);
        let queue = MockQueueService::new().with_push("submissions".into(), JOB1.clone());

        let sut = SubmissionDispatchServiceImpl {
            id,
            time,
            queue,
            config: config(),
        };

        // Act
        let result = sut.dispatch(SUBMISSION1.clone()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn queue_unavailable() {
        // Arrange
        let id = MockIdService::new().with_generate(JOB1.id);
        let time = MockTimeService::new().with_now(*QUEUED_AT);
        let queue = MockQueueService::new().with_push_error(
            "submissions".into(),
            JOB1.clone(),
            "Failed to acquire queue connection",
        );

        let sut = SubmissionDispatchServiceImpl {
            id,
            time,
            queue,
            config: config(),
        };

        // Act
        let result = sut.dispatch(SUBMISSION1.clone()).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "Failed to enqueue submission: Failed to acquire queue connection"
        );
    }
}
