use std::future::Future;

use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait QueueService: Send + Sync + 'static {
    /// Appends a job to the end of the queue with the given name.
    ///
    /// Returns as soon as the backend has accepted the job. Jobs are consumed
    /// in FIFO order by an external worker.
    fn push<T: Serialize + Sync + 'static>(
        &self,
        queue: &str,
        job: &T,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Verify the connection to the queue backend.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockQueueService {
    pub fn with_push<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        queue: String,
        job: T,
    ) -> Self {
        self.expect_push()
            .once()
            .with(mockall::predicate::eq(queue), mockall::predicate::eq(job))
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_push_error<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        queue: String,
        job: T,
        error: &'static str,
    ) -> Self {
        self.expect_push()
            .once()
            .with(mockall::predicate::eq(queue), mockall::predicate::eq(job))
            .return_once(move |_, _| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if ok {
                Ok(())
            } else {
                Err(anyhow::anyhow!("Connection refused"))
            }))
        });
        self
    }
}
