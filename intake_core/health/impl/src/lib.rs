use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use intake_core_health_contracts::{HealthFeatureService, HealthStatus};
use intake_di::Build;
use intake_queue_contracts::QueueService;
use intake_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Queue> {
    time: Time,
    queue: Queue,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl CachedStatus {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Time, Queue> HealthFeatureService for HealthFeatureServiceImpl<Time, Queue>
where
    Time: TimeService,
    Queue: QueueService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let ttl = self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(|c| c.is_fresh(now, ttl)) {
            return cached.status;
        }

        let queue = self
            .queue
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping queue: {err:#}"))
            .is_ok();

        let status = HealthStatus { queue };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use intake_demo::job::QUEUED_AT;
    use intake_queue_contracts::MockQueueService;
    use intake_shared_contracts::time::MockTimeService;
    use pretty_assertions::assert_eq;

    use super::*;

    type Sut = HealthFeatureServiceImpl<MockTimeService, MockQueueService>;

    fn sut(time: MockTimeService, queue: MockQueueService) -> Sut {
        HealthFeatureServiceImpl {
            time,
            queue,
            config: HealthFeatureConfig {
                cache_ttl: Duration::from_secs(10),
            },
            state: Default::default(),
        }
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let time = MockTimeService::new().with_now(*QUEUED_AT);
        let queue = MockQueueService::new().with_ping(true);

        let sut = sut(time, queue);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { queue: true });
        assert!(result.is_healthy());
    }

    #[tokio::test]
    async fn queue_unavailable() {
        // Arrange
        let time = MockTimeService::new().with_now(*QUEUED_AT);
        let queue = MockQueueService::new().with_ping(false);

        let sut = sut(time, queue);

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { queue: false });
        assert!(!result.is_healthy());
    }

    #[tokio::test]
    async fn cached() {
        // Arrange
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for offset in [0, 9] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(*QUEUED_AT + chrono::Duration::seconds(offset));
        }
        let queue = MockQueueService::new().with_ping(true);

        let sut = sut(time, queue);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { queue: true });
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn cache_expired() {
        // Arrange
        let mut time = MockTimeService::new();
        let mut seq = mockall::Sequence::new();
        for offset in [0, 10] {
            time.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(*QUEUED_AT + chrono::Duration::seconds(offset));
        }
        let mut queue = MockQueueService::new();
        let mut results = [Ok(()), Err(anyhow::anyhow!("Connection refused"))].into_iter();
        queue
            .expect_ping()
            .times(2)
            .returning(move || Box::pin(std::future::ready(results.next().unwrap())));

        let sut = sut(time, queue);

        // Act
        let first = sut.get_status().await;
        let second = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { queue: true });
        assert_eq!(second, HealthStatus { queue: false });
    }
}
