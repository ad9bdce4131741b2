use std::time::Duration;

use anyhow::Context;
use bb8_redis::{
    bb8::Pool,
    redis::{self, AsyncCommands},
    RedisConnectionManager,
};
use intake_queue_contracts::QueueService;
use intake_utils::trace_instrument;
use serde::{de::DeserializeOwned, Serialize};

/// Work queue backed by Valkey lists.
///
/// Each named queue is stored in the list `queues:<name>`. Producers append
/// with `RPUSH` and consumers pop from the head, which yields FIFO order.
#[derive(Debug, Clone)]
pub struct ValkeyQueue {
    pool: Pool<RedisConnectionManager>,
}

#[derive(Debug)]
pub struct ValkeyQueueConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl ValkeyQueue {
    pub async fn connect(config: &ValkeyQueueConfig) -> anyhow::Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await?;

        Ok(Self { pool })
    }

    #[cfg(feature = "dummy")]
    pub async fn dummy() -> Self {
        let manager = RedisConnectionManager::new("redis://dummy").unwrap();
        Self {
            pool: Pool::builder().build_unchecked(manager),
        }
    }

    /// Removes and returns the job at the head of the queue.
    pub async fn pop<T: DeserializeOwned>(&self, queue: &str) -> anyhow::Result<Option<T>> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire queue connection")?;

        let payload = conn
            .lpop::<_, Option<String>>(queue_key(queue), None)
            .await
            .context("Failed to pop job from queue")?;

        payload
            .map(|payload| serde_json::from_str(&payload))
            .transpose()
            .context("Failed to deserialize job")
    }

    /// Returns the number of jobs waiting in the queue.
    pub async fn len(&self, queue: &str) -> anyhow::Result<u64> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire queue connection")?;

        conn.llen(queue_key(queue))
            .await
            .context("Failed to get queue length")
    }

    /// Drops all jobs waiting in the queue.
    pub async fn clear(&self, queue: &str) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire queue connection")?;

        conn.del(queue_key(queue))
            .await
            .context("Failed to clear queue")
    }
}

impl QueueService for ValkeyQueue {
    #[trace_instrument(skip(self, job))]
    async fn push<T: Serialize + Sync + 'static>(&self, queue: &str, job: &T) -> anyhow::Result<()> {
        let payload = serde_json::to_string(job).context("Failed to serialize job")?;

        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire queue connection")?;

        conn.rpush(queue_key(queue), payload)
            .await
            .context("Failed to push job onto queue")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire queue connection")?;

        redis::cmd("PING")
            .exec_async(&mut *conn)
            .await
            .context("Failed to ping queue")
    }
}

fn queue_key(queue: &str) -> String {
    format!("queues:{queue}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key() {
        assert_eq!(queue_key("default"), "queues:default");
        assert_eq!(queue_key("submissions"), "queues:submissions");
    }
}
