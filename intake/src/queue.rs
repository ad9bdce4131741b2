use intake_config::QueueConfig;
use intake_queue_valkey::{ValkeyQueue, ValkeyQueueConfig};

/// Connect to the Valkey queue backend
pub async fn connect(config: &QueueConfig) -> anyhow::Result<ValkeyQueue> {
    ValkeyQueue::connect(&ValkeyQueueConfig {
        url: config.url.clone(),
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        acquire_timeout: config.acquire_timeout.into(),
        idle_timeout: config.idle_timeout.map(Into::into),
        max_lifetime: config.max_lifetime.map(Into::into),
    })
    .await
}
