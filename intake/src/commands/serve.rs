use anyhow::Context;
use intake_config::Config;
use intake_di::Provide;
use intake_queue_contracts::QueueService;
use tracing::info;

use crate::{
    environment::{types::RestServer, ConfigProvider, Provider},
    queue,
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to valkey queue");
    let queue = queue::connect(&config.queue).await?;
    queue
        .ping()
        .await
        .context("Failed to reach the queue backend")?;

    let config_provider = ConfigProvider::new(&config);
    let mut provider = Provider::new(config_provider, queue);
    let server: RestServer = provider.provide();

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
