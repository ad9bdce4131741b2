use std::net::IpAddr;

use aide::axum::ApiRouter;
use axum::Router;
use intake_core_health_contracts::HealthFeatureService;
use intake_core_submission_contracts::SubmissionFeatureService;
use intake_di::Build;
use intake_utils::intake_version;
use tokio::net::TcpListener;
use tracing::info;

pub use crate::errors::{ErrorReporter, ValidationLogPolicy};

mod docs;
mod errors;
mod extractors;
mod macros;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Submission> {
    pub health: Health,
    pub submission: Submission,
    pub config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub validation_log_policy: ValidationLogPolicy,
}

impl<Health, Submission> RestServer<Health, Submission>
where
    Health: HealthFeatureService,
    Submission: SubmissionFeatureService,
{
    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!(version = intake_version(), "listening on {host}:{port}");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let reporter = ErrorReporter {
            validation_log_policy: self.config.validation_log_policy,
        };

        let mut api = docs::openapi();
        let router = ApiRouter::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::submission::router(
                self.submission.into(),
                reporter,
            ))
            .finish_api(&mut api)
            .merge(docs::router(api));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
