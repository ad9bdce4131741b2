use intake_api_rest::{RestServerConfig, ValidationLogPolicy};
use intake_config::{Config, LogValidationErrors};
use intake_core_health_impl::HealthFeatureConfig;
use intake_core_submission_impl::dispatch::SubmissionDispatchConfig;
use intake_di::provider;
use types::Queue;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        queue: Queue,
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Core
            HealthFeatureConfig,
            SubmissionDispatchConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, queue: Queue) -> Self {
        Self {
            _cache: Default::default(),
            queue,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Core
        health_feature_config: HealthFeatureConfig,
        submission_dispatch_config: SubmissionDispatchConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            validation_log_policy: match config.submission.log_validation_errors {
                LogValidationErrors::Json => ValidationLogPolicy::Json,
                LogValidationErrors::Always => ValidationLogPolicy::Always,
                LogValidationErrors::Never => ValidationLogPolicy::Never,
            },
        };

        // Core
        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        let submission_dispatch_config = SubmissionDispatchConfig {
            queue: config.queue.name.as_str().into(),
        };

        Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Core
            health_feature_config,
            submission_dispatch_config,
        }
    }
}
