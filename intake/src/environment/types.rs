use intake_core_health_impl::HealthFeatureServiceImpl;
use intake_core_submission_impl::{
    dispatch::SubmissionDispatchServiceImpl, SubmissionFeatureServiceImpl,
};
use intake_queue_valkey::ValkeyQueue;
use intake_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};

// API
pub type RestServer = intake_api_rest::RestServer<HealthFeature, SubmissionFeature>;

// Queue
pub type Queue = ValkeyQueue;

// Shared
pub type Id = IdServiceImpl;
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Queue>;

pub type SubmissionFeature = SubmissionFeatureServiceImpl<SubmissionDispatch>;
pub type SubmissionDispatch = SubmissionDispatchServiceImpl<Id, Time, Queue>;
