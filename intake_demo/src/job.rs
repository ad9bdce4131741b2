use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use intake_models::job::Job;

use crate::{submission::SUBMISSION1, UUID1};

pub static QUEUED_AT: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2024, 11, 2, 13, 37, 0).unwrap());

pub static JOB1: LazyLock<Job> =
    LazyLock::new(|| Job::process_submission(UUID1.into(), SUBMISSION1.clone(), *QUEUED_AT));
