use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{macros::id, submission::Submission};

id!(JobId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    ProcessSubmission,
}

/// A record placed onto the work queue for an external worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique per enqueue, allows consumers to drop duplicate deliveries.
    pub id: JobId,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub data: Submission,
    pub queued_at: DateTime<Utc>,
}

impl Job {
    pub fn process_submission(id: JobId, data: Submission, queued_at: DateTime<Utc>) -> Self {
        Self {
            id,
            job_type: JobType::ProcessSubmission,
            data,
            queued_at,
        }
    }
}
