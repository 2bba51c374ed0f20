use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, JobId, JobRequirement, RankedApplicant, RawApplication};

/// Read side of the managed database: postings and their pending applications.
pub trait JobRepository: Send + Sync {
    fn job(&self, id: &JobId) -> Result<Option<JobRequirement>, RepositoryError>;
    fn pending_applications(&self, id: &JobId) -> Result<Vec<RawApplication>, RepositoryError>;
}

/// Result sink for ranked applicants, keyed by application id. Writes are last-write-wins.
///
/// A re-rank calls `clear` first, so a job's stored ranking only ever holds entries from its
/// latest successful run.
pub trait RankingStore: Send + Sync {
    fn store(&self, job_id: &JobId, ranked: &RankedApplicant) -> Result<(), RepositoryError>;
    /// Drop every stored entry for the job.
    fn clear(&self, job_id: &JobId) -> Result<(), RepositoryError>;
    fn rankings(&self, job_id: &JobId) -> Result<Vec<RankedApplicant>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("write rejected: {0}")]
    Rejected(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// A ranked entry the sink refused; the ranking itself stays valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceFailure {
    pub application_id: ApplicationId,
    pub error: String,
}
