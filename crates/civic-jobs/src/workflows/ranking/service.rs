use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{JobId, JobRequirement, RankedApplicant, RawApplication};
use super::repository::{JobRepository, PersistenceFailure, RankingStore, RepositoryError};
use super::scoring::ScoringWeights;
use super::{RankingEngine, RankingError, RankingOutcome};

/// Service composing the job lookup, the ranking engine, and the result sink.
pub struct RankingService<J, S> {
    jobs: Arc<J>,
    store: Arc<S>,
    engine: Arc<RankingEngine>,
}

impl<J, S> RankingService<J, S>
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    pub fn new(jobs: Arc<J>, store: Arc<S>, weights: ScoringWeights) -> Self {
        Self {
            jobs,
            store,
            engine: Arc::new(RankingEngine::new(weights)),
        }
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Rank the pending applications of a stored job and persist every entry.
    ///
    /// Nothing is written unless the whole batch ranked. The job's previous
    /// ranking is then cleared, so applications that are no longer pending drop
    /// out. Individual write failures are collected in the report rather than
    /// failing the call.
    pub fn rank_job(
        &self,
        job_id: &JobId,
        today: NaiveDate,
    ) -> Result<RankingReport, RankingServiceError> {
        let job = self
            .jobs
            .job(job_id)?
            .ok_or_else(|| RankingServiceError::JobNotFound(job_id.clone()))?;
        let applications = self.jobs.pending_applications(job_id)?;

        let outcome = self.engine.rank(&job, &applications, today)?;
        self.store.clear(job_id)?;
        let persistence_failures = self.persist(job_id, outcome.applicants());

        Ok(RankingReport {
            job_id: job_id.clone(),
            outcome,
            persistence_failures,
        })
    }

    /// Rank an inline batch without touching the repositories.
    pub fn rank_batch(
        &self,
        job: &JobRequirement,
        applications: &[RawApplication],
        today: NaiveDate,
    ) -> Result<RankingOutcome, RankingServiceError> {
        Ok(self.engine.rank(job, applications, today)?)
    }

    /// Previously stored ranking for a job, ordered by rank.
    pub fn rankings(&self, job_id: &JobId) -> Result<Vec<RankedApplicant>, RankingServiceError> {
        if self.jobs.job(job_id)?.is_none() {
            return Err(RankingServiceError::JobNotFound(job_id.clone()));
        }

        let mut stored = self.store.rankings(job_id)?;
        stored.sort_by_key(|entry| entry.rank);
        Ok(stored)
    }

    fn persist(&self, job_id: &JobId, ranked: &[RankedApplicant]) -> Vec<PersistenceFailure> {
        let failures: Vec<PersistenceFailure> = ranked
            .iter()
            .filter_map(|entry| match self.store.store(job_id, entry) {
                Ok(()) => None,
                Err(err) => {
                    warn!(
                        %job_id,
                        application_id = %entry.applicant.application_id,
                        error = %err,
                        "failed to persist ranking entry"
                    );
                    Some(PersistenceFailure {
                        application_id: entry.applicant.application_id.clone(),
                        error: err.to_string(),
                    })
                }
            })
            .collect();

        info!(
            %job_id,
            stored = ranked.len() - failures.len(),
            failed = failures.len(),
            "persisted ranking"
        );
        failures
    }
}

/// Outcome of a `rank_job` call as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingReport {
    pub job_id: JobId,
    pub outcome: RankingOutcome,
    pub persistence_failures: Vec<PersistenceFailure>,
}

/// Error raised by the ranking service.
#[derive(Debug, thiserror::Error)]
pub enum RankingServiceError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RankingServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            RankingServiceError::JobNotFound(_)
            | RankingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            RankingServiceError::Ranking(RankingError::InvalidWeights(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RankingServiceError::Ranking(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RankingServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
