//! Applicant ranking for a job posting.
//!
//! `RankingEngine::rank` is a pure function of the posting, its pending
//! applications, the scoring weights, and the reference date used for
//! `"Present"` work-history entries. The service and router layers wrap it with
//! repository lookups and result persistence.

pub mod domain;
pub mod features;
pub mod normalizer;
pub(crate) mod ranker;
mod reasoning;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantRecord, ApplicantSources, ApplicationId, EducationLevel, EligibilityRecord, JobId,
    JobRequirement, PdsEducationEntry, PdsEligibility, PdsOtherInformation,
    PdsPersonalInformation, PdsSource, PdsWorkExperience, ProfileEligibility, ProfileSource,
    RankedApplicant, RankingAlgorithm, RankingDocument, RawApplication,
};
pub use normalizer::{normalize_application, SkillPayload};
pub use repository::{JobRepository, PersistenceFailure, RankingStore, RepositoryError};
pub use router::ranking_router;
pub use scoring::{AlgorithmDetails, ScoreCard, ScoringEngine, ScoringWeights};
pub use service::{RankingReport, RankingService, RankingServiceError};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use features::JobFeatures;
use ranker::{rank_scored, ScoredApplicant};

/// Result of a successful ranking run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "applicants", rename_all = "snake_case")]
pub enum RankingOutcome {
    Ranked(Vec<RankedApplicant>),
    /// Nothing to rank: the batch was empty or no application carried a data source.
    Empty,
}

impl RankingOutcome {
    pub fn applicants(&self) -> &[RankedApplicant] {
        match self {
            RankingOutcome::Ranked(applicants) => applicants,
            RankingOutcome::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RankingOutcome::Empty)
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            RankingOutcome::Ranked(_) => "ranked",
            RankingOutcome::Empty => "empty",
        }
    }
}

/// Caller-input errors. Per-field parse problems never surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("job {job_id} requires {value} years of experience; expected a non-negative number")]
    InvalidExperienceRequirement { job_id: String, value: f64 },
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

/// Runs normalization, scoring, and ranking for one posting at a time.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    scoring: ScoringEngine,
}

impl RankingEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            scoring: ScoringEngine::new(weights),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.scoring.weights()
    }

    pub fn rank(
        &self,
        job: &JobRequirement,
        applications: &[RawApplication],
        today: NaiveDate,
    ) -> Result<RankingOutcome, RankingError> {
        validate_job(job)?;
        self.scoring.weights().validate()?;

        let records: Vec<ApplicantRecord> = applications
            .iter()
            .filter_map(|application| {
                let record = normalize_application(application, today);
                if record.is_none() {
                    debug!(
                        job_id = %job.id,
                        application_id = %application.application_id,
                        "excluding application without profile or PDS data"
                    );
                }
                record
            })
            .collect();

        if records.is_empty() {
            info!(
                job_id = %job.id,
                submitted = applications.len(),
                "no rankable applications"
            );
            return Ok(RankingOutcome::Empty);
        }

        let job_features = JobFeatures::extract(job);
        let scored = records
            .into_iter()
            .map(|record| {
                let card = self.scoring.score(&job_features, &record);
                ScoredApplicant { record, card }
            })
            .collect();

        let ranked = rank_scored(scored);
        info!(
            job_id = %job.id,
            submitted = applications.len(),
            ranked = ranked.len(),
            "ranked applicants"
        );

        Ok(RankingOutcome::Ranked(ranked))
    }
}

fn validate_job(job: &JobRequirement) -> Result<(), RankingError> {
    let years = job.years_of_experience;
    if !years.is_finite() || years < 0.0 {
        return Err(RankingError::InvalidExperienceRequirement {
            job_id: job.id.0.clone(),
            value: years,
        });
    }
    Ok(())
}
