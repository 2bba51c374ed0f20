use chrono::NaiveDate;
use civic_jobs::error::AppError;
use civic_jobs::workflows::ranking::{
    ApplicationId, JobId, JobRepository, JobRequirement, RankedApplicant, RankingDocument,
    RankingStore, RawApplication, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Postings and their pending applications, keyed by job id.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    jobs: Arc<Mutex<HashMap<JobId, RankingDocument>>>,
}

impl InMemoryJobRepository {
    pub(crate) fn from_documents(documents: Vec<RankingDocument>) -> Self {
        let repository = Self::default();
        for document in documents {
            repository.insert(document);
        }
        repository
    }

    pub(crate) fn insert(&self, document: RankingDocument) {
        if let Ok(mut guard) = self.jobs.lock() {
            guard.insert(document.job.id.clone(), document);
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<JobId, RankingDocument>>, RepositoryError> {
        self.jobs
            .lock()
            .map_err(|_| RepositoryError::Unavailable("job repository lock poisoned".to_string()))
    }
}

impl JobRepository for InMemoryJobRepository {
    fn job(&self, id: &JobId) -> Result<Option<JobRequirement>, RepositoryError> {
        Ok(self.guard()?.get(id).map(|document| document.job.clone()))
    }

    fn pending_applications(&self, id: &JobId) -> Result<Vec<RawApplication>, RepositoryError> {
        Ok(self
            .guard()?
            .get(id)
            .map(|document| document.applications.clone())
            .unwrap_or_default())
    }
}

/// Last-write-wins result sink keyed by job and application id.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRankingStore {
    entries: Arc<Mutex<HashMap<(JobId, ApplicationId), RankedApplicant>>>,
}

impl RankingStore for InMemoryRankingStore {
    fn store(&self, job_id: &JobId, ranked: &RankedApplicant) -> Result<(), RepositoryError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("ranking store lock poisoned".to_string()))?;
        guard.insert(
            (job_id.clone(), ranked.applicant.application_id.clone()),
            ranked.clone(),
        );
        Ok(())
    }

    fn clear(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("ranking store lock poisoned".to_string()))?;
        guard.retain(|(job, _), _| job != job_id);
        Ok(())
    }

    fn rankings(&self, job_id: &JobId) -> Result<Vec<RankedApplicant>, RepositoryError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::Unavailable("ranking store lock poisoned".to_string()))?;
        Ok(guard
            .iter()
            .filter(|((job, _), _)| job == job_id)
            .map(|(_, ranked)| ranked.clone())
            .collect())
    }
}

/// Seed files hold either one `{job, applications}` document or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Many(Vec<RankingDocument>),
    One(Box<RankingDocument>),
}

pub(crate) fn parse_documents(raw: &str) -> Result<Vec<RankingDocument>, AppError> {
    let seed: SeedFile = serde_json::from_str(raw)?;
    Ok(match seed {
        SeedFile::Many(documents) => documents,
        SeedFile::One(document) => vec![*document],
    })
}

pub(crate) fn load_documents(path: &Path) -> Result<Vec<RankingDocument>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    parse_documents(&raw)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
