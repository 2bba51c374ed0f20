use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::ranking::domain::{
    ApplicantRecord, ApplicationId, EligibilityRecord, JobId, JobRequirement, PdsEducationEntry,
    PdsPersonalInformation, PdsSource, PdsWorkExperience, ProfileSource, RankedApplicant,
    RawApplication,
};
use crate::workflows::ranking::repository::{JobRepository, RankingStore, RepositoryError};
use crate::workflows::ranking::{ranking_router, RankingService, ScoringWeights};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn job() -> JobRequirement {
    JobRequirement {
        id: JobId("job-100".to_string()),
        title: "Data Analyst".to_string(),
        description: "Maintains the permit and licensing datasets.".to_string(),
        degree_requirement: String::new(),
        eligibilities: Vec::new(),
        skills: vec!["Excel".to_string(), "SQL".to_string()],
        years_of_experience: 2.0,
    }
}

pub(super) fn profile_application(
    id: &str,
    name: (&str, &str),
    skills: &[&str],
    years: f64,
) -> RawApplication {
    RawApplication {
        application_id: ApplicationId(id.to_string()),
        applicant_id: format!("user-{id}"),
        applicant_profile_id: Some(format!("profile-{id}")),
        profile: Some(ProfileSource {
            first_name: Some(name.0.to_string()),
            surname: Some(name.1.to_string()),
            highest_educational_attainment: Some("COLLEGE - BS Statistics".to_string()),
            total_years_experience: Some(years),
            skills: skills.iter().map(|skill| skill.to_string()).collect(),
            ..ProfileSource::default()
        }),
        pds: None,
    }
}

pub(super) fn pds_application(id: &str, work: Vec<PdsWorkExperience>) -> RawApplication {
    RawApplication {
        application_id: ApplicationId(id.to_string()),
        applicant_id: format!("user-{id}"),
        applicant_profile_id: None,
        profile: None,
        pds: Some(PdsSource {
            personal_information: Some(PdsPersonalInformation {
                first_name: Some("Maria".to_string()),
                middle_name: Some("Lopez".to_string()),
                surname: Some("Santos".to_string()),
            }),
            educational_background: vec![PdsEducationEntry {
                level: Some("COLLEGE".to_string()),
                basic_education_degree_course: Some("BS Information Technology".to_string()),
                ..PdsEducationEntry::default()
            }],
            work_experience: work,
            ..PdsSource::default()
        }),
    }
}

pub(super) fn work(title: &str, from: &str, to: &str) -> PdsWorkExperience {
    PdsWorkExperience {
        position_title: Some(title.to_string()),
        department_agency: Some("City Treasurer's Office".to_string()),
        from: Some(from.to_string()),
        to: Some(to.to_string()),
    }
}

pub(super) fn sourceless_application(id: &str) -> RawApplication {
    RawApplication {
        application_id: ApplicationId(id.to_string()),
        applicant_id: format!("user-{id}"),
        applicant_profile_id: None,
        profile: None,
        pds: None,
    }
}

pub(super) fn record(id: &str, name: &str, years: f64) -> ApplicantRecord {
    ApplicantRecord {
        application_id: ApplicationId(id.to_string()),
        applicant_id: format!("user-{id}"),
        applicant_profile_id: None,
        applicant_name: name.to_string(),
        highest_educational_attainment: "COLLEGE".to_string(),
        total_years_experience: years,
        skills: vec!["Excel".to_string()],
        eligibilities: vec![EligibilityRecord {
            eligibility_title: "Career Service Professional".to_string(),
        }],
        work_experience_titles: vec!["Data Encoder".to_string()],
    }
}

pub(super) fn basic_batch() -> Vec<RawApplication> {
    vec![
        profile_application("app-b", ("Bea", "Reyes"), &["Excel"], 1.0),
        profile_application("app-a", ("Ana", "Cruz"), &["Excel", "SQL", "Python"], 3.0),
    ]
}

pub(super) fn build_service() -> (
    RankingService<MemoryJobs, MemoryStore>,
    Arc<MemoryJobs>,
    Arc<MemoryStore>,
) {
    let jobs = Arc::new(MemoryJobs::default());
    jobs.insert(job(), basic_batch());
    let store = Arc::new(MemoryStore::default());
    let service = RankingService::new(jobs.clone(), store.clone(), ScoringWeights::default());
    (service, jobs, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    jobs: Arc<Mutex<HashMap<JobId, (JobRequirement, Vec<RawApplication>)>>>,
}

impl MemoryJobs {
    pub(super) fn insert(&self, job: JobRequirement, applications: Vec<RawApplication>) {
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .insert(job.id.clone(), (job, applications));
    }
}

impl JobRepository for MemoryJobs {
    fn job(&self, id: &JobId) -> Result<Option<JobRequirement>, RepositoryError> {
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(guard.get(id).map(|(job, _)| job.clone()))
    }

    fn pending_applications(&self, id: &JobId) -> Result<Vec<RawApplication>, RepositoryError> {
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(guard
            .get(id)
            .map(|(_, applications)| applications.clone())
            .unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<(JobId, ApplicationId), RankedApplicant>>>,
}

impl MemoryStore {
    pub(super) fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }
}

impl RankingStore for MemoryStore {
    fn store(&self, job_id: &JobId, ranked: &RankedApplicant) -> Result<(), RepositoryError> {
        self.entries.lock().expect("store mutex poisoned").insert(
            (job_id.clone(), ranked.applicant.application_id.clone()),
            ranked.clone(),
        );
        Ok(())
    }

    fn clear(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .expect("store mutex poisoned")
            .retain(|(job, _), _| job != job_id);
        Ok(())
    }

    fn rankings(&self, job_id: &JobId) -> Result<Vec<RankedApplicant>, RepositoryError> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|((job, _), _)| job == job_id)
            .map(|(_, ranked)| ranked.clone())
            .collect())
    }
}

/// Sink that refuses writes for one application id.
pub(super) struct FailingStore {
    pub(super) reject: ApplicationId,
    pub(super) inner: MemoryStore,
}

impl RankingStore for FailingStore {
    fn store(&self, job_id: &JobId, ranked: &RankedApplicant) -> Result<(), RepositoryError> {
        if ranked.applicant.application_id == self.reject {
            return Err(RepositoryError::Rejected("row locked".to_string()));
        }
        self.inner.store(job_id, ranked)
    }

    fn clear(&self, job_id: &JobId) -> Result<(), RepositoryError> {
        self.inner.clear(job_id)
    }

    fn rankings(&self, job_id: &JobId) -> Result<Vec<RankedApplicant>, RepositoryError> {
        self.inner.rankings(job_id)
    }
}

pub(super) struct UnavailableJobs;

impl JobRepository for UnavailableJobs {
    fn job(&self, _id: &JobId) -> Result<Option<JobRequirement>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending_applications(&self, _id: &JobId) -> Result<Vec<RawApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 64)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn ranking_router_with_service(
    service: RankingService<MemoryJobs, MemoryStore>,
) -> axum::Router {
    ranking_router(Arc::new(service))
}
