use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{JobId, JobRequirement, RawApplication};
use super::repository::{JobRepository, RankingStore};
use super::service::{RankingService, RankingServiceError};

/// Inline ranking request: a posting plus its applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RankBatchRequest {
    pub job: JobRequirement,
    #[serde(default)]
    pub applications: Vec<RawApplication>,
    /// Reference date for `"Present"` end dates; defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing ranking endpoints.
pub fn ranking_router<J, S>(service: Arc<RankingService<J, S>>) -> Router
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/rankings",
            post(rank_job_handler::<J, S>).get(rankings_handler::<J, S>),
        )
        .route("/api/v1/rankings", post(rank_batch_handler::<J, S>))
        .with_state(service)
}

pub(crate) async fn rank_job_handler<J, S>(
    State(service): State<Arc<RankingService<J, S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    let id = JobId(job_id);
    match service.rank_job(&id, Local::now().date_naive()) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rankings_handler<J, S>(
    State(service): State<Arc<RankingService<J, S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    let id = JobId(job_id);
    match service.rankings(&id) {
        Ok(applicants) => {
            let payload = json!({
                "job_id": id.0,
                "applicants": applicants,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rank_batch_handler<J, S>(
    State(service): State<Arc<RankingService<J, S>>>,
    axum::Json(request): axum::Json<RankBatchRequest>,
) -> Response
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    match service.rank_batch(&request.job, &request.applications, today) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: RankingServiceError) -> Response {
    let status = error.status();
    let payload = match &error {
        RankingServiceError::JobNotFound(id) => json!({
            "error": error.to_string(),
            "job_id": id.0,
        }),
        _ => json!({
            "error": error.to_string(),
        }),
    };
    (status, axum::Json(payload)).into_response()
}
