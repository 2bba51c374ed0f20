use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use civic_jobs::workflows::ranking::{
    ranking_router, JobRepository, RankingService, RankingStore,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_ranking_routes<J, S>(service: Arc<RankingService<J, S>>) -> axum::Router
where
    J: JobRepository + 'static,
    S: RankingStore + 'static,
{
    ranking_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{parse_documents, InMemoryJobRepository, InMemoryRankingStore};
    use axum::body::Body;
    use axum::http::Request;
    use civic_jobs::workflows::ranking::ScoringWeights;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn seeded_router(ready: bool) -> axum::Router {
        let seed = json!({
            "job": {
                "id": "job-1",
                "title": "Budget Officer",
                "skills": ["Budgeting"],
                "years_of_experience": 2
            },
            "applications": [
                {
                    "application_id": "app-1",
                    "applicant_id": "user-1",
                    "profile": {
                        "first_name": "Ana",
                        "surname": "Cruz",
                        "skills": ["Budgeting"],
                        "total_years_experience": 4
                    }
                }
            ]
        });
        let documents = parse_documents(&seed.to_string()).expect("seed parses");
        let service = Arc::new(RankingService::new(
            Arc::new(InMemoryJobRepository::from_documents(documents)),
            Arc::new(InMemoryRankingStore::default()),
            ScoringWeights::default(),
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };

        with_ranking_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json payload")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = seeded_router(true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = seeded_router(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = seeded_router(true)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn seeded_job_can_be_ranked_and_read_back() {
        let router = seeded_router(true);

        let response = router
            .clone()
            .oneshot(
                Request::post("/api/v1/jobs/job-1/rankings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["outcome"]["applicants"][0]["rank"], 1);

        let response = router
            .oneshot(
                Request::get("/api/v1/jobs/job-1/rankings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let stored = body_json(response).await;
        assert_eq!(stored["applicants"][0]["application_id"], "app-1");
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let response = seeded_router(true)
            .oneshot(
                Request::post("/api/v1/jobs/job-404/rankings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
