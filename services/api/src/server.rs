use crate::cli::ServeArgs;
use crate::infra::{load_documents, AppState, InMemoryJobRepository, InMemoryRankingStore};
use crate::routes::with_ranking_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use civic_jobs::config::AppConfig;
use civic_jobs::error::AppError;
use civic_jobs::telemetry;
use civic_jobs::workflows::ranking::RankingService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let jobs = match args.seed.take() {
        Some(path) => {
            let documents = load_documents(&path)?;
            info!(path = %path.display(), jobs = documents.len(), "seeded job repository");
            InMemoryJobRepository::from_documents(documents)
        }
        None => InMemoryJobRepository::default(),
    };
    let ranking_service = Arc::new(RankingService::new(
        Arc::new(jobs),
        Arc::new(InMemoryRankingStore::default()),
        config.ranking.weights,
    ));

    let app = with_ranking_routes(ranking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "applicant ranking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
