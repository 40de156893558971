use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryFundRepository};
use crate::routes::with_fund_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gv_funds::config::AppConfig;
use gv_funds::error::AppError;
use gv_funds::funds::{FundMatchService, SubmissionRateLimiter};
use gv_funds::telemetry;
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

    let funds = load_catalog(None, &config.catalog)?;
    let repository = Arc::new(InMemoryFundRepository::new(funds));
    let service = Arc::new(FundMatchService::new(repository));
    let policy = config.quiz.rate_limit_policy();
    let limiter = Arc::new(SubmissionRateLimiter::new(policy));

    let app = with_fund_routes(service, limiter)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        quiz_limit = policy.max_requests,
        quiz_window_secs = policy.window.num_seconds(),
        "golden visa fund matcher ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
