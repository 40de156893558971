use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::FundId;
use super::quiz::QuizAnswers;
use super::rate_limit::{RateLimitDecision, SubmissionRateLimiter};
use super::repository::{FundRepository, RepositoryError};
use super::service::{FundMatchService, FundServiceError};

const ANONYMOUS_CLIENT: &str = "anonymous";

pub struct FundRouterState<R> {
    pub service: Arc<FundMatchService<R>>,
    pub limiter: Arc<SubmissionRateLimiter>,
}

impl<R> Clone for FundRouterState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            limiter: self.limiter.clone(),
        }
    }
}

/// Body of a comparison request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub fund_ids: Vec<FundId>,
}

/// Router builder exposing the directory, quiz, ranking, and comparison endpoints.
pub fn fund_router<R>(
    service: Arc<FundMatchService<R>>,
    limiter: Arc<SubmissionRateLimiter>,
) -> Router
where
    R: FundRepository + 'static,
{
    Router::new()
        .route("/api/v1/funds", get(directory_handler::<R>))
        .route("/api/v1/funds/:fund_id", get(fund_handler::<R>))
        .route("/api/v1/quiz/matches", post(quiz_handler::<R>))
        .route("/api/v1/ranking", get(ranking_handler::<R>))
        .route("/api/v1/compare", post(compare_handler::<R>))
        .with_state(FundRouterState { service, limiter })
}

pub(crate) async fn directory_handler<R>(State(state): State<FundRouterState<R>>) -> Response
where
    R: FundRepository + 'static,
{
    match state.service.directory() {
        Ok(funds) => (StatusCode::OK, axum::Json(funds)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fund_handler<R>(
    State(state): State<FundRouterState<R>>,
    Path(fund_id): Path<String>,
) -> Response
where
    R: FundRepository + 'static,
{
    let id = FundId(fund_id);
    match state.service.fund(&id) {
        Ok(fund) => (StatusCode::OK, axum::Json(fund)).into_response(),
        Err(FundServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "fund not found",
                "fund_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn quiz_handler<R>(
    State(state): State<FundRouterState<R>>,
    headers: HeaderMap,
    body: Result<axum::Json<QuizAnswers>, JsonRejection>,
) -> Response
where
    R: FundRepository + 'static,
{
    let client = client_key(&headers);
    if let RateLimitDecision::Limited { retry_after_secs } = state.limiter.check(&client, Utc::now())
    {
        warn!(client = %client, retry_after_secs, "quiz submission rate limited");
        let payload = json!({
            "error": "too many quiz submissions, try again later",
            "retry_after_secs": retry_after_secs,
        });
        let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(payload)).into_response();
        response.headers_mut().insert(
            header::RETRY_AFTER,
            HeaderValue::from(retry_after_secs),
        );
        return response;
    }

    let axum::Json(answers) = match body {
        Ok(answers) => answers,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.service.quiz_matches(answers) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn ranking_handler<R>(State(state): State<FundRouterState<R>>) -> Response
where
    R: FundRepository + 'static,
{
    match state.service.ranking() {
        Ok(shortlist) => (StatusCode::OK, axum::Json(shortlist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compare_handler<R>(
    State(state): State<FundRouterState<R>>,
    body: Result<axum::Json<CompareRequest>, JsonRejection>,
) -> Response
where
    R: FundRepository + 'static,
{
    let axum::Json(request) = match body {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    match state.service.compare(&request.fund_ids) {
        Ok(table) => (StatusCode::OK, axum::Json(table)).into_response(),
        Err(FundServiceError::Comparison(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(FundServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "one or more funds not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: FundServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    let status = match error {
        FundServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, axum::Json(payload)).into_response()
}

/// Unreadable or unknown answers keep axum's status but use the shared error payload.
fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

/// First hop of `x-forwarded-for`, falling back to a shared bucket.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}
