//! JSON API handlers (`/api/*`)

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, Query, State},
    http::{request::Parts, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use super::state::AppState;
use crate::aggregate::{
    self, ActivityEvent, ContributorSummary, DashboardStats, PullSummary, PullsOverview,
    RepoSummary, TokenStatus,
};
use crate::github::{Credential, GitHubError, GitHubSession, Paginated};
use crate::history::StorageError;

/// Request header that overrides the stored token for one request
pub const TOKEN_OVERRIDE_HEADER: &str = "x-github-token";
/// Response header flagging a listing cut short by the pagination cap
pub const TRUNCATED_HEADER: &str = "x-devintel-truncated";

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

/// Errors surfaced by API handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::GitHub(GitHubError::NoToken) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// A GitHub session bound to the credential in effect when the request
/// arrived. Every upstream call of the request uses that one snapshot.
pub struct Session(pub GitHubSession);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = state.tokens.resolve(override_token(&parts.headers))?;
        Ok(Session(state.github.session(credential)))
    }
}

fn override_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_OVERRIDE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}

fn truncated_header(truncated: bool) -> [(HeaderName, HeaderValue); 1] {
    [(
        HeaderName::from_static(TRUNCATED_HEADER),
        HeaderValue::from_static(if truncated { "true" } else { "false" }),
    )]
}

fn paginated<T: Serialize>(page: Paginated<T>) -> Response {
    (truncated_header(page.truncated), Json(page.items)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub token: Value,
}

/// `POST /api/settings/token`
///
/// A body that is not a JSON object is treated like a missing token.
pub async fn save_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenPayload>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let token = match payload {
        Ok(Json(payload)) => payload.token,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable token payload");
            Value::Null
        }
    };
    let credential = token
        .as_str()
        .and_then(|token| Credential::new(token))
        .ok_or_else(|| ApiError::BadRequest("Token is required".to_string()))?;

    state.tokens.set(credential);
    tracing::info!("GitHub token updated");
    Ok(Json(json!({ "ok": true })))
}

/// `GET /api/settings/token-status`
pub async fn token_status(State(state): State<AppState>, headers: HeaderMap) -> Json<TokenStatus> {
    let Ok(credential) = state.tokens.resolve(override_token(&headers)) else {
        return Json(TokenStatus::disconnected());
    };
    let gh = state.github.session(credential);
    Json(aggregate::token_status(&gh).await)
}

/// `GET /api/repos`
pub async fn list_repos(Session(gh): Session) -> ApiResult<Response> {
    let page: Paginated<RepoSummary> = aggregate::list_repos(&gh).await?;
    Ok(paginated(page))
}

#[derive(Debug, Deserialize)]
pub struct PullsQuery {
    pub state: Option<String>,
}

/// `GET /api/repos/{owner}/{repo}/pulls`
pub async fn repo_pulls(
    Session(gh): Session,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PullsQuery>,
) -> ApiResult<Response> {
    let page: Paginated<PullSummary> =
        aggregate::repo_pulls(&gh, &owner, &repo, query.state.as_deref()).await?;
    Ok(paginated(page))
}

/// `GET /api/repos/{owner}/{repo}/contributors`
pub async fn contributors(
    Session(gh): Session,
    Path((owner, repo)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ContributorSummary>>> {
    Ok(Json(aggregate::contributor_stats(&gh, &owner, &repo).await?))
}

/// `GET /api/stats`
pub async fn stats(Session(gh): Session) -> ApiResult<Json<DashboardStats>> {
    Ok(Json(aggregate::dashboard_stats(&gh, Utc::now()).await?))
}

/// `GET /api/activity`
pub async fn activity(Session(gh): Session) -> ApiResult<Json<Vec<ActivityEvent>>> {
    Ok(Json(aggregate::recent_activity(&gh).await?))
}

/// `GET /api/pulls`
pub async fn pulls(Session(gh): Session) -> ApiResult<Json<PullsOverview>> {
    Ok(Json(aggregate::pulls_across_repos(&gh).await?))
}
