//! Server-rendered fragments for the dashboard shell (`/ui/*`)

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::api::{ApiError, ApiResult, Session, TOKEN_OVERRIDE_HEADER};
use super::state::AppState;
use crate::agents::{AgentFlow, AgentKind, CapturedSurface};
use crate::aggregate::{self, repos::most_recent, PullFilter};
use crate::github::GitHubSession;
use crate::view::dashboard::{self, ChartSpec};
use crate::view::{self, history::render_history, PanelHeader};

/// Session for an HTML fragment. Without a token the fragment is the
/// "not configured" banner with status 401.
pub struct UiSession(pub GitHubSession);

pub struct TokenBanner;

impl IntoResponse for TokenBanner {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Html(view::token_banner())).into_response()
    }
}

impl FromRequestParts<AppState> for UiSession {
    type Rejection = TokenBanner;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let override_token = parts
            .headers
            .get(TOKEN_OVERRIDE_HEADER)
            .and_then(|v| v.to_str().ok());
        let credential = state.tokens.resolve(override_token).map_err(|_| TokenBanner)?;
        Ok(UiSession(state.github.session(credential)))
    }
}

fn failed(what: &str, error: impl std::fmt::Display) -> Html<String> {
    tracing::warn!(fragment = what, error = %error, "failed to build fragment");
    Html(view::empty("Failed to load"))
}

/// `GET /ui/panels/{id}`
pub async fn panel(Path(id): Path<String>) -> Json<PanelHeader> {
    Json(view::panel_header(&id))
}

/// `GET /ui/sidebar`
pub async fn sidebar(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let profile = state.history.profile()?;

    let account = match (&profile, state.tokens.current()) {
        (None, Some(credential)) => {
            let gh = state.github.session(credential);
            aggregate::current_user(&gh).await.ok()
        }
        _ => None,
    };

    let user = dashboard::sidebar_user(profile.as_ref(), account.as_ref());
    Ok(Html(dashboard::render_sidebar(&user)))
}

/// `POST /ui/logout`: forget the local profile
pub async fn logout(State(state): State<AppState>) -> ApiResult<Html<String>> {
    state.history.clear_profile()?;
    tracing::info!("local profile cleared");
    Ok(Html(dashboard::render_sidebar(&dashboard::sidebar_user(None, None))))
}

/// `GET /ui/metrics`
pub async fn metrics(UiSession(gh): UiSession) -> Html<String> {
    match aggregate::dashboard_stats(&gh, Utc::now()).await {
        Ok(stats) => Html(dashboard::render_metric_cards(&dashboard::metric_cards(&stats))),
        Err(e) => failed("metrics", e),
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: String,
}

/// `GET /ui/pulls?filter=`
pub async fn pulls(UiSession(gh): UiSession, Query(query): Query<FilterQuery>) -> Response {
    let filter: PullFilter = match query.filter.parse() {
        Ok(filter) => filter,
        Err(message) => return ApiError::BadRequest(message).into_response(),
    };
    match aggregate::pulls_across_repos(&gh).await {
        Ok(overview) => {
            Html(dashboard::render_pr_rows(&overview.pulls, filter, Utc::now())).into_response()
        }
        Err(e) => failed("pulls", e).into_response(),
    }
}

/// `GET /ui/repos`
pub async fn repos(UiSession(gh): UiSession) -> Html<String> {
    match aggregate::list_repos(&gh).await {
        Ok(page) => Html(dashboard::render_repo_rows(&page.items)),
        Err(e) => failed("repos", e),
    }
}

/// `GET /ui/activity`
pub async fn activity(UiSession(gh): UiSession) -> Html<String> {
    match aggregate::recent_activity(&gh).await {
        Ok(events) => Html(dashboard::render_feed(&events, Utc::now())),
        Err(e) => failed("activity", e),
    }
}

/// `GET /ui/charts/velocity`
pub async fn velocity_chart(Session(gh): Session) -> ApiResult<Json<ChartSpec>> {
    let overview = aggregate::pulls_across_repos(&gh).await?;
    Ok(Json(dashboard::velocity_chart(&overview.pulls)))
}

/// `GET /ui/charts/team`: top contributors of the most recently updated repository
pub async fn team_chart(Session(gh): Session) -> ApiResult<Json<ChartSpec>> {
    let page = aggregate::repos::fetch_repos(&gh).await?;
    let Some(repo) = most_recent(page.items, 1).into_iter().next() else {
        return Ok(Json(dashboard::team_chart(&[])));
    };
    let (owner, name) = repo
        .full_name
        .split_once('/')
        .unwrap_or((repo.full_name.as_str(), repo.name.as_str()));
    let contributors = aggregate::contributor_stats(&gh, owner, name).await?;
    Ok(Json(dashboard::team_chart(&contributors)))
}

/// `GET /ui/history`
pub async fn history(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let entries = state.history.list()?;
    Ok(Html(render_history(&entries, Utc::now())))
}

/// `DELETE /ui/history`
pub async fn clear_history(State(state): State<AppState>) -> ApiResult<Html<String>> {
    state.history.clear()?;
    tracing::info!("history cleared");
    Ok(Html(render_history(&[], Utc::now())))
}

#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub status: &'static str,
    pub html: String,
    pub button_label: &'static str,
}

/// `POST /ui/agents/{agent}`
///
/// An unreadable body runs the flow with empty input, so the shell always
/// gets a fragment and a trigger label back.
pub async fn run_agent(
    State(state): State<AppState>,
    Path(agent): Path<String>,
    request: Result<Json<AgentRequest>, JsonRejection>,
) -> ApiResult<Json<AgentResponse>> {
    let kind: AgentKind = agent.parse().map_err(ApiError::BadRequest)?;
    let input = match request {
        Ok(Json(request)) => request.input,
        Err(rejection) => {
            tracing::debug!(agent = %kind, error = %rejection, "unreadable agent request");
            String::new()
        }
    };

    let mut surface = CapturedSurface::default();
    let outcome = AgentFlow::new(state.analysis.as_ref(), &state.history)
        .run(kind, &input, &mut surface)
        .await;

    Ok(Json(AgentResponse {
        status: outcome.status(),
        html: surface.html().to_string(),
        button_label: surface
            .trigger()
            .map(|t| t.label())
            .unwrap_or(kind.button_label()),
    }))
}
