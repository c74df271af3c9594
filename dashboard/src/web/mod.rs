//! Web server for the dashboard
//!
//! `/api/*` proxies GitHub as JSON, `/ui/*` serves rendered fragments, and
//! every other GET falls back to the frontend shell.

pub mod api;
pub mod state;
pub mod ui;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use rust_embed::RustEmbed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::agents::AiClient;
use crate::config::Settings;
use crate::github::{Credential, GitHubClient, TokenStore};
use crate::history::{FileStorage, HistoryStore};
pub use state::AppState;

/// Embedded frontend shell
#[derive(RustEmbed)]
#[folder = "static/"]
struct StaticAssets;

/// Start the web server
pub async fn serve(settings: Settings) -> Result<()> {
    let tokens = TokenStore::new(settings.github_token.as_deref().and_then(|t| Credential::new(t)));
    if tokens.is_configured() {
        tracing::info!("GitHub token loaded from configuration");
    }

    let state = AppState::new(
        GitHubClient::new(&settings.github_api),
        tokens,
        Arc::new(AiClient::new(&settings.ai_url)),
        HistoryStore::new(Arc::new(FileStorage::open(&settings.storage_path))),
    );
    tracing::info!(
        github = %settings.github_api,
        ai = %settings.ai_url,
        history = %settings.storage_path.display(),
        "dashboard configured"
    );

    let app = create_router(state, settings.static_dir.clone());

    let addr: SocketAddr = settings.addr;
    tracing::info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
///
/// With `static_dir` the frontend is read from disk, otherwise the embedded
/// copy is served.
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/settings/token", post(api::save_token))
        .route("/settings/token-status", get(api::token_status))
        .route("/repos", get(api::list_repos))
        .route("/repos/{owner}/{repo}/pulls", get(api::repo_pulls))
        .route("/repos/{owner}/{repo}/contributors", get(api::contributors))
        .route("/stats", get(api::stats))
        .route("/activity", get(api::activity))
        .route("/pulls", get(api::pulls));

    let ui_routes = Router::new()
        .route("/panels/{id}", get(ui::panel))
        .route("/sidebar", get(ui::sidebar))
        .route("/logout", post(ui::logout))
        .route("/metrics", get(ui::metrics))
        .route("/pulls", get(ui::pulls))
        .route("/repos", get(ui::repos))
        .route("/activity", get(ui::activity))
        .route("/charts/velocity", get(ui::velocity_chart))
        .route("/charts/team", get(ui::team_chart))
        .route("/history", get(ui::history).delete(ui::clear_history))
        .route("/agents/{agent}", post(ui::run_agent));

    let router = Router::new()
        .nest("/api", api_routes)
        .nest("/ui", ui_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(static_handler),
    }
}

/// Serve embedded static files, falling back to the shell for any other path
async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if let Some(content) = StaticAssets::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            [(header::CONTENT_TYPE, mime.as_ref().to_string())],
            content.data.into_owned(),
        )
            .into_response();
    }

    match StaticAssets::get("index.html") {
        Some(content) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string())],
            content.data.into_owned(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
