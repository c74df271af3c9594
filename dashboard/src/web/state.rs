//! Shared application state

use std::sync::Arc;

use crate::agents::AnalysisService;
use crate::github::{GitHubClient, TokenStore};
use crate::history::HistoryStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream GitHub API client
    pub github: GitHubClient,
    /// Token written by the settings endpoint
    pub tokens: TokenStore,
    /// AI analysis service used by the agent panels
    pub analysis: Arc<dyn AnalysisService>,
    /// Agent run history and local profile
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(
        github: GitHubClient,
        tokens: TokenStore,
        analysis: Arc<dyn AnalysisService>,
        history: HistoryStore,
    ) -> Self {
        Self {
            github,
            tokens,
            analysis,
            history,
        }
    }
}
