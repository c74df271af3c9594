//! Dashboard aggregation over the GitHub REST API
//!
//! Each submodule owns one summary: a projection of the upstream payload, the
//! pure computation over it, and the async function that fetches it through a
//! [`GitHubSession`](crate::github::GitHubSession).
//!
//! Fan-outs over several repositories are best-effort: a repository whose
//! pulls cannot be fetched is recorded as a failed [`SourceOutcome`] and the
//! aggregate is built from the rest.

pub mod account;
pub mod activity;
pub mod contributors;
pub mod pulls;
pub mod repos;
pub mod stats;

use serde::Serialize;

pub use account::{current_user, token_status, AccountUser, TokenStatus};
pub use activity::{recent_activity, ActivityEvent, EventKind};
pub use contributors::{contributor_stats, ContributorSummary, WeekSummary};
pub use pulls::{pulls_across_repos, repo_pulls, PullFilter, PullStatus, PullSummary, PullsOverview};
pub use repos::{list_repos, RepoSummary};
pub use stats::{dashboard_stats, DashboardStats, PullMetrics};

/// How one repository fared inside a fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Ok,
    Failed,
}

/// Per-repository result of a fan-out
#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub repo: String,
    pub status: SourceStatus,
    pub pulls: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceOutcome {
    pub fn ok(repo: impl Into<String>, pulls: usize) -> Self {
        Self {
            repo: repo.into(),
            status: SourceStatus::Ok,
            pulls,
            error: None,
        }
    }

    pub fn failed(repo: impl Into<String>, error: impl ToString) -> Self {
        Self {
            repo: repo.into(),
            status: SourceStatus::Failed,
            pulls: 0,
            error: Some(error.to_string()),
        }
    }
}
