//! Headline dashboard metrics

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::warn;

use super::repos::{fetch_repos, most_recent};
use super::SourceOutcome;
use crate::github::types::RawPull;
use crate::github::{GitHubResult, GitHubSession};

/// Repositories sampled for pull metrics
pub const STATS_REPOS: usize = 5;
/// Pulls fetched per sampled repository
pub const STATS_PULLS_PER_REPO: usize = 20;
/// Window for the velocity metric
pub const VELOCITY_WINDOW_DAYS: i64 = 14;

/// Metrics derived from a set of pull requests
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullMetrics {
    /// Mean created→merged time of merged pulls, hours, one decimal
    pub avg_cycle_hours: f64,
    /// Pulls merged within the last [`VELOCITY_WINDOW_DAYS`] days
    pub velocity: usize,
    /// Percentage of pulls with at least one review comment, rounded
    pub review_score: u32,
    #[serde(rename = "totalPRs")]
    pub total_prs: usize,
    #[serde(rename = "mergedPRs")]
    pub merged_prs: usize,
    #[serde(rename = "openPRs")]
    pub open_prs: usize,
}

impl PullMetrics {
    /// Compute the metrics as of `now`. Only pulls with a merge timestamp
    /// count as merged, whatever their `state`.
    pub fn compute(pulls: &[RawPull], now: DateTime<Utc>) -> Self {
        let merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = pulls
            .iter()
            .filter_map(|p| p.merged_at.map(|m| (p.created_at, m)))
            .collect();

        let avg_cycle_hours = if merged.is_empty() {
            0.0
        } else {
            let total_ms: i64 = merged
                .iter()
                .map(|(created, merged)| (*merged - *created).num_milliseconds())
                .sum();
            let hours = total_ms as f64 / merged.len() as f64 / 3_600_000.0;
            (hours * 10.0).round() / 10.0
        };

        let window = Duration::days(VELOCITY_WINDOW_DAYS);
        let velocity = merged
            .iter()
            .filter(|(_, merged_at)| now - *merged_at < window)
            .count();

        let reviewed = pulls
            .iter()
            .filter(|p| p.review_comments.unwrap_or(0) > 0)
            .count();
        let review_score = if pulls.is_empty() {
            0
        } else {
            (reviewed as f64 / pulls.len() as f64 * 100.0).round() as u32
        };

        Self {
            avg_cycle_hours,
            velocity,
            review_score,
            total_prs: pulls.len(),
            merged_prs: merged.len(),
            open_prs: pulls.iter().filter(|p| p.state == "open").count(),
        }
    }
}

/// Body of `GET /api/stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub repo_count: usize,
    #[serde(flatten)]
    pub metrics: PullMetrics,
    /// The repository listing hit the pagination cap
    pub repos_truncated: bool,
    pub sources: Vec<SourceOutcome>,
}

/// `GET /api/stats`
pub async fn dashboard_stats(gh: &GitHubSession, now: DateTime<Utc>) -> GitHubResult<DashboardStats> {
    let page = fetch_repos(gh).await?;
    let repo_count = page.items.len();
    let repos = most_recent(page.items, STATS_REPOS);

    let mut pulls = Vec::new();
    let mut sources = Vec::with_capacity(repos.len());
    for repo in repos {
        let endpoint = format!(
            "/repos/{}/pulls?state=all&per_page={STATS_PULLS_PER_REPO}&sort=updated&direction=desc",
            repo.full_name
        );
        match gh.get_list::<RawPull>(&endpoint).await {
            Ok(batch) => {
                sources.push(SourceOutcome::ok(&repo.full_name, batch.len()));
                pulls.extend(batch);
            }
            Err(e) => {
                warn!(repo = %repo.full_name, error = %e, "skipping repository in stats");
                sources.push(SourceOutcome::failed(&repo.full_name, e));
            }
        }
    }

    Ok(DashboardStats {
        repo_count,
        metrics: PullMetrics::compute(&pulls, now),
        repos_truncated: page.truncated,
        sources,
    })
}
