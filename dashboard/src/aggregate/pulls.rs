//! Pull request summaries for one repository and across the top repositories

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::repos::{fetch_repos, most_recent};
use super::SourceOutcome;
use crate::github::types::RawPull;
use crate::github::{GitHubResult, GitHubSession, Paginated};

/// At most this many pulls are returned for a single repository
pub const REPO_PULLS_LIMIT: usize = 30;
/// Repositories sampled by the cross-repository listing
pub const OVERVIEW_REPOS: usize = 8;
/// Pulls fetched per sampled repository
pub const OVERVIEW_PULLS_PER_REPO: usize = 10;
/// Pulls returned by the cross-repository listing
pub const OVERVIEW_LIMIT: usize = 20;

/// Author of a pull request
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Dashboard projection of a pull request
#[derive(Debug, Clone, Serialize)]
pub struct PullSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    /// Set from the presence of a merge timestamp, never from `state`
    pub merged: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub user: UserRef,
    pub html_url: String,
    pub changed_files: u64,
    pub additions: u64,
    pub deletions: u64,
    pub review_comments: u64,
    pub repo_name: String,
}

impl PullSummary {
    /// Project an upstream pull, tagging it with the owning repository name
    pub fn from_raw(pr: RawPull, repo_name: &str) -> Self {
        let user = pr.user.unwrap_or_default();
        Self {
            number: pr.number,
            title: pr.title,
            state: pr.state,
            merged: pr.merged_at.is_some(),
            created_at: pr.created_at,
            updated_at: pr.updated_at,
            merged_at: pr.merged_at,
            closed_at: pr.closed_at,
            user: UserRef {
                login: user.login,
                avatar_url: user.avatar_url,
            },
            html_url: pr.html_url,
            changed_files: pr.changed_files.unwrap_or(0),
            additions: pr.additions.unwrap_or(0),
            deletions: pr.deletions.unwrap_or(0),
            review_comments: pr.review_comments.unwrap_or(0),
            repo_name: repo_name.to_string(),
        }
    }

    pub fn status(&self) -> PullStatus {
        if self.merged {
            PullStatus::Merged
        } else if self.state == "open" {
            PullStatus::Open
        } else {
            PullStatus::Closed
        }
    }
}

/// Display status of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullStatus {
    Merged,
    Open,
    Closed,
}

impl PullStatus {
    pub fn label(self) -> &'static str {
        match self {
            PullStatus::Merged => "Merged",
            PullStatus::Open => "Open",
            PullStatus::Closed => "Closed",
        }
    }
}

/// Status filter applied to the pull request table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PullFilter {
    #[default]
    All,
    Open,
    Merged,
    Closed,
}

impl PullFilter {
    pub fn matches(self, status: PullStatus) -> bool {
        match self {
            PullFilter::All => true,
            PullFilter::Open => status == PullStatus::Open,
            PullFilter::Merged => status == PullStatus::Merged,
            PullFilter::Closed => status == PullStatus::Closed,
        }
    }
}

impl FromStr for PullFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(PullFilter::All),
            "open" => Ok(PullFilter::Open),
            "merged" => Ok(PullFilter::Merged),
            "closed" => Ok(PullFilter::Closed),
            other => Err(format!("unknown pull filter: {other}")),
        }
    }
}

/// `GET /api/repos/:owner/:repo/pulls?state=`
///
/// Newest update first, at most [`REPO_PULLS_LIMIT`] entries. A missing or
/// blank `state` means `all`.
pub async fn repo_pulls(
    gh: &GitHubSession,
    owner: &str,
    repo: &str,
    state: Option<&str>,
) -> GitHubResult<Paginated<PullSummary>> {
    let state = state.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("all");
    let state: String = url::form_urlencoded::byte_serialize(state.as_bytes()).collect();
    let page = gh
        .get_all::<RawPull>(&format!(
            "/repos/{owner}/{repo}/pulls?state={state}&sort=updated&direction=desc"
        ))
        .await?;

    let mut pulls = page.items;
    pulls.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    let items = pulls
        .into_iter()
        .take(REPO_PULLS_LIMIT)
        .map(|pr| PullSummary::from_raw(pr, repo))
        .collect();

    Ok(Paginated {
        items,
        truncated: page.truncated,
    })
}

/// Body of `GET /api/pulls`
#[derive(Debug, Clone, Serialize)]
pub struct PullsOverview {
    pub pulls: Vec<PullSummary>,
    pub sources: Vec<SourceOutcome>,
}

/// Newest-created first, at most [`OVERVIEW_LIMIT`] entries
pub fn newest_created(mut pulls: Vec<PullSummary>) -> Vec<PullSummary> {
    pulls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    pulls.truncate(OVERVIEW_LIMIT);
    pulls
}

/// `GET /api/pulls`: recent pulls across the most recently updated repositories
pub async fn pulls_across_repos(gh: &GitHubSession) -> GitHubResult<PullsOverview> {
    let repos = most_recent(fetch_repos(gh).await?.items, OVERVIEW_REPOS);

    let mut all = Vec::new();
    let mut sources = Vec::with_capacity(repos.len());
    for repo in repos {
        let endpoint = format!(
            "/repos/{}/pulls?state=all&per_page={OVERVIEW_PULLS_PER_REPO}&sort=updated&direction=desc",
            repo.full_name
        );
        match gh.get_list::<RawPull>(&endpoint).await {
            Ok(pulls) => {
                sources.push(SourceOutcome::ok(&repo.full_name, pulls.len()));
                all.extend(pulls.into_iter().map(|pr| PullSummary::from_raw(pr, &repo.name)));
            }
            Err(e) => {
                warn!(repo = %repo.full_name, error = %e, "skipping repository in pull overview");
                sources.push(SourceOutcome::failed(&repo.full_name, e));
            }
        }
    }

    Ok(PullsOverview {
        pulls: newest_created(all),
        sources,
    })
}
