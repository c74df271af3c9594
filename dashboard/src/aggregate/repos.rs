//! Repository listing

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::types::RawRepo;
use crate::github::{GitHubResult, GitHubSession, Paginated};

/// Upstream endpoint listing every repository the token can see
pub const USER_REPOS_ENDPOINT: &str = "/user/repos?sort=updated&type=all";

/// Narrowed projection of a GitHub repository
#[derive(Debug, Clone, Serialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: String,
    pub private: bool,
    pub default_branch: Option<String>,
}

impl From<RawRepo> for RepoSummary {
    fn from(r: RawRepo) -> Self {
        Self {
            id: r.id,
            name: r.name,
            full_name: r.full_name,
            description: r.description,
            language: r.language,
            stargazers_count: r.stargazers_count,
            forks_count: r.forks_count,
            open_issues_count: r.open_issues_count,
            updated_at: r.updated_at,
            html_url: r.html_url,
            private: r.private,
            default_branch: r.default_branch,
        }
    }
}

/// Fetch every repository (capped pagination) in upstream order
pub async fn fetch_repos(gh: &GitHubSession) -> GitHubResult<Paginated<RawRepo>> {
    gh.get_all(USER_REPOS_ENDPOINT).await
}

/// `GET /api/repos`
pub async fn list_repos(gh: &GitHubSession) -> GitHubResult<Paginated<RepoSummary>> {
    let page = fetch_repos(gh).await?;
    Ok(Paginated {
        items: page.items.into_iter().map(RepoSummary::from).collect(),
        truncated: page.truncated,
    })
}

/// The `n` most recently updated repositories; undated ones sort last
pub fn most_recent(mut repos: Vec<RawRepo>, n: usize) -> Vec<RawRepo> {
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    repos.truncate(n);
    repos
}
