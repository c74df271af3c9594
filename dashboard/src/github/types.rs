//! Upstream GitHub REST payloads
//!
//! Only the fields the dashboard reads are modelled. Everything is lenient:
//! absent fields fall back to defaults instead of failing the whole page.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// A GitHub account as embedded in other objects (owner, author, actor)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthenticatedUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
}

/// One element of `GET /user/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// One element of `GET /repos/{owner}/{repo}/pulls`
///
/// The list endpoint omits the size and review counters; they stay `None`
/// unless GitHub includes them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPull {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<RawUser>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub changed_files: Option<u64>,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    #[serde(default)]
    pub review_comments: Option<u64>,
}

/// One element of `GET /repos/{owner}/{repo}/stats/contributors`
#[derive(Debug, Clone, Deserialize)]
pub struct RawContributor {
    #[serde(default)]
    pub author: Option<RawUser>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub weeks: Vec<RawWeek>,
}

/// Weekly commit bucket inside a contributor stat
#[derive(Debug, Clone, Deserialize)]
pub struct RawWeek {
    #[serde(default)]
    pub w: i64,
    #[serde(default)]
    pub a: i64,
    #[serde(default)]
    pub d: i64,
    #[serde(default)]
    pub c: i64,
}

/// Repository reference inside an event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventRepo {
    #[serde(default)]
    pub name: String,
}

/// One element of `GET /users/{login}/received_events`
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub actor: RawUser,
    #[serde(default)]
    pub repo: RawEventRepo,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pull_without_merge_timestamp_parses() {
        let pull: RawPull = serde_json::from_value(json!({
            "number": 7,
            "title": "Fix things",
            "state": "open",
            "created_at": "2024-03-01T10:00:00Z",
            "merged_at": null,
            "user": { "login": "octocat", "avatar_url": "https://a/x.png" },
            "html_url": "https://github.com/acme/api/pull/7"
        }))
        .unwrap();

        assert_eq!(pull.number, 7);
        assert!(pull.merged_at.is_none());
        assert!(pull.review_comments.is_none());
        assert_eq!(pull.user.unwrap().login, "octocat");
    }

    #[test]
    fn event_type_is_read_from_type_field() {
        let event: RawEvent = serde_json::from_value(json!({
            "id": "1",
            "type": "WatchEvent",
            "actor": { "login": "octocat" },
            "repo": { "name": "acme/api" },
            "payload": { "action": "started" },
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(event.kind, "WatchEvent");
        assert_eq!(event.repo.name, "acme/api");
    }
}
