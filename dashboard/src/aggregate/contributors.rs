//! Contributor statistics for one repository

use serde::Serialize;
use serde_json::Value;

use crate::github::types::RawContributor;
use crate::github::{GitHubResult, GitHubSession};

/// Weeks of history kept per contributor
pub const RECENT_WEEKS: usize = 4;

/// One week of a contributor's activity
#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    pub week: i64,
    pub additions: i64,
    pub deletions: i64,
    pub commits: i64,
}

/// Projection of one contributor stat
#[derive(Debug, Clone, Serialize)]
pub struct ContributorSummary {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub total_commits: u64,
    pub weeks: Vec<WeekSummary>,
}

impl From<RawContributor> for ContributorSummary {
    fn from(c: RawContributor) -> Self {
        let skip = c.weeks.len().saturating_sub(RECENT_WEEKS);
        let (login, avatar_url) = match c.author {
            Some(author) => (Some(author.login), author.avatar_url),
            None => (None, None),
        };
        Self {
            login,
            avatar_url,
            total_commits: c.total,
            weeks: c
                .weeks
                .into_iter()
                .skip(skip)
                .map(|w| WeekSummary {
                    week: w.w,
                    additions: w.a,
                    deletions: w.d,
                    commits: w.c,
                })
                .collect(),
        }
    }
}

/// Shape an upstream body into summaries sorted by descending commit count.
///
/// GitHub answers 202 with no array while it is still computing the stats;
/// anything that is not an array becomes an empty list.
pub fn summarize(body: Value) -> GitHubResult<Vec<ContributorSummary>> {
    let Value::Array(_) = body else {
        return Ok(Vec::new());
    };
    let raw: Vec<RawContributor> = serde_json::from_value(body)?;
    let mut out: Vec<ContributorSummary> = raw.into_iter().map(ContributorSummary::from).collect();
    out.sort_by(|a, b| b.total_commits.cmp(&a.total_commits));
    Ok(out)
}

/// `GET /api/repos/:owner/:repo/contributors`
pub async fn contributor_stats(
    gh: &GitHubSession,
    owner: &str,
    repo: &str,
) -> GitHubResult<Vec<ContributorSummary>> {
    let body = gh
        .get_json(&format!("/repos/{owner}/{repo}/stats/contributors"))
        .await?;
    summarize(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_body_is_empty() {
        assert!(summarize(Value::Null).unwrap().is_empty());
        assert!(summarize(json!({})).unwrap().is_empty());
    }

    #[test]
    fn sorted_by_commits_with_last_four_weeks() {
        let body = json!([
            {
                "author": { "login": "few", "avatar_url": "a" },
                "total": 3,
                "weeks": [{ "w": 1, "a": 1, "d": 0, "c": 3 }]
            },
            {
                "author": { "login": "many" },
                "total": 40,
                "weeks": [
                    { "w": 1, "a": 0, "d": 0, "c": 1 },
                    { "w": 2, "a": 0, "d": 0, "c": 2 },
                    { "w": 3, "a": 0, "d": 0, "c": 3 },
                    { "w": 4, "a": 0, "d": 0, "c": 4 },
                    { "w": 5, "a": 9, "d": 2, "c": 5 }
                ]
            },
            { "author": null, "total": 10, "weeks": [] }
        ]);

        let out = summarize(body).unwrap();
        let order: Vec<_> = out.iter().map(|c| c.total_commits).collect();
        assert_eq!(order, vec![40, 10, 3]);
        assert_eq!(out[0].login.as_deref(), Some("many"));
        assert_eq!(out[0].weeks.len(), 4);
        assert_eq!(out[0].weeks[0].week, 2);
        assert_eq!(out[0].weeks[3].additions, 9);
        assert!(out[1].login.is_none());
    }
}
