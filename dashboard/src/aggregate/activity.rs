//! Recent activity feed built from the viewer's received events

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::github::types::{RawAuthenticatedUser, RawEvent};
use crate::github::{GitHubResult, GitHubSession};

/// Events requested from GitHub
pub const EVENTS_FETCHED: usize = 30;
/// Events kept in the feed
pub const EVENTS_KEPT: usize = 20;

/// GitHub event kinds the feed knows how to describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    Create,
    Delete,
    Watch,
    Fork,
    IssueComment,
    PullRequestReview,
    Other(String),
}

impl EventKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            "CreateEvent" => EventKind::Create,
            "DeleteEvent" => EventKind::Delete,
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            "IssueCommentEvent" => EventKind::IssueComment,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Human-readable `(action, detail)` for an event of this kind
    pub fn describe(&self, payload: &Value, repo: &str) -> (String, String) {
        match self {
            EventKind::Push => {
                let commits = payload["commits"].as_array().map_or(0, Vec::len);
                ("pushed".into(), format!("{commits} commit(s) to {repo}"))
            }
            EventKind::PullRequest => (
                payload_action(payload),
                format!("PR #{} in {repo}", number_of(&payload["pull_request"])),
            ),
            EventKind::Issues => (
                payload_action(payload),
                format!("issue #{} in {repo}", number_of(&payload["issue"])),
            ),
            EventKind::Create => ("created".into(), ref_detail(payload, repo)),
            EventKind::Delete => ("deleted".into(), ref_detail(payload, repo)),
            EventKind::Watch => ("starred".into(), repo.to_string()),
            EventKind::Fork => ("forked".into(), repo.to_string()),
            EventKind::IssueComment => (
                "commented on".into(),
                format!("issue #{} in {repo}", number_of(&payload["issue"])),
            ),
            EventKind::PullRequestReview => (
                "reviewed".into(),
                format!("PR #{} in {repo}", number_of(&payload["pull_request"])),
            ),
            EventKind::Other(tag) => (tag.replacen("Event", "", 1).to_lowercase(), repo.to_string()),
        }
    }
}

fn payload_action(payload: &Value) -> String {
    payload["action"].as_str().unwrap_or_default().to_string()
}

fn number_of(object: &Value) -> String {
    object["number"]
        .as_u64()
        .map_or_else(|| "?".to_string(), |n| n.to_string())
}

fn ref_detail(payload: &Value, repo: &str) -> String {
    let ref_type = payload["ref_type"].as_str().unwrap_or_default();
    let git_ref = payload["ref"].as_str().unwrap_or_default();
    format!("{ref_type} {git_ref} in {repo}")
}

/// Actor of an activity event
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// One line of the activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: Actor,
    pub action: String,
    pub detail: String,
    pub repo: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RawEvent> for ActivityEvent {
    fn from(ev: RawEvent) -> Self {
        let (action, detail) = EventKind::from_tag(&ev.kind).describe(&ev.payload, &ev.repo.name);
        Self {
            id: ev.id,
            kind: ev.kind,
            actor: Actor {
                login: ev.actor.login,
                avatar_url: ev.actor.avatar_url,
            },
            action,
            detail,
            repo: ev.repo.name,
            created_at: ev.created_at,
        }
    }
}

/// `GET /api/activity`
pub async fn recent_activity(gh: &GitHubSession) -> GitHubResult<Vec<ActivityEvent>> {
    let user: RawAuthenticatedUser = gh.get("/user").await?;
    let events: Vec<RawEvent> = gh
        .get_list(&format!(
            "/users/{}/received_events?per_page={EVENTS_FETCHED}",
            user.login
        ))
        .await?;

    Ok(events
        .into_iter()
        .take(EVENTS_KEPT)
        .map(ActivityEvent::from)
        .collect())
}
