//! Presentation layer
//!
//! Pure functions only. Builders turn API data into small view models and
//! renderers turn those into HTML fragments; nothing here performs I/O, so
//! the dashboard's look is unit-testable without a browser.

pub mod agents;
pub mod dashboard;
pub mod history;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::agents::AgentKind;

static GITHUB_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/([^/]+)/([^/\s]+)").expect("Invalid GitHub URL regex")
});

/// Escape text for insertion into HTML. Covers `& < > "`.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// [`esc`] for optional text; absent renders as nothing
pub fn esc_opt(s: Option<&str>) -> String {
    s.map(esc).unwrap_or_default()
}

/// Relative time: `just now`, `{m}m ago`, `{h}h ago`, `{d}d ago`, floored
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - ts).num_milliseconds().div_euclid(60_000);
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}

/// A parsed `owner/repo` reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Parse `owner/repo` or a GitHub URL. Extra path segments are ignored and a
/// trailing `.git` is stripped from URLs. `None` without any `/`.
pub fn parse_repo(input: &str) -> Option<RepoRef> {
    let value = input.trim();

    if let Some(caps) = GITHUB_URL_REGEX.captures(value) {
        let repo = &caps[2];
        return Some(RepoRef {
            owner: caps[1].to_string(),
            repo: repo.strip_suffix(".git").unwrap_or(repo).to_string(),
        });
    }

    let mut parts = value.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => Some(RepoRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        _ => None,
    }
}

/// Dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Dashboard,
    Agent(AgentKind),
    History,
}

impl PanelId {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "dashboard" => Some(PanelId::Dashboard),
            "history" => Some(PanelId::History),
            other => AgentKind::ALL
                .into_iter()
                .find(|k| k.slug() == other)
                .map(PanelId::Agent),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            PanelId::Dashboard => "dashboard",
            PanelId::Agent(kind) => kind.slug(),
            PanelId::History => "history",
        }
    }

    /// `(title, breadcrumb)` shown in the top bar
    pub fn titles(self) -> (&'static str, &'static str) {
        match self {
            PanelId::Dashboard => ("Dashboard", "/ Overview"),
            PanelId::Agent(kind) => (kind.label(), "/ AI Agent"),
            PanelId::History => ("Analysis History", "/ History"),
        }
    }
}

/// Top bar content for a panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelHeader {
    pub id: String,
    pub title: &'static str,
    pub breadcrumb: &'static str,
}

/// Header for any panel id; unknown ids get the dashboard header
pub fn panel_header(id: &str) -> PanelHeader {
    let (title, breadcrumb) = PanelId::from_id(id).unwrap_or(PanelId::Dashboard).titles();
    PanelHeader {
        id: id.to_string(),
        title,
        breadcrumb,
    }
}

/// Spinner shown while GitHub data loads
pub fn loading() -> String {
    r#"<div class="loading-state"><div class="spinner"></div><br>Loading from GitHub…</div>"#.to_string()
}

/// Empty state with a fixed message
pub fn empty(message: &str) -> String {
    format!(r#"<div class="empty-state">{}</div>"#, esc(message))
}

/// Banner shown when no GitHub token is configured
pub fn token_banner() -> String {
    r#"<div id="token-banner" class="token-banner">⚠️ GitHub token not configured. <a href="settings.html">Go to Settings</a> to connect your account.</div>"#
        .to_string()
}

/// First two characters, upper-cased
pub fn initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}
