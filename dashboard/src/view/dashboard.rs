//! Overview panel: metric cards, tables, activity feed, charts and sidebar

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::{empty, esc, initials, time_ago};
use crate::aggregate::{
    AccountUser, ActivityEvent, ContributorSummary, DashboardStats, PullFilter, PullStatus,
    PullSummary, RepoSummary,
};
use crate::history::UserProfile;

/// Repositories shown in the repository table
pub const REPO_ROWS: usize = 10;
/// Events shown in the activity feed
pub const FEED_ITEMS: usize = 8;
/// Date buckets kept in the velocity chart
pub const VELOCITY_POINTS: usize = 6;
/// Contributors shown in the team chart
pub const TEAM_BARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    pub change: String,
    pub tone: &'static str,
}

pub fn metric_cards(stats: &DashboardStats) -> Vec<MetricCard> {
    let m = &stats.metrics;
    vec![
        MetricCard {
            icon: "📁",
            label: "Repos",
            value: stats.repo_count.to_string(),
            change: format!("{} PRs tracked", m.total_prs),
            tone: "positive",
        },
        MetricCard {
            icon: "⏱️",
            label: "Avg Cycle",
            value: format!("{}h", m.avg_cycle_hours),
            change: format!("{} merged", m.merged_prs),
            tone: "neutral",
        },
        MetricCard {
            icon: "🚀",
            label: "Velocity",
            value: m.velocity.to_string(),
            change: "PRs in 14d".to_string(),
            tone: "neutral",
        },
        MetricCard {
            icon: "✅",
            label: "Review",
            value: format!("{}%", m.review_score),
            change: format!("{} open", m.open_prs),
            tone: "neutral",
        },
    ]
}

pub fn render_metric_cards(cards: &[MetricCard]) -> String {
    cards
        .iter()
        .map(|c| {
            format!(
                r#"<div class="metric-card"><div class="metric-label"><span class="metric-icon">{}</span> {}</div><div class="metric-value">{}</div><div class="metric-change {}">{}</div></div>"#,
                c.icon,
                c.label,
                esc(&c.value),
                c.tone,
                esc(&c.change)
            )
        })
        .collect()
}

/// Badge class for a pull status
pub fn status_badge(status: PullStatus) -> &'static str {
    match status {
        PullStatus::Merged => "healthy",
        PullStatus::Open => "warning",
        PullStatus::Closed => "critical",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrRow {
    pub number: u64,
    pub title: String,
    pub url: String,
    pub repo_name: String,
    pub author: String,
    pub avatar_url: String,
    pub status: &'static str,
    pub badge: &'static str,
    pub reviews: u64,
    pub updated: String,
}

/// Rows for the pull request table, keeping those `filter` admits
pub fn pr_rows(pulls: &[PullSummary], filter: PullFilter, now: DateTime<Utc>) -> Vec<PrRow> {
    pulls
        .iter()
        .filter(|pr| filter.matches(pr.status()))
        .map(|pr| {
            let status = pr.status();
            PrRow {
                number: pr.number,
                title: pr.title.clone(),
                url: pr.html_url.clone(),
                repo_name: pr.repo_name.clone(),
                author: pr.user.login.clone(),
                avatar_url: pr.user.avatar_url.clone().unwrap_or_default(),
                status: status.label(),
                badge: status_badge(status),
                reviews: pr.review_comments,
                updated: pr.updated_at.map(|t| time_ago(t, now)).unwrap_or_default(),
            }
        })
        .collect()
}

/// Table body for the pull request table; the empty state when nothing
/// passes the filter
pub fn render_pr_rows(pulls: &[PullSummary], filter: PullFilter, now: DateTime<Utc>) -> String {
    let rows = pr_rows(pulls, filter, now);
    if rows.is_empty() {
        return empty("No PRs found");
    }
    rows.iter()
        .map(|r| {
            format!(
                r#"<tr data-status="{}"><td><div class="pr-title"><a href="{}" target="_blank" style="color:inherit">#{} — {}</a></div><div class="pr-meta">{}</div></td><td><div class="pr-author"><img src="{}" style="width:22px;height:22px;border-radius:50%"> {}</div></td><td><span class="status-badge {}">● {}</span></td><td>{} reviews</td><td>{}</td></tr>"#,
                r.status.to_lowercase(),
                esc(&r.url),
                r.number,
                esc(&r.title),
                esc(&r.repo_name),
                esc(&r.avatar_url),
                esc(&r.author),
                r.badge,
                r.status,
                r.reviews,
                r.updated
            )
        })
        .collect()
}

/// Repository health from its open issue count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Warning,
    Critical,
}

impl Health {
    pub fn from_open_issues(open_issues: u64) -> Self {
        if open_issues > 20 {
            Health::Critical
        } else if open_issues > 5 {
            Health::Warning
        } else {
            Health::Healthy
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Health::Healthy => "healthy",
            Health::Warning => "warning",
            Health::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Health::Healthy => "Healthy",
            Health::Warning => "Warning",
            Health::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoRow {
    pub name: String,
    pub url: String,
    pub health: Health,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
}

pub fn repo_rows(repos: &[RepoSummary]) -> Vec<RepoRow> {
    repos
        .iter()
        .take(REPO_ROWS)
        .map(|r| RepoRow {
            name: r.name.clone(),
            url: r.html_url.clone(),
            health: Health::from_open_issues(r.open_issues_count),
            language: r
                .language
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "—".to_string()),
            stars: r.stargazers_count,
            forks: r.forks_count,
            open_issues: r.open_issues_count,
        })
        .collect()
}

pub fn render_repo_rows(repos: &[RepoSummary]) -> String {
    if repos.is_empty() {
        return empty("No repos");
    }
    repo_rows(repos)
        .iter()
        .map(|r| {
            format!(
                r#"<tr><td><span class="repo-name">📁 <a href="{}" target="_blank" style="color:inherit">{}</a></span></td><td><span class="status-badge {}">● {}</span></td><td>{}</td><td>⭐ {} 🍴 {}</td><td>{} open</td></tr>"#,
                esc(&r.url),
                esc(&r.name),
                r.health.class(),
                r.health.label(),
                esc(&r.language),
                r.stars,
                r.forks,
                r.open_issues
            )
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub login: String,
    pub avatar_url: String,
    pub action: String,
    pub detail: String,
    pub when: String,
}

pub fn feed_items(events: &[ActivityEvent], now: DateTime<Utc>) -> Vec<FeedItem> {
    events
        .iter()
        .take(FEED_ITEMS)
        .map(|e| FeedItem {
            login: e.actor.login.clone(),
            avatar_url: e.actor.avatar_url.clone().unwrap_or_default(),
            action: e.action.clone(),
            detail: e.detail.clone(),
            when: e.created_at.map(|t| time_ago(t, now)).unwrap_or_default(),
        })
        .collect()
}

pub fn render_feed(events: &[ActivityEvent], now: DateTime<Utc>) -> String {
    if events.is_empty() {
        return empty("No activity");
    }
    feed_items(events, now)
        .iter()
        .map(|f| {
            format!(
                r#"<div class="feed-item"><img src="{}" style="width:32px;height:32px;border-radius:50%;flex-shrink:0"><div class="feed-body"><div class="feed-action"><strong>{}</strong> {} <span class="highlight">{}</span></div><div class="feed-time">{}</div></div></div>"#,
                esc(&f.avatar_url),
                esc(&f.login),
                esc(&f.action),
                esc(&f.detail),
                f.when
            )
        })
        .collect()
}

/// Input for the chart library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    /// `line` or `bar`
    pub kind: &'static str,
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Merged pulls per `M/D` merge date, in first-seen order, last six dates
pub fn velocity_chart(pulls: &[PullSummary]) -> ChartSpec {
    let mut buckets: Vec<(String, u64)> = Vec::new();
    for merged_at in pulls.iter().filter(|p| p.merged).filter_map(|p| p.merged_at) {
        let key = format!("{}/{}", merged_at.month(), merged_at.day());
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => buckets.push((key, 1)),
        }
    }

    let skip = buckets.len().saturating_sub(VELOCITY_POINTS);
    let (mut labels, mut data): (Vec<_>, Vec<_>) = buckets.into_iter().skip(skip).unzip();
    if labels.is_empty() {
        labels.push("No data".to_string());
        data.push(0);
    }
    ChartSpec {
        kind: "line",
        labels,
        data,
    }
}

/// Commits of the top contributors
pub fn team_chart(contributors: &[ContributorSummary]) -> ChartSpec {
    let top = contributors.iter().take(TEAM_BARS);
    ChartSpec {
        kind: "bar",
        labels: top.clone().map(|c| c.login.clone().unwrap_or_default()).collect(),
        data: top.map(|c| c.total_commits).collect(),
    }
}

/// Identity block at the bottom of the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarUser {
    pub name: String,
    pub role: String,
    pub initials: String,
}

/// Stored profile first, then the GitHub account, then a guest
pub fn sidebar_user(profile: Option<&UserProfile>, account: Option<&AccountUser>) -> SidebarUser {
    if let Some(profile) = profile {
        if let Some(name) = profile.display_name() {
            let role = profile
                .email
                .as_deref()
                .filter(|e| !e.is_empty())
                .or(profile.user_id.as_deref())
                .unwrap_or_default();
            return SidebarUser {
                name: name.to_string(),
                role: role.to_string(),
                initials: initials(name),
            };
        }
    }

    if let Some(user) = account {
        let name = user
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&user.login);
        return SidebarUser {
            name: name.to_string(),
            role: format!("@{}", user.login),
            initials: if user.login.is_empty() {
                "??".to_string()
            } else {
                initials(&user.login)
            },
        };
    }

    SidebarUser {
        name: "Guest".to_string(),
        role: "Not signed in".to_string(),
        initials: "GU".to_string(),
    }
}

pub fn render_sidebar(user: &SidebarUser) -> String {
    format!(
        r#"<div class="sidebar-user"><div class="user-avatar">{}</div><div class="user-info"><div class="name">{}</div><div class="role">{}</div></div><button id="logout-btn" class="logout-btn" title="Log out">⎋</button></div>"#,
        esc(&user.initials),
        esc(&user.name),
        esc(&user.role)
    )
}
