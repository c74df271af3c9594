//! Agent result renderers

use super::{empty, esc, esc_opt, initials};
use crate::agents::types::{
    IssueAnalysisResponse, PrAnalysisResponse, RepositoryAnalysisResponse, WorkloadResponse,
};

/// Placeholder while an agent runs
pub fn agent_loading() -> String {
    r#"<div class="loading-state" style="padding:60px 20px"><div class="spinner"></div><br><strong>Agent is analyzing your repository…</strong><br><span style="font-size:12px;color:var(--text-tertiary)">This may take 10–30 seconds depending on repo size</span></div>"#
        .to_string()
}

/// Friendlier copy for errors whose text carries a well-known status code
pub fn friendly_error(message: &str) -> &str {
    if message.contains("404") {
        "Repository not found. Please check the owner/repo name and ensure it exists on GitHub."
    } else if message.contains("403") {
        "Access forbidden. The repository may be private or your token lacks permissions."
    } else if message.contains("401") {
        "Authentication failed. Please check your GitHub token in Settings."
    } else if message.contains("500") {
        "Server error. Please try again or check the backend logs."
    } else {
        message
    }
}

/// Error card for a failed or rejected agent run
pub fn agent_error(message: &str) -> String {
    let tip = if message.contains("404") {
        r#"<br><span style="font-size:12px;color:var(--text-tertiary)">💡 Tip: Make sure the repository exists and is public, or that your token has access to private repos.</span>"#
    } else {
        ""
    };
    format!(
        r#"<div class="result-card" style="border-color:var(--danger);padding:20px"><div class="result-body" style="color:var(--danger)"><strong>❌ Error</strong><br><span style="font-size:14px;margin-top:8px;display:block">{}</span>{tip}</div></div>"#,
        esc(friendly_error(message))
    )
}

fn summary_line(html: &str) -> String {
    format!(r#"<div style="font-size:13px;color:var(--text-tertiary);margin-bottom:4px">{html}</div>"#)
}

fn checklist(items: &[String]) -> String {
    let items: String = items.iter().map(|i| format!("<li>{}</li>", esc(i))).collect();
    format!(r#"<ul class="checklist">{items}</ul>"#)
}

fn candidate(name: &str, reasoning: &str, score: f64) -> String {
    let avatar = if name.is_empty() { "??".to_string() } else { initials(name) };
    format!(
        r#"<div class="candidate-item"><div class="candidate-avatar">{}</div><div class="candidate-info"><div class="candidate-name">{}</div><div class="candidate-reasoning">{}</div></div><div class="candidate-score">{}</div></div>"#,
        esc(&avatar),
        esc(name),
        esc(reasoning),
        score.round() as i64
    )
}

/// Issue Classifier
pub fn issue_classifications(data: &IssueAnalysisResponse) -> String {
    if data.classifications.is_empty() {
        return empty("No open issues found in this repository.");
    }

    let mut html = summary_line(&format!(
        "Analyzed <strong>{}</strong> issues from <strong>{}</strong>",
        data.issues_analyzed,
        esc(&data.repo)
    ));
    for issue in &data.classifications {
        let a = &issue.analysis;
        let labels: String = a
            .suggested_labels
            .iter()
            .map(|l| format!(r#"<span class="result-label-tag">{}</span>"#, esc(l)))
            .collect();
        html.push_str(&format!(
            r#"<div class="result-card"><div class="result-card-header"><div class="result-card-title"><span class="issue-num">#{}</span> {}</div><div class="result-badges"><span class="badge-classification {}">{}</span><span class="badge-priority {}">{} Priority</span></div></div><div class="result-body"><div class="result-row"><span class="result-label">Reasoning:</span> {}</div><div class="result-row"><span class="result-label">Confidence:</span> {}%</div><div class="result-labels-list">{labels}</div></div></div>"#,
            issue.issue_number,
            esc(&issue.issue_title),
            esc(&a.classification.to_lowercase()),
            esc(&a.classification),
            esc(&a.priority.to_lowercase()),
            esc(&a.priority),
            esc(&a.reasoning),
            (a.confidence_score * 100.0).round() as i64,
        ));
    }
    html
}

/// PR Intelligence, followed by reviewer suggestions when present
pub fn pr_intelligence(data: &PrAnalysisResponse) -> String {
    if data.pr_intelligence.is_empty() {
        return empty("No pull requests found.");
    }

    let mut html = summary_line(&format!(
        "Analyzed <strong>{}</strong> PRs from <strong>{}</strong>",
        data.prs_analyzed,
        esc(&data.repo)
    ));
    for pr in &data.pr_intelligence {
        let a = &pr.analysis;
        html.push_str(&format!(
            r#"<div class="result-card"><div class="result-card-header"><div class="result-card-title"><span class="issue-num">#{}</span> {}</div><div class="result-badges"><span class="badge-risk {}">Risk: {}</span></div></div><div class="result-body"><div class="result-row"><span class="result-label">Summary:</span> {}</div>{}</div></div>"#,
            pr.pr_number,
            esc(&pr.pr_title),
            esc(&a.risk_level.to_lowercase()),
            esc(&a.risk_level),
            esc(&a.summary),
            checklist(&a.review_checklist),
        ));
    }

    for rec in data
        .reviewer_recommendations
        .iter()
        .filter(|r| !r.suggested_reviewers.is_empty())
    {
        let reviewers: String = rec
            .suggested_reviewers
            .iter()
            .map(|r| candidate(&r.developer_name, &r.reasoning, r.confidence_score))
            .collect();
        html.push_str(&format!(
            r#"<div class="result-card"><div class="result-card-title" style="margin-bottom:10px">👀 Suggested reviewers for <span class="issue-num">#{}</span> {}</div><div class="candidate-list">{reviewers}</div></div>"#,
            rec.pr_number,
            esc(&rec.pr_title),
        ));
    }
    html
}

/// Assignee Recommender
pub fn assignee_recommendations(data: &IssueAnalysisResponse) -> String {
    if data.assignee_recommendations.is_empty() {
        return empty("No issues to recommend assignees for.");
    }

    let mut html = summary_line(&format!(
        "Assignee recommendations for <strong>{}</strong>",
        esc(&data.repo)
    ));
    for rec in &data.assignee_recommendations {
        let candidates: String = rec
            .recommended_assignees
            .iter()
            .map(|a| candidate(&a.developer_name, &a.reasoning, a.score))
            .collect();
        html.push_str(&format!(
            r#"<div class="result-card"><div class="result-card-title" style="margin-bottom:10px"><span class="issue-num">#{}</span> {}</div><div class="candidate-list">{candidates}</div></div>"#,
            rec.issue_number,
            esc(&rec.issue_title),
        ));
    }
    html
}

/// Colour of a workload bar
pub fn load_color(load_score: i64) -> &'static str {
    if load_score >= 6 {
        "var(--danger)"
    } else if load_score >= 3 {
        "var(--warning)"
    } else {
        "var(--success)"
    }
}

/// Workload Analyzer. Bars are scaled against the highest score, at least 10.
pub fn workload(data: &WorkloadResponse) -> String {
    let devs = &data.analysis.developer_workload;
    if devs.is_empty() {
        return empty("No workload data found.");
    }

    let max_load = devs.iter().map(|d| d.load_score).max().unwrap_or(0).max(10);
    let rows: String = devs
        .iter()
        .map(|d| {
            let pct = (d.load_score as f64 / max_load as f64 * 100.0).round() as i64;
            format!(
                r#"<tr><td><strong>{}</strong></td><td>{}</td><td>{}</td><td><strong>{}</strong></td><td><div class="load-bar"><div class="load-bar-fill" style="width:{pct}%;background:{}"></div></div></td></tr>"#,
                esc(&d.developer_name),
                d.open_issues,
                d.pending_reviews,
                d.load_score,
                load_color(d.load_score),
            )
        })
        .collect();

    format!(
        r#"<div class="result-card"><div class="result-card-title" style="margin-bottom:14px">Developer Workload — {}</div><table class="workload-table"><thead><tr><th>Developer</th><th>Open Issues</th><th>Pending Reviews</th><th>Load Score</th><th>Load</th></tr></thead><tbody>{rows}</tbody></table><div class="ai-recommendation-box"><strong>💡 AI Recommendation:</strong><br>{}</div></div>"#,
        esc(&data.repo),
        esc(&data.analysis.ai_recommendation),
    )
}

fn section(title: &str, body: &str) -> String {
    format!(
        r#"<div class="result-card"><div class="result-card-title" style="margin-bottom:12px">{title}</div><div class="result-body">{body}</div></div>"#
    )
}

fn paragraph(text: &str) -> String {
    format!(
        r#"<p style="line-height:1.6;color:var(--text-secondary)">{}</p>"#,
        esc(text)
    )
}

/// Repository Analyzer
pub fn repository_analysis(data: &RepositoryAnalysisResponse) -> String {
    let info = &data.repository_info;
    let analysis = &data.analysis;
    let quality = &analysis.code_quality_indicators;

    let header = format!(
        r#"<div class="result-card" style="margin-bottom:16px"><div class="result-card-header" style="border-bottom:1px solid var(--border);padding-bottom:12px;margin-bottom:12px"><div><div class="result-card-title" style="font-size:18px;margin-bottom:6px">📦 {}</div><div style="font-size:13px;color:var(--text-secondary);margin-bottom:8px">{}</div><div style="display:flex;gap:12px;font-size:12px;color:var(--text-tertiary)"><span>⭐ {} stars</span><span>🍴 {} forks</span><span>👁️ {} watchers</span><span>🐛 {} issues</span></div></div></div><div class="result-body"><div class="result-row"><span class="result-label">Language:</span> {}</div><div class="result-row"><span class="result-label">License:</span> {}</div><div class="result-row"><span class="result-label">Repository:</span> <a href="{url}" target="_blank" style="color:var(--primary)">{url}</a></div></div></div>"#,
        esc(&info.name),
        esc(info.description.as_deref().filter(|d| !d.is_empty()).unwrap_or("No description")),
        info.stars,
        info.forks,
        info.watchers,
        info.open_issues,
        esc_opt(info.language.as_deref()),
        esc_opt(info.license.as_deref()),
        url = esc(&info.url),
    );

    let stack = if analysis.technology_stack.is_empty() {
        r#"<span style="color:var(--text-tertiary)">No technology stack detected</span>"#.to_string()
    } else {
        analysis
            .technology_stack
            .iter()
            .map(|t| {
                format!(
                    r#"<span class="result-label-tag" style="background:var(--primary);color:white">{}</span>"#,
                    esc(t)
                )
            })
            .collect()
    };

    let engagement = if quality.community_engagement.eq_ignore_ascii_case("high") {
        "healthy"
    } else {
        "warning"
    };
    let maintenance = if quality.maintenance_status.to_lowercase().contains("active") {
        "healthy"
    } else {
        "warning"
    };
    let indicators = format!(
        r#"<table class="workload-table" style="width:100%"><tbody><tr><td><strong>Repository Size</strong></td><td>{}</td></tr><tr><td><strong>Community Engagement</strong></td><td><span class="status-badge {engagement}">{}</span></td></tr><tr><td><strong>Maintenance Status</strong></td><td><span class="status-badge {maintenance}">{}</span></td></tr><tr><td><strong>Documentation</strong></td><td>{}</td></tr><tr><td><strong>License</strong></td><td>{}</td></tr><tr><td><strong>Contributors</strong></td><td>{}</td></tr></tbody></table>"#,
        esc(&quality.repository_size),
        esc(&quality.community_engagement),
        esc(&quality.maintenance_status),
        esc(&quality.documentation),
        esc(&quality.license),
        quality.contributors,
    );

    [
        header,
        section("📝 Overview", &paragraph(&analysis.overview)),
        section("✨ Key Features", &checklist(&analysis.key_features)),
        section(
            "🛠️ Technology Stack",
            &format!(r#"<div class="result-labels-list">{stack}</div>"#),
        ),
        section("🏗️ Architecture Insights", &paragraph(&analysis.architecture_insights)),
        section("📊 Code Quality Indicators", &indicators),
        section("💡 Recommendations", &checklist(&analysis.recommendations)),
    ]
    .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn friendly_error_checks_codes_in_order() {
        assert!(friendly_error("HTTP 404 / 500").starts_with("Repository not found"));
        assert!(friendly_error("403").starts_with("Access forbidden"));
        assert!(friendly_error("got 401").starts_with("Authentication failed"));
        assert!(friendly_error("API error: 500").starts_with("Server error"));
        assert_eq!(friendly_error("connection refused"), "connection refused");
    }

    #[test]
    fn agent_error_escapes_and_adds_tip_for_404() {
        let html = agent_error("<oops>");
        assert!(html.contains("&lt;oops&gt;"));
        assert!(!html.contains("Tip:"));

        let html = agent_error("API error: 404");
        assert!(html.contains("Repository not found"));
        assert!(html.contains("Tip:"));
    }

    #[test]
    fn workload_scales_and_colours_bars() {
        let data: WorkloadResponse = serde_json::from_value(json!({
            "repo": "acme/api",
            "analysis": {
                "developer_workload": [
                    { "developer_name": "ana", "open_issues": 4, "pending_reviews": 2, "load_score": 8 },
                    { "developer_name": "bo", "open_issues": 1, "pending_reviews": 2, "load_score": 3 },
                    { "developer_name": "cy", "open_issues": 0, "pending_reviews": 1, "load_score": 1 }
                ],
                "ai_recommendation": "Rebalance <now>"
            }
        }))
        .unwrap();

        let html = workload(&data);
        assert!(html.contains("width:80%;background:var(--danger)"));
        assert!(html.contains("width:30%;background:var(--warning)"));
        assert!(html.contains("width:10%;background:var(--success)"));
        assert!(html.contains("Rebalance &lt;now&gt;"));
    }

    #[test]
    fn empty_results_use_fixed_messages() {
        assert!(issue_classifications(&Default::default()).contains("No open issues found in this repository."));
        assert!(pr_intelligence(&Default::default()).contains("No pull requests found."));
        assert!(assignee_recommendations(&Default::default()).contains("No issues to recommend assignees for."));
        assert!(workload(&Default::default()).contains("No workload data found."));
    }

    #[test]
    fn assignee_candidates_show_initials_and_rounded_score() {
        let data: IssueAnalysisResponse = serde_json::from_value(json!({
            "repo": "acme/api",
            "assignee_recommendations": [{
                "issue_number": 3,
                "issue_title": "Login fails",
                "recommended_assignees": [
                    { "developer_name": "octocat", "score": 87.6, "reasoning": "owns auth" },
                    { "developer_name": "", "score": 10.2, "reasoning": "" }
                ]
            }]
        }))
        .unwrap();

        let html = assignee_recommendations(&data);
        assert!(html.contains(r#"<div class="candidate-avatar">OC</div>"#));
        assert!(html.contains(r#"<div class="candidate-score">88</div>"#));
        assert!(html.contains(r#"<div class="candidate-avatar">??</div>"#));
    }

    #[test]
    fn pr_intelligence_lists_reviewers() {
        let data: PrAnalysisResponse = serde_json::from_value(json!({
            "repo": "acme/api",
            "prs_analyzed": 1,
            "pr_intelligence": [{
                "pr_number": 12,
                "pr_title": "Add cache",
                "analysis": { "summary": "Adds LRU", "risk_level": "Medium", "review_checklist": ["tests"] }
            }],
            "reviewer_recommendations": [{
                "pr_number": 12,
                "pr_title": "Add cache",
                "suggested_reviewers": [{ "developer_name": "ana", "confidence_score": 72, "reasoning": "wrote it" }]
            }]
        }))
        .unwrap();

        let html = pr_intelligence(&data);
        assert!(html.contains(r#"<span class="badge-risk medium">Risk: Medium</span>"#));
        assert!(html.contains("<li>tests</li>"));
        assert!(html.contains("Suggested reviewers"));
        assert!(html.contains(r#"<div class="candidate-score">72</div>"#));
    }

    #[test]
    fn repository_analysis_badges_and_fallbacks() {
        let data: RepositoryAnalysisResponse = serde_json::from_value(json!({
            "repository_info": { "name": "api", "stars": 3, "url": "https://github.com/acme/api" },
            "analysis": {
                "overview": "Small API",
                "code_quality_indicators": {
                    "community_engagement": "High",
                    "maintenance_status": "Needs attention",
                    "contributors": 4
                }
            }
        }))
        .unwrap();

        let html = repository_analysis(&data);
        assert!(html.contains("No description"));
        assert!(html.contains("No technology stack detected"));
        assert!(html.contains(r#"<span class="status-badge healthy">High</span>"#));
        assert!(html.contains(r#"<span class="status-badge warning">Needs attention</span>"#));
        assert!(html.contains("<td>4</td>"));
    }
}
