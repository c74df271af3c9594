//! `/ui/*` fragments and the frontend shell

use axum::http::Method;
use httpmock::prelude::*;
use serde_json::json;

use crate::common::{TestApp, TOKEN};

#[tokio::test]
async fn fragments_without_token_show_the_banner() {
    let app = TestApp::start(None).await;

    let res = app.get("/ui/metrics").await;
    assert_eq!(res.status, 401);
    assert!(res.body.contains("token-banner"));
}

#[tokio::test]
async fn panel_headers() {
    let app = TestApp::start(None).await;

    let header = app.get("/ui/panels/workload-analyzer").await.json();
    assert_eq!(header["title"], "Workload Analyzer");
    assert_eq!(header["breadcrumb"], "/ AI Agent");

    let unknown = app.get("/ui/panels/nope").await.json();
    assert_eq!(unknown["title"], "Dashboard");
}

#[tokio::test]
async fn pull_filter_must_be_known() {
    let app = TestApp::start(Some(TOKEN)).await;

    let res = app.get("/ui/pulls?filter=draft").await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn upstream_failure_renders_failed_to_load() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user/repos");
            then.status(502).body("bad gateway");
        })
        .await;

    let res = app.get("/ui/repos").await;
    assert_eq!(res.status, 200);
    assert!(res.body.contains("Failed to load"));
}

#[tokio::test]
async fn invalid_agent_input_never_calls_the_service() {
    let app = TestApp::start(None).await;
    let analyze = app
        .ai
        .mock_async(|when, then| {
            when.method(POST).path("/api/ai/analyze-prs");
            then.status(200).json_body(json!({}));
        })
        .await;

    let res = app
        .post_json("/ui/agents/pr-intelligence", json!({ "input": "not a repo" }))
        .await;
    assert_eq!(res.status, 200);
    let body = res.json();
    assert_eq!(body["status"], "invalid");
    assert!(body["html"].as_str().unwrap().contains("Please enter a valid repo"));
    assert_eq!(body["button_label"], "🚀 Analyze PRs");
    analyze.assert_hits_async(0).await;
    assert!(app.state.history.list().unwrap().is_empty());
}

#[tokio::test]
async fn agent_run_records_history() {
    let app = TestApp::start(None).await;
    let analyze = app
        .ai
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/ai/analyze-workload")
                .json_body(json!({ "owner": "acme", "repo": "api" }));
            then.status(200).json_body(json!({
                "repo": "acme/api",
                "analysis": {
                    "developer_workload": [
                        { "developer_name": "dev", "open_issues": 3, "pending_reviews": 1, "load_score": 7 }
                    ],
                    "ai_recommendation": "Spread the reviews"
                }
            }));
        })
        .await;

    let res = app
        .post_json(
            "/ui/agents/workload-analyzer",
            json!({ "input": "https://github.com/acme/api" }),
        )
        .await;
    let body = res.json();
    assert_eq!(body["status"], "completed");
    assert!(body["html"].as_str().unwrap().contains("Spread the reviews"));
    analyze.assert_hits_async(1).await;

    let history = app.get("/ui/history").await;
    assert!(history.body.contains(r#"<span id="history-count" hidden>1</span>"#));
    assert!(history.body.contains("Workload Analyzer"));
    assert!(history.body.contains("acme/api"));
    assert!(history.body.contains("Guest"));

    let cleared = app.send(Method::DELETE, "/ui/history", None).await;
    assert!(cleared.body.contains(r#"<span id="history-count" hidden>0</span>"#));
    assert!(app.state.history.list().unwrap().is_empty());
}

#[tokio::test]
async fn agent_failure_shows_friendly_error() {
    let app = TestApp::start(None).await;
    app.ai
        .mock_async(|when, then| {
            when.method(POST).path("/api/ai/analyze-repository");
            then.status(404).json_body(json!({ "detail": "Repository not found" }));
        })
        .await;

    let body = app
        .post_json("/ui/agents/repository-analyzer", json!({ "input": "acme/missing" }))
        .await
        .json();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["button_label"], "🚀 Analyze Repository");
    assert!(app.state.history.list().unwrap().is_empty());
}

#[tokio::test]
async fn unreadable_agent_request_still_returns_a_trigger_label() {
    let app = TestApp::start(None).await;

    for (content_type, body) in [(Some("application/json"), "{oops"), (None, "acme/api")] {
        let res = app
            .send_raw(Method::POST, "/ui/agents/issue-classifier", content_type, body)
            .await;
        assert_eq!(res.status, 200);
        let json = res.json();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["button_label"], "🚀 Analyze Issues");
        assert!(json["html"].as_str().unwrap().contains("Please enter a valid repo"));
    }
}

#[tokio::test]
async fn unknown_agent_is_a_bad_request() {
    let app = TestApp::start(None).await;

    let res = app.post_json("/ui/agents/fortune-teller", json!({ "input": "acme/api" })).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn logout_resets_sidebar_to_guest() {
    let app = TestApp::start(None).await;
    app.state
        .history
        .set_profile(&devintel::history::UserProfile {
            name: Some("Ada Lovelace".into()),
            email: None,
            user_id: None,
        })
        .unwrap();

    let sidebar = app.get("/ui/sidebar").await;
    assert!(sidebar.body.contains("Ada Lovelace"));

    let res = app.send(Method::POST, "/ui/logout", None).await;
    assert!(res.body.contains("Guest"));
    assert!(app.state.history.profile().unwrap().is_none());
}

#[tokio::test]
async fn unknown_paths_serve_the_shell() {
    let app = TestApp::start(None).await;

    let res = app.get("/some/deep/link").await;
    assert_eq!(res.status, 200);
    assert!(res.headers["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(res.body.contains("DevIntel"));

    let script = app.get("/app.js").await;
    assert_eq!(script.status, 200);
    assert!(script.headers["content-type"].to_str().unwrap().contains("javascript"));
    // the agent trigger is re-enabled even when the request fails
    assert!(script.body.contains("} finally {"));
}
