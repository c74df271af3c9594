//! `/api/*` endpoints

use axum::http::Method;
use httpmock::prelude::*;
use serde_json::{json, Value};

use crate::common::{TestApp, TOKEN};

#[tokio::test]
async fn data_endpoints_require_a_token() {
    let app = TestApp::start(None).await;

    for uri in [
        "/api/repos",
        "/api/repos/acme/api/pulls",
        "/api/repos/acme/api/contributors",
        "/api/stats",
        "/api/pulls",
        "/api/activity",
    ] {
        let res = app.get(uri).await;
        assert_eq!(res.status, 401, "{uri}");
        assert_eq!(res.json(), json!({ "error": "No GitHub token configured" }));
    }
}

#[tokio::test]
async fn token_status_without_token_is_disconnected() {
    let app = TestApp::start(None).await;

    let res = app.get("/api/settings/token-status").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.json(), json!({ "connected": false }));
}

#[tokio::test]
async fn saving_a_token_enables_the_proxy() {
    let app = TestApp::start(None).await;
    let user = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/user")
                .header("authorization", "token ghp_saved");
            then.status(200).json_body(json!({
                "login": "octocat",
                "name": "The Octocat",
                "public_repos": 8
            }));
        })
        .await;

    let missing = app.post_json("/api/settings/token", json!({})).await;
    assert_eq!(missing.status, 400);
    assert_eq!(missing.json()["error"], "Token is required");

    let blank = app.post_json("/api/settings/token", json!({ "token": "   " })).await;
    assert_eq!(blank.status, 400);

    let saved = app
        .post_json("/api/settings/token", json!({ "token": "ghp_saved" }))
        .await;
    assert_eq!(saved.status, 200);
    assert_eq!(saved.json(), json!({ "ok": true }));

    let status = app.get("/api/settings/token-status").await.json();
    assert_eq!(status["connected"], true);
    assert_eq!(status["user"]["login"], "octocat");
    user.assert_hits_async(1).await;
}

#[tokio::test]
async fn unreadable_token_body_is_a_bad_request() {
    let app = TestApp::start(None).await;

    let cases = [
        (Some("application/json"), "not json"),
        (Some("application/json"), r#""ghp_bare_string""#),
        (None, r#"{"token":"ghp_x"}"#),
        (Some("text/plain"), "ghp_x"),
    ];
    for (content_type, body) in cases {
        let res = app
            .send_raw(Method::POST, "/api/settings/token", content_type, body)
            .await;
        assert_eq!(res.status, 400, "{content_type:?} {body}");
        assert_eq!(res.json(), json!({ "error": "Token is required" }));
    }
    assert!(!app.state.tokens.is_configured());
}

#[tokio::test]
async fn token_status_reports_upstream_rejection() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user");
            then.status(401).json_body(json!({ "message": "Bad credentials" }));
        })
        .await;

    let status = app.get("/api/settings/token-status").await.json();
    assert_eq!(status["connected"], false);
    assert!(status["error"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn repos_report_truncation_in_a_header() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user/repos").query_param("page", "1");
            then.status(200).json_body(json!([
                { "id": 1, "name": "api", "full_name": "acme/api", "stargazers_count": 4 },
                { "id": 2, "name": "web", "full_name": "acme/web" }
            ]));
        })
        .await;

    let res = app.get("/api/repos").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.headers["x-devintel-truncated"], "false");
    let body = res.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["full_name"], "acme/api");
    assert_eq!(body[0]["stargazers_count"], 4);
}

#[tokio::test]
async fn stats_count_only_pulls_with_a_merge_timestamp() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user/repos");
            then.status(200).json_body(json!([
                { "id": 1, "name": "api", "full_name": "acme/api", "updated_at": "2024-06-01T00:00:00Z" }
            ]));
        })
        .await;
    app.github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/pulls")
                .query_param("state", "all")
                .query_param("per_page", "20");
            then.status(200).json_body(json!([
                { "number": 1, "state": "closed", "created_at": "2024-05-01T00:00:00Z", "merged_at": "2024-05-01T02:00:00Z" },
                { "number": 2, "state": "closed", "created_at": "2024-05-02T00:00:00Z", "merged_at": "2024-05-02T04:00:00Z" },
                { "number": 3, "state": "closed", "created_at": "2024-05-03T00:00:00Z", "merged_at": "2024-05-03T06:00:00Z" },
                { "number": 4, "state": "closed", "created_at": "2024-05-04T00:00:00Z", "merged_at": null },
                { "number": 5, "state": "open", "created_at": "2024-05-05T00:00:00Z" }
            ]));
        })
        .await;

    let res = app.get("/api/stats").await;
    assert_eq!(res.status, 200);
    let stats = res.json();
    assert_eq!(stats["repoCount"], 1);
    assert_eq!(stats["totalPRs"], 5);
    assert_eq!(stats["mergedPRs"], 3);
    assert_eq!(stats["openPRs"], 1);
    assert_eq!(stats["avgCycleHours"], 4.0);
    assert_eq!(stats["sources"][0]["status"], "ok");
}

#[tokio::test]
async fn pull_overview_skips_failing_repositories() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user/repos");
            then.status(200).json_body(json!([
                { "id": 1, "name": "api", "full_name": "acme/api", "updated_at": "2024-06-02T00:00:00Z" },
                { "id": 2, "name": "gone", "full_name": "acme/gone", "updated_at": "2024-06-01T00:00:00Z" }
            ]));
        })
        .await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/api/pulls");
            then.status(200).json_body(json!([
                { "number": 9, "title": "Add cache", "state": "open", "created_at": "2024-06-01T00:00:00Z", "user": { "login": "dev" } }
            ]));
        })
        .await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/gone/pulls");
            then.status(404).body("Not Found");
        })
        .await;

    let res = app.get("/api/pulls").await;
    assert_eq!(res.status, 200);
    let body = res.json();
    assert_eq!(body["pulls"].as_array().unwrap().len(), 1);
    assert_eq!(body["pulls"][0]["repo_name"], "api");
    assert_eq!(body["pulls"][0]["merged"], false);
    assert_eq!(body["sources"][1]["repo"], "acme/gone");
    assert_eq!(body["sources"][1]["status"], "failed");
}

#[tokio::test]
async fn contributors_tolerate_a_pending_statistics_body() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/repos/acme/api/stats/contributors");
            then.status(202).json_body(json!({}));
        })
        .await;

    let res = app.get("/api/repos/acme/api/contributors").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.json(), json!([]));
}

fn shuffled_pulls(count: u64) -> Value {
    // 13 is coprime with 35, so minutes cover 0..35 out of order
    Value::Array(
        (0..count)
            .map(|n| {
                json!({
                    "number": n,
                    "title": format!("PR {n}"),
                    "state": "open",
                    "created_at": "2024-01-01T00:00:00Z",
                    "updated_at": format!("2024-01-01T00:{:02}:00Z", (n * 13) % count),
                    "user": { "login": "dev" }
                })
            })
            .collect(),
    )
}

#[tokio::test]
async fn repo_pulls_are_newest_first_and_capped() {
    let app = TestApp::start(Some(TOKEN)).await;
    let pulls = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/pulls")
                .query_param("state", "all")
                .query_param("page", "1");
            then.status(200).json_body(shuffled_pulls(35));
        })
        .await;

    let res = app.get("/api/repos/acme/api/pulls").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.headers["x-devintel-truncated"], "false");

    let body = res.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 30);
    assert_eq!(items[0]["updated_at"], "2024-01-01T00:34:00Z");
    assert_eq!(items[29]["updated_at"], "2024-01-01T00:05:00Z");
    let updated: Vec<&str> = items.iter().map(|p| p["updated_at"].as_str().unwrap()).collect();
    assert!(updated.windows(2).all(|w| w[0] > w[1]));
    assert!(items.iter().all(|p| p["repo_name"] == "api"));
    pulls.assert_hits_async(1).await;
}

#[tokio::test]
async fn blank_pull_state_means_all() {
    let app = TestApp::start(Some(TOKEN)).await;
    let all = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/pulls")
                .query_param("state", "all");
            then.status(200).json_body(json!([]));
        })
        .await;
    let closed = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/repos/acme/api/pulls")
                .query_param("state", "closed");
            then.status(200).json_body(json!([]));
        })
        .await;

    for uri in [
        "/api/repos/acme/api/pulls?state=",
        "/api/repos/acme/api/pulls?state=%20",
        "/api/repos/acme/api/pulls",
    ] {
        let res = app.get(uri).await;
        assert_eq!(res.status, 200, "{uri}");
        assert_eq!(res.json(), json!([]));
    }
    all.assert_hits_async(3).await;

    app.get("/api/repos/acme/api/pulls?state=closed").await;
    closed.assert_hits_async(1).await;
}

#[tokio::test]
async fn activity_keeps_the_first_twenty_events() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user");
            then.status(200).json_body(json!({ "login": "octocat" }));
        })
        .await;
    let events: Vec<Value> = (0..25)
        .map(|n| {
            json!({
                "id": n.to_string(),
                "type": "ForkEvent",
                "actor": { "login": "hubot" },
                "repo": { "name": format!("acme/repo-{n}") }
            })
        })
        .collect();
    let received = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/users/octocat/received_events")
                .query_param("per_page", "30");
            then.status(200).json_body(Value::Array(events));
        })
        .await;

    let res = app.get("/api/activity").await;
    assert_eq!(res.status, 200);
    let body = res.json();
    let feed = body.as_array().unwrap();
    assert_eq!(feed.len(), 20);
    assert_eq!(feed[0]["id"], "0");
    assert_eq!(feed[19]["id"], "19");
    assert_eq!(feed[0]["action"], "forked");
    assert_eq!(feed[0]["detail"], "acme/repo-0");
    received.assert_hits_async(1).await;
}

#[tokio::test]
async fn upstream_failure_is_a_server_error() {
    let app = TestApp::start(Some(TOKEN)).await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/user/repos");
            then.status(500).body("boom");
        })
        .await;

    let res = app.get("/api/repos").await;
    assert_eq!(res.status, 500);
    assert!(res.json()["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn override_header_replaces_the_stored_token() {
    let app = TestApp::start(None).await;
    let events = app
        .github
        .mock_async(|when, then| {
            when.method(GET)
                .path("/user")
                .header("authorization", "token ghp_header");
            then.status(200).json_body(json!({ "login": "octocat" }));
        })
        .await;
    app.github
        .mock_async(|when, then| {
            when.method(GET).path("/users/octocat/received_events");
            then.status(200).json_body(json!([
                { "id": "1", "type": "WatchEvent", "actor": { "login": "hubot" }, "repo": { "name": "acme/api" } }
            ]));
        })
        .await;

    let request = axum::http::Request::builder()
        .uri("/api/activity")
        .header("x-github-token", "ghp_header")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router(), request).await.unwrap();
    assert_eq!(response.status(), 200);
    events.assert_hits_async(1).await;
}
