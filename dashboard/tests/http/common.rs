//! Shared fixture for the HTTP tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use httpmock::MockServer;
use serde_json::Value;
use tower::ServiceExt;

use devintel::agents::AiClient;
use devintel::github::{Credential, GitHubClient, TokenStore};
use devintel::history::HistoryStore;
use devintel::web::{create_router, AppState};

pub const TOKEN: &str = "ghp_test";

pub struct TestApp {
    pub github: MockServer,
    pub ai: MockServer,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

impl TestApp {
    /// App with mocked upstreams, optionally holding a token
    pub async fn start(token: Option<&str>) -> Self {
        let github = MockServer::start_async().await;
        let ai = MockServer::start_async().await;
        let state = AppState::new(
            GitHubClient::new(github.base_url()),
            TokenStore::new(token.and_then(|t| Credential::new(t))),
            Arc::new(AiClient::new(ai.base_url())),
            HistoryStore::in_memory(),
        );
        Self { github, ai, state }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone(), None)
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    /// Send `body` as is, with an optional content type
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &'static str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.dispatch(builder.body(Body::from(body)).unwrap()).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}
