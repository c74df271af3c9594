//! Connection status of the configured token

use serde::Serialize;
use tracing::debug;

use crate::github::types::RawAuthenticatedUser;
use crate::github::{GitHubResult, GitHubSession};

/// The account behind the token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub public_repos: u64,
    pub total_private_repos: u64,
}

impl From<RawAuthenticatedUser> for AccountUser {
    fn from(u: RawAuthenticatedUser) -> Self {
        Self {
            login: u.login,
            name: u.name,
            avatar_url: u.avatar_url,
            public_repos: u.public_repos,
            total_private_repos: u.total_private_repos.unwrap_or(0),
        }
    }
}

/// Body of `GET /api/settings/token-status`
#[derive(Debug, Clone, Serialize)]
pub struct TokenStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TokenStatus {
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            user: None,
            error: None,
        }
    }

    pub fn from_result(result: GitHubResult<AccountUser>) -> Self {
        match result {
            Ok(user) => Self {
                connected: true,
                user: Some(user),
                error: None,
            },
            Err(e) => {
                debug!(error = %e, "token check failed");
                Self {
                    connected: false,
                    user: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Fetch the authenticated account
pub async fn current_user(gh: &GitHubSession) -> GitHubResult<AccountUser> {
    let user: RawAuthenticatedUser = gh.get("/user").await?;
    Ok(user.into())
}

/// Check the session's token; never fails
pub async fn token_status(gh: &GitHubSession) -> TokenStatus {
    TokenStatus::from_result(current_user(gh).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubError;

    #[test]
    fn connected_status_carries_user() {
        let status = TokenStatus::from_result(Ok(AccountUser {
            login: "octocat".into(),
            name: None,
            avatar_url: None,
            public_repos: 8,
            total_private_repos: 0,
        }));
        let v = serde_json::to_value(&status).unwrap();
        assert_eq!(v["connected"], true);
        assert_eq!(v["user"]["login"], "octocat");
        assert_eq!(v["user"]["total_private_repos"], 0);
        assert!(v.get("error").is_none());
    }

    #[test]
    fn failure_reports_disconnected_with_error() {
        let status = TokenStatus::from_result(Err(GitHubError::Upstream {
            status: 401,
            body: "Bad credentials".into(),
        }));
        let v = serde_json::to_value(&status).unwrap();
        assert_eq!(v["connected"], false);
        assert_eq!(v["error"], "GitHub API 401: Bad credentials");

        let v = serde_json::to_value(TokenStatus::disconnected()).unwrap();
        assert_eq!(v, serde_json::json!({ "connected": false }));
    }
}
