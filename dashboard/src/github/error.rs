//! Error types for GitHub REST calls
//!
//! Every failure an upstream call can produce, from a missing credential to a
//! body that does not parse.

use thiserror::Error;

/// Errors that can occur when calling the GitHub REST API
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token stored and none supplied with the request
    #[error("No GitHub token configured")]
    NoToken,

    /// GitHub answered with a non-2xx status
    #[error("GitHub API {status}: {body}")]
    Upstream {
        /// HTTP status code returned by GitHub
        status: u16,
        /// Raw response body, passed through unredacted
        body: String,
    },

    /// The request never produced a response
    #[error("request to GitHub failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("failed to parse GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GitHubError {
    /// True when the failure is the missing-credential case
    pub fn is_no_token(&self) -> bool {
        matches!(self, GitHubError::NoToken)
    }
}

/// Result type alias for GitHub operations
pub type GitHubResult<T> = Result<T, GitHubError>;
