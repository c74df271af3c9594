//! GitHub REST access
//!
//! - [`client`]: credential handling, authenticated GET, capped pagination
//! - [`error`]: the failure taxonomy for upstream calls
//! - [`types`]: the slices of GitHub payloads the dashboard reads

pub mod client;
pub mod error;
pub mod types;

pub use client::{
    Credential, GitHubClient, GitHubSession, Paginated, TokenStore, DEFAULT_API_URL, MAX_PAGES,
    PER_PAGE,
};
pub use error::{GitHubError, GitHubResult};
