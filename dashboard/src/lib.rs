//! DevIntel: a GitHub activity dashboard with AI repository analysis agents
//!
//! The web server proxies the GitHub REST API with a server-held token,
//! aggregates repository metrics, renders dashboard fragments and forwards
//! analysis requests to an external AI service. Agent runs are recorded in
//! a small local history.

pub mod agents;
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod github;
pub mod handlers;
pub mod history;
pub mod logging;
pub mod view;

#[cfg(feature = "web")]
pub mod web;
