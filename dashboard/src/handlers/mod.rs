//! Command handlers module
//!
//! CommandContext carries the resolved settings and lazily opened resources
//! shared across handlers.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::OnceCell;

use crate::agents::AiClient;
use crate::config::Settings;
use crate::history::{FileStorage, HistoryStore};

pub mod analyze;
pub mod history;
pub mod user;

pub use analyze::run_analyze;
pub use history::run_history_command;
pub use user::run_user_command;

#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "web")]
pub use web::run_serve;

/// Shared context for command handlers with lazy-loaded resources.
pub struct CommandContext {
    pub settings: Settings,
    pub verbose: u8,

    history: OnceCell<HistoryStore>,
}

impl CommandContext {
    pub fn new(settings: Settings, verbose: u8) -> Self {
        Self {
            settings,
            verbose,
            history: OnceCell::new(),
        }
    }

    /// History store over the configured storage file
    pub async fn history(&self) -> Result<&HistoryStore> {
        self.history
            .get_or_try_init(|| async {
                tracing::debug!(path = %self.settings.storage_path.display(), "opening history store");
                Ok(HistoryStore::new(Arc::new(FileStorage::open(
                    &self.settings.storage_path,
                ))))
            })
            .await
    }

    /// Client for the AI analysis service
    pub fn ai_client(&self) -> AiClient {
        AiClient::new(&self.settings.ai_url)
    }

    /// Check if verbose mode is enabled (any -v flag)
    pub fn is_verbose(&self) -> bool {
        self.verbose >= 1
    }
}
