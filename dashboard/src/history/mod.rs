//! History of successful agent runs and the local user profile
//!
//! Both live in a [`Storage`] under the same keys the dashboard has always
//! used, each as one JSON blob.

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Storage key of the history list
pub const HISTORY_KEY: &str = "devIntelHistory";
/// Storage key of the user profile
pub const USER_KEY: &str = "devIntelUser";
/// Entries kept, newest first
pub const HISTORY_LIMIT: usize = 50;

/// One successful agent invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in epoch milliseconds
    pub id: i64,
    pub agent: String,
    pub repository: String,
    /// ISO-8601 with millisecond precision
    pub timestamp: String,
    pub user: String,
}

impl HistoryEntry {
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Locally stored identity shown in the sidebar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl UserProfile {
    /// Name, falling back to the user id
    pub fn display_name(&self) -> Option<&str> {
        non_empty(&self.name).or_else(|| non_empty(&self.user_id))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// History log and profile over a key/value [`Storage`]
#[derive(Clone)]
pub struct HistoryStore {
    storage: Arc<dyn Storage>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Record a run happening now
    pub fn record(&self, agent: &str, repository: &str) -> StorageResult<HistoryEntry> {
        self.record_at(agent, repository, Utc::now())
    }

    /// Prepend an entry stamped `at` and keep the newest [`HISTORY_LIMIT`]
    pub fn record_at(
        &self,
        agent: &str,
        repository: &str,
        at: DateTime<Utc>,
    ) -> StorageResult<HistoryEntry> {
        let entry = HistoryEntry {
            id: at.timestamp_millis(),
            agent: agent.to_string(),
            repository: repository.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            user: self.user_name()?,
        };

        let mut entries = 0;
        self.storage.update_item(HISTORY_KEY, &mut |current| {
            let mut history: Vec<HistoryEntry> = match current {
                Some(raw) => serde_json::from_str(&raw)?,
                None => Vec::new(),
            };
            history.insert(0, entry.clone());
            history.truncate(HISTORY_LIMIT);
            entries = history.len();
            Ok(serde_json::to_string(&history)?)
        })?;

        debug!(agent, repository, entries, "recorded history entry");
        Ok(entry)
    }

    /// Stored entries, newest first
    pub fn list(&self) -> StorageResult<Vec<HistoryEntry>> {
        match self.storage.get_item(HISTORY_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove_item(HISTORY_KEY)
    }

    pub fn profile(&self) -> StorageResult<Option<UserProfile>> {
        match self.storage.get_item(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        self.storage
            .set_item(USER_KEY, &serde_json::to_string(profile)?)
    }

    /// Forget the stored profile (logout)
    pub fn clear_profile(&self) -> StorageResult<()> {
        self.storage.remove_item(USER_KEY)
    }

    /// Name written into new entries
    fn user_name(&self) -> StorageResult<String> {
        Ok(match self.profile()? {
            Some(profile) => profile.display_name().unwrap_or("Unknown").to_string(),
            None => "Guest".to_string(),
        })
    }
}

/// Icon shown next to an agent name in the history panel
pub fn agent_icon(agent: &str) -> &'static str {
    match agent {
        "Repository Analyzer" => "📦",
        "Issue Classifier" => "🏷️",
        "PR Intelligence" => "🔍",
        "Assignee Recommender" => "👤",
        "Workload Analyzer" => "⚖️",
        "Test Agent" => "🧪",
        _ => "🤖",
    }
}
