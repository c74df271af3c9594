//! The run protocol shared by every agent panel
//!
//! parse the repository input, show a loading state, call the analysis
//! service, record history and render the result, then hand the trigger
//! back. The DOM side is abstracted by [`AgentSurface`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::client::{AnalysisError, AnalysisService};
use super::types::{
    AnalysisRequest, IssueAnalysisResponse, PrAnalysisResponse, RepositoryAnalysisResponse,
    WorkloadResponse,
};
use crate::history::HistoryStore;
use crate::view::{self, parse_repo, RepoRef};

/// Trigger label while a run is in flight
pub const BUSY_LABEL: &str = "⏳ Analyzing…";

/// Shown when the repository input cannot be parsed
pub const INVALID_REPO_MESSAGE: &str = "Please enter a valid repo: owner/repo or GitHub URL";

/// The five analysis agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    IssueClassifier,
    PrIntelligence,
    AssigneeRecommender,
    WorkloadAnalyzer,
    RepositoryAnalyzer,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::IssueClassifier,
        AgentKind::PrIntelligence,
        AgentKind::AssigneeRecommender,
        AgentKind::WorkloadAnalyzer,
        AgentKind::RepositoryAnalyzer,
    ];

    /// Analysis service endpoint. Issue classification and assignee
    /// recommendation read different parts of the same answer.
    pub fn endpoint(self) -> &'static str {
        match self {
            AgentKind::IssueClassifier | AgentKind::AssigneeRecommender => "analyze-issues",
            AgentKind::PrIntelligence => "analyze-prs",
            AgentKind::WorkloadAnalyzer => "analyze-workload",
            AgentKind::RepositoryAnalyzer => "analyze-repository",
        }
    }

    /// Name recorded in history
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::IssueClassifier => "Issue Classifier",
            AgentKind::PrIntelligence => "PR Intelligence",
            AgentKind::AssigneeRecommender => "Assignee Recommender",
            AgentKind::WorkloadAnalyzer => "Workload Analyzer",
            AgentKind::RepositoryAnalyzer => "Repository Analyzer",
        }
    }

    /// Panel id, also used in `/ui/agents/{agent}`
    pub fn slug(self) -> &'static str {
        match self {
            AgentKind::IssueClassifier => "issue-classifier",
            AgentKind::PrIntelligence => "pr-intelligence",
            AgentKind::AssigneeRecommender => "assignee-recommender",
            AgentKind::WorkloadAnalyzer => "workload-analyzer",
            AgentKind::RepositoryAnalyzer => "repository-analyzer",
        }
    }

    /// Trigger label when idle
    pub fn button_label(self) -> &'static str {
        match self {
            AgentKind::IssueClassifier => "🚀 Analyze Issues",
            AgentKind::PrIntelligence => "🚀 Analyze PRs",
            AgentKind::AssigneeRecommender => "🚀 Find Assignees",
            AgentKind::WorkloadAnalyzer => "🚀 Analyze Workload",
            AgentKind::RepositoryAnalyzer => "🚀 Analyze Repository",
        }
    }

    /// Render a successful answer of this agent
    pub fn render(self, result: Value) -> Result<String, serde_json::Error> {
        Ok(match self {
            AgentKind::IssueClassifier => {
                view::agents::issue_classifications(&serde_json::from_value::<IssueAnalysisResponse>(result)?)
            }
            AgentKind::AssigneeRecommender => {
                view::agents::assignee_recommendations(&serde_json::from_value::<IssueAnalysisResponse>(result)?)
            }
            AgentKind::PrIntelligence => {
                view::agents::pr_intelligence(&serde_json::from_value::<PrAnalysisResponse>(result)?)
            }
            AgentKind::WorkloadAnalyzer => {
                view::agents::workload(&serde_json::from_value::<WorkloadResponse>(result)?)
            }
            AgentKind::RepositoryAnalyzer => view::agents::repository_analysis(
                &serde_json::from_value::<RepositoryAnalysisResponse>(result)?,
            ),
        })
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.label().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                let known: Vec<_> = AgentKind::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown agent '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// State of an agent's trigger control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "label", rename_all = "lowercase")]
pub enum TriggerState {
    /// Disabled while a run is in flight
    Busy,
    /// Enabled, showing the given label
    Idle(&'static str),
}

impl TriggerState {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerState::Busy => BUSY_LABEL,
            TriggerState::Idle(label) => label,
        }
    }
}

/// Where an agent run shows its output
pub trait AgentSurface: Send {
    /// Replace the result area
    fn show(&mut self, html: String);

    fn set_trigger(&mut self, state: TriggerState);
}

/// Surface that keeps every update, used by the HTTP and CLI front ends
#[derive(Debug, Default)]
pub struct CapturedSurface {
    pub frames: Vec<String>,
    pub triggers: Vec<TriggerState>,
}

impl CapturedSurface {
    /// Result area as last shown
    pub fn html(&self) -> &str {
        self.frames.last().map(String::as_str).unwrap_or_default()
    }

    /// Trigger as last set, `None` when the run never touched it
    pub fn trigger(&self) -> Option<&TriggerState> {
        self.triggers.last()
    }
}

impl AgentSurface for CapturedSurface {
    fn show(&mut self, html: String) {
        self.frames.push(html);
    }

    fn set_trigger(&mut self, state: TriggerState) {
        self.triggers.push(state);
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FlowOutcome {
    /// Input rejected before any network call
    Invalid,
    Completed { repository: String },
    Failed { message: String },
}

impl FlowOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            FlowOutcome::Invalid => "invalid",
            FlowOutcome::Completed { .. } => "completed",
            FlowOutcome::Failed { .. } => "failed",
        }
    }
}

/// Runs agents against an analysis service, recording successes in history
pub struct AgentFlow<'a> {
    service: &'a dyn AnalysisService,
    history: &'a HistoryStore,
}

impl<'a> AgentFlow<'a> {
    pub fn new(service: &'a dyn AnalysisService, history: &'a HistoryStore) -> Self {
        Self { service, history }
    }

    pub async fn run(
        &self,
        kind: AgentKind,
        input: &str,
        surface: &mut dyn AgentSurface,
    ) -> FlowOutcome {
        let Some(repo) = parse_repo(input) else {
            surface.show(view::agents::agent_error(INVALID_REPO_MESSAGE));
            return FlowOutcome::Invalid;
        };

        surface.set_trigger(TriggerState::Busy);
        surface.show(view::agents::agent_loading());

        let outcome = match self.call(kind, &repo).await {
            Ok(html) => {
                surface.show(html);
                FlowOutcome::Completed {
                    repository: repo.slug(),
                }
            }
            Err(e) => {
                warn!(agent = %kind, repository = %repo.slug(), error = %e, "agent run failed");
                let message = e.to_string();
                surface.show(view::agents::agent_error(&message));
                FlowOutcome::Failed { message }
            }
        };

        surface.set_trigger(TriggerState::Idle(kind.button_label()));
        outcome
    }

    async fn call(&self, kind: AgentKind, repo: &RepoRef) -> Result<String, AnalysisError> {
        let request = AnalysisRequest {
            owner: repo.owner.clone(),
            repo: repo.repo.clone(),
        };
        let result = self.service.analyze(kind.endpoint(), &request).await?;

        // Recorded as soon as the service answers, before rendering
        if let Err(e) = self.history.record(kind.label(), &repo.slug()) {
            warn!(agent = %kind, error = %e, "failed to record history entry");
        }
        info!(agent = %kind, repository = %repo.slug(), "agent run completed");

        Ok(kind.render(result)?)
    }
}
