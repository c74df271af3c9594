//! AI analysis agents: result contracts, service client and run protocol

pub mod client;
pub mod flow;
pub mod types;

pub use client::{AiClient, AnalysisError, AnalysisService, DEFAULT_AI_URL};
pub use flow::{
    AgentFlow, AgentKind, AgentSurface, CapturedSurface, FlowOutcome, TriggerState, BUSY_LABEL,
    INVALID_REPO_MESSAGE,
};
pub use types::AnalysisRequest;
