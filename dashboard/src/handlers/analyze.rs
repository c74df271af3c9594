//! Analyze command handler
//!
//! Runs one agent through the same flow as the dashboard panels and prints
//! the rendered fragment.

use anyhow::{bail, Result};

use super::CommandContext;
use crate::agents::{AgentFlow, AgentKind, CapturedSurface, FlowOutcome};

/// Handle the `analyze` command
pub async fn run_analyze(ctx: &CommandContext, agent: AgentKind, repo: &str) -> Result<()> {
    let service = ctx.ai_client();
    let history = ctx.history().await?;

    if ctx.is_verbose() {
        eprintln!("Running {} against {} ...", agent.label(), service.base_url());
    }

    let mut surface = CapturedSurface::default();
    let outcome = AgentFlow::new(&service, history)
        .run(agent, repo, &mut surface)
        .await;

    println!("{}", surface.html());

    match outcome {
        FlowOutcome::Completed { repository } => {
            eprintln!("{} finished for {}", agent.label(), repository);
            Ok(())
        }
        FlowOutcome::Invalid => bail!("invalid repository: {repo}"),
        FlowOutcome::Failed { message } => bail!("{} failed: {message}", agent.label()),
    }
}
