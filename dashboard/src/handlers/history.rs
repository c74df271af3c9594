//! History command handlers

use anyhow::Result;
use chrono::Utc;

use super::CommandContext;
use crate::cli::HistoryCommands;
use crate::history::agent_icon;
use crate::view::time_ago;

/// Handle `history` subcommands
pub async fn run_history_command(ctx: &CommandContext, command: HistoryCommands) -> Result<()> {
    let store = ctx.history().await?;

    match command {
        HistoryCommands::List { json } => {
            let entries = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("No history yet");
                return Ok(());
            }

            let now = Utc::now();
            println!("{} run(s):", entries.len());
            for entry in entries {
                let when = entry
                    .recorded_at()
                    .map(|ts| time_ago(ts, now))
                    .unwrap_or_else(|| entry.timestamp.clone());
                println!(
                    "  {} {:<22} {:<32} {:<10} {}",
                    agent_icon(&entry.agent),
                    entry.agent,
                    entry.repository,
                    when,
                    entry.user
                );
            }
        }
        HistoryCommands::Clear => {
            store.clear()?;
            println!("History cleared");
        }
    }

    Ok(())
}
