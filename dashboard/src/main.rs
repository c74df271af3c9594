use anyhow::Result;
use clap::Parser;

use devintel::cli::{Cli, Commands};
use devintel::config::Settings;
use devintel::handlers::{self, CommandContext};
use devintel::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose > 0)?;

    let settings = Settings::load(cli.overrides())?;
    let ctx = CommandContext::new(settings, cli.verbose);

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve {
            port,
            bind,
            static_dir,
        } => {
            handlers::run_serve(&ctx, port, bind, static_dir).await?;
        }
        Commands::Analyze { agent, repo } => {
            handlers::run_analyze(&ctx, agent, &repo).await?;
        }
        Commands::History { command } => {
            handlers::run_history_command(&ctx, command).await?;
        }
        Commands::User { command } => {
            handlers::run_user_command(&ctx, command).await?;
        }
    }

    Ok(())
}
