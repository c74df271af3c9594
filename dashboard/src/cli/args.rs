//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

#[cfg(feature = "web")]
use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};

use crate::agents::AgentKind;
use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "devintel")]
#[command(about = "GitHub activity dashboard with AI repository analysis agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// GitHub API base URL (default: from .devintel.toml or https://api.github.com)
    #[arg(long, env = "DEVINTEL_GITHUB_API", global = true)]
    pub github_api: Option<String>,

    /// GitHub personal access token seeded into the token store
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub github_token: Option<String>,

    /// AI analysis service base URL (default: http://localhost:8000)
    #[arg(long, env = "DEVINTEL_AI_URL", global = true)]
    pub ai_url: Option<String>,

    /// JSON file holding history and the local profile
    #[arg(long, env = "DEVINTEL_STORAGE", global = true)]
    pub storage: Option<PathBuf>,

    /// Increase verbosity (-v debug logging for this crate)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Overrides shared by every command
    pub fn overrides(&self) -> Overrides {
        Overrides {
            github_api: self.github_api.clone(),
            github_token: self.github_token.clone(),
            ai_url: self.ai_url.clone(),
            storage: self.storage.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
        /// Address to bind
        #[arg(long)]
        bind: Option<IpAddr>,
        /// Serve the frontend from this directory instead of the embedded copy
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Run one analysis agent and print the rendered result
    Analyze {
        /// Agent: issue-classifier, pr-intelligence, assignee-recommender,
        /// workload-analyzer or repository-analyzer
        agent: AgentKind,
        /// Repository as owner/repo or a GitHub URL
        repo: String,
    },
    /// Inspect or clear the analysis history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Manage the local user profile shown in the sidebar
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recorded runs, newest first
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove every recorded run
    Clear,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Store the profile
    #[command(group(ArgGroup::new("identity").required(true).multiple(true).args(["name", "user_id"])))]
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Print the stored profile
    Show,
    /// Forget the stored profile (logout)
    Clear,
}
