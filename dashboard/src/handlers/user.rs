//! User profile command handlers

use anyhow::Result;

use super::CommandContext;
use crate::cli::UserCommands;
use crate::history::UserProfile;

/// Handle `user` subcommands
pub async fn run_user_command(ctx: &CommandContext, command: UserCommands) -> Result<()> {
    let store = ctx.history().await?;

    match command {
        UserCommands::Set {
            name,
            email,
            user_id,
        } => {
            let profile = UserProfile {
                name,
                email,
                user_id,
            };
            store.set_profile(&profile)?;
            println!(
                "Profile saved for {}",
                profile.display_name().unwrap_or("Unknown")
            );
        }
        UserCommands::Show => match store.profile()? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => println!("No profile stored (Guest)"),
        },
        UserCommands::Clear => {
            store.clear_profile()?;
            println!("Profile cleared");
        }
    }

    Ok(())
}
