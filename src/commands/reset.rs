use super::{confirmed, launch};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Closes the application and wipes the saved projects. The next start
/// recreates the default project.
pub async fn cmd(args: ResetArgs) -> Result<()> {
    if !confirmed(args.yes, Message::ConfirmReset).await? {
        return Ok(());
    }

    launch()?.close();
    msg_success!(Message::AppReset);
    Ok(())
}
