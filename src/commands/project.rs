use super::{confirmed, launch, project_names};
use crate::libs::comms::Event;
use crate::libs::dialog::{project_name_dialog, DialogOutcome};
use crate::libs::messages::Message;
use crate::libs::store::validate_project_name;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    /// Create a project; asks for the name when omitted
    Add { name: Option<String> },
    /// Delete a project together with its tasks
    Remove {
        name: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Rename a project, keeping its tasks
    Rename { old: String, new: Option<String> },
    /// List projects
    List,
}

pub async fn cmd(args: ProjectArgs) -> Result<()> {
    let app = launch()?;
    let comms = app.comms();
    let existing = project_names(comms);

    match args.command {
        ProjectCommand::Add { name } => {
            let name = match name {
                Some(name) => name.trim().to_string(),
                None => match project_name_dialog(existing.clone(), None).await? {
                    DialogOutcome::Submitted(name) => name,
                    DialogOutcome::Cancelled => {
                        msg_info!(Message::DialogCancelled);
                        return Ok(());
                    }
                },
            };
            validate_project_name(&name)?;
            if existing.contains(&name) {
                msg_bail_anyhow!(Message::ProjectNameTaken(name));
            }

            comms.publish(Event::AddProject(name.clone()));
            msg_success!(Message::ProjectCreated(name));
        }
        ProjectCommand::Remove { name, yes } => {
            if !existing.contains(&name) {
                msg_bail_anyhow!(Message::ProjectNotFound(name));
            }
            if !confirmed(yes, Message::ConfirmDeleteProject(name.clone())).await? {
                return Ok(());
            }

            comms.publish(Event::RemoveProject(name.clone()));
            msg_success!(Message::ProjectDeleted(name));
        }
        ProjectCommand::Rename { old, new } => {
            if !existing.contains(&old) {
                msg_bail_anyhow!(Message::ProjectNotFound(old));
            }
            let new = match new {
                Some(new) => new.trim().to_string(),
                None => match project_name_dialog(existing.clone(), Some(old.clone())).await? {
                    DialogOutcome::Submitted(new) => new,
                    DialogOutcome::Cancelled => {
                        msg_info!(Message::DialogCancelled);
                        return Ok(());
                    }
                },
            };

            comms.publish(Event::RenameProject {
                old: old.clone(),
                new: new.clone(),
            });
            if !project_names(comms).contains(&new) {
                msg_bail_anyhow!(Message::ProjectRenameFailed(old, new));
            }
            msg_success!(Message::ProjectRenamed(old, new));
        }
        ProjectCommand::List => {
            let projects = app.sidebar().projects();
            if projects.is_empty() {
                msg_info!(Message::NoProjects);
            } else {
                msg_info!(Message::ProjectsHeader, true);
                View::projects(&projects, None)?;
            }
        }
    }

    Ok(())
}
