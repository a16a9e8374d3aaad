pub mod init;
pub mod project;
pub mod reset;
pub mod show;
pub mod task;

use crate::libs::app::App;
use crate::libs::comms::{Comms, Request, Response};
use crate::libs::config::Config;
use crate::libs::dialog::{confirm_dialog, DialogOutcome};
use crate::libs::messages::Message;
use crate::libs::storage::FileStorage;
use crate::libs::task::{Task, TaskId};
use crate::msg_info;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Display a page of tasks")]
    Show(show::ShowArgs),
    #[command(about = "Delete all saved projects and tasks")]
    Reset(reset::ResetArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Project(args) => project::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Show(args) => show::cmd(args),
            Commands::Reset(args) => reset::cmd(args).await,
        }
    }
}

/// Starts the application on the configured file storage.
fn launch() -> Result<App> {
    let config = Config::read()?;
    let storage = FileStorage::open(&config.storage.file_name)?;
    Ok(App::run(&config, Box::new(storage)))
}

fn project_names(comms: &Comms) -> Vec<String> {
    comms
        .request(&Request::ProjectNames)
        .and_then(Response::into_project_names)
        .unwrap_or_default()
}

fn find_task(comms: &Comms, id: TaskId) -> Option<Task> {
    comms
        .request(&Request::AllTasks)
        .and_then(Response::into_tasks)
        .unwrap_or_default()
        .into_iter()
        .find(|task| task.id() == id)
}

/// Asks for confirmation unless `yes` was passed on the command line.
async fn confirmed(yes: bool, question: Message) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    match confirm_dialog(question).await? {
        DialogOutcome::Submitted(true) => Ok(true),
        DialogOutcome::Submitted(false) | DialogOutcome::Cancelled => {
            msg_info!(Message::DialogCancelled);
            Ok(false)
        }
    }
}
