//! Task commands.
//!
//! Task ids are assigned when the saved projects are loaded, in project and
//! list order, so the ids printed by `show` stay valid until the data changes.

use super::{confirmed, find_task, launch, project_names};
use crate::libs::comms::Event;
use crate::libs::dialog::{task_dialog, DialogOutcome};
use crate::libs::messages::Message;
use crate::libs::task::{parse_due_date, Priority, TaskDraft, TaskId};
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Args)]
struct TaskFields {
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    due: Option<String>,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
}

impl TaskFields {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.due.is_none() && self.priority.is_none()
    }

    /// Overlays the given fields on `draft`.
    fn apply(self, mut draft: TaskDraft) -> Result<TaskDraft> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(due) = self.due {
            draft.due_date = due_date(&due)?;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority;
        }
        Ok(draft)
    }
}

fn due_date(value: &str) -> Result<NaiveDate> {
    match parse_due_date(value) {
        Some(date) => Ok(date),
        None => msg_bail_anyhow!(Message::InvalidDueDate(value.to_string())),
    }
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Add a task to a project; opens the task dialog when no title is given
    Add {
        project: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Change a task; opens the task dialog when no field is given
    Edit {
        id: u64,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Delete a task
    Remove {
        id: u64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Mark a task complete, or incomplete again
    Toggle { id: u64 },
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let app = launch()?;
    let comms = app.comms();

    match args.command {
        TaskCommand::Add { project, fields } => {
            if !project_names(comms).contains(&project) {
                msg_bail_anyhow!(Message::ProjectNotFound(project));
            }

            if fields.title.is_none() {
                comms.publish(Event::AddTaskDialog(project));
                let added = app.run_pending_dialogs().await?;
                if added > 0 {
                    msg_success!(Message::TasksCreated(added));
                }
                return Ok(());
            }

            let task = fields.apply(TaskDraft::new(""))?.into_task(false)?;
            let title = task.title.clone();
            comms.publish(Event::AddTask { project, task });
            msg_success!(Message::TaskCreated(title));
        }
        TaskCommand::Edit { id, fields } => {
            let Some(old) = find_task(comms, TaskId(id)) else {
                msg_bail_anyhow!(Message::TaskNotFound(id));
            };

            let draft = if fields.is_empty() {
                match task_dialog(Some(old.draft())).await? {
                    DialogOutcome::Submitted(draft) => draft,
                    DialogOutcome::Cancelled => {
                        msg_info!(Message::DialogCancelled);
                        return Ok(());
                    }
                }
            } else {
                fields.apply(old.draft())?
            };

            let new = draft.into_task(old.is_complete)?;
            let title = new.title.clone();
            comms.publish(Event::EditTask { old, new });
            msg_success!(Message::TaskUpdated(title));
        }
        TaskCommand::Remove { id, yes } => {
            let Some(task) = find_task(comms, TaskId(id)) else {
                msg_bail_anyhow!(Message::TaskNotFound(id));
            };
            if !confirmed(yes, Message::ConfirmDeleteTask(task.title.clone())).await? {
                return Ok(());
            }

            comms.publish(Event::RemoveTask(task.id()));
            msg_success!(Message::TaskDeleted(task.title));
        }
        TaskCommand::Toggle { id } => {
            let id = TaskId(id);
            if find_task(comms, id).is_none() {
                msg_bail_anyhow!(Message::TaskNotFound(id.0));
            }

            comms.publish(Event::ToggleCompletion(id));
            if let Some(task) = find_task(comms, id) {
                msg_success!(Message::TaskToggled(task.title, task.is_complete));
            }
        }
    }

    Ok(())
}
