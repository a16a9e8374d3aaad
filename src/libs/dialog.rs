//! Interactive forms.
//!
//! Every dialog is async: the blocking `dialoguer` prompts run on the tokio
//! blocking pool and the caller awaits the outcome. Backing out of a dialog
//! yields [`DialogOutcome::Cancelled`]; it is never reported as an error.

use super::messages::Message;
use super::pages::RESERVED_PAGE_NAMES;
use super::task::{parse_due_date, Priority, TaskDraft};
use crate::msg_error_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome<T> {
    Submitted(T),
    Cancelled,
}

impl<T> DialogOutcome<T> {
    pub fn submitted(self) -> Option<T> {
        match self {
            DialogOutcome::Submitted(value) => Some(value),
            DialogOutcome::Cancelled => None,
        }
    }
}

/// Collects a task. `defaults` pre-fills the form when editing.
///
/// Pressing Esc on the priority selection cancels the dialog.
pub async fn task_dialog(defaults: Option<TaskDraft>) -> Result<DialogOutcome<TaskDraft>> {
    tokio::task::spawn_blocking(move || -> Result<DialogOutcome<TaskDraft>> {
        let defaults = defaults.unwrap_or_else(|| TaskDraft::new(""));
        let theme = ColorfulTheme::default();

        let mut title = Input::<String>::with_theme(&theme).with_prompt(Message::PromptTaskTitle.to_string());
        if !defaults.title.is_empty() {
            title = title.default(defaults.title.clone());
        }
        let title = title
            .validate_with(|value: &String| {
                if value.trim().is_empty() {
                    Err(Message::TaskTitleRequired.to_string())
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let description: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptTaskDescription.to_string())
            .default(defaults.description.clone())
            .allow_empty(true)
            .interact_text()?;

        let due: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptTaskDueDate.to_string())
            .default(defaults.due_date.format("%Y-%m-%d").to_string())
            .validate_with(|value: &String| match parse_due_date(value) {
                Some(_) => Ok(()),
                None => Err(Message::InvalidDueDate(value.clone()).to_string()),
            })
            .interact_text()?;
        let due_date = parse_due_date(&due).ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(due.clone())))?;

        let current = Priority::ALL.iter().position(|priority| *priority == defaults.priority).unwrap_or(0);
        let choice = Select::with_theme(&theme)
            .with_prompt(Message::PromptTaskPriority.to_string())
            .items(&Priority::ALL)
            .default(current)
            .interact_opt()?;

        Ok(match choice {
            Some(index) => DialogOutcome::Submitted(TaskDraft {
                title: title.trim().to_string(),
                description,
                due_date,
                priority: Priority::ALL[index],
            }),
            None => DialogOutcome::Cancelled,
        })
    })
    .await?
}

/// Yes/no question. Esc cancels.
pub async fn confirm_dialog(message: Message) -> Result<DialogOutcome<bool>> {
    let prompt = message.to_string();
    tokio::task::spawn_blocking(move || -> Result<DialogOutcome<bool>> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_opt()?;

        Ok(match answer {
            Some(answer) => DialogOutcome::Submitted(answer),
            None => DialogOutcome::Cancelled,
        })
    })
    .await?
}

/// Asks for a project name that is not empty, not reserved and not taken.
///
/// `original` is the current name when renaming; keeping it is accepted.
/// Submitting an empty name cancels.
pub async fn project_name_dialog(existing: Vec<String>, original: Option<String>) -> Result<DialogOutcome<String>> {
    tokio::task::spawn_blocking(move || -> Result<DialogOutcome<String>> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(Message::PromptProjectName.to_string())
            .allow_empty(true);
        if let Some(original) = &original {
            input = input.default(original.clone());
        }

        let name = input
            .validate_with(|value: &String| check_project_name(value.trim(), &existing, original.as_deref()))
            .interact_text()?;

        let name = name.trim().to_string();
        Ok(if name.is_empty() {
            DialogOutcome::Cancelled
        } else {
            DialogOutcome::Submitted(name)
        })
    })
    .await?
}

fn check_project_name(name: &str, existing: &[String], original: Option<&str>) -> Result<(), String> {
    if name.is_empty() || Some(name) == original {
        return Ok(());
    }
    if RESERVED_PAGE_NAMES.contains(&name) {
        return Err(Message::ProjectNameReserved(name.to_string()).to_string());
    }
    if existing.iter().any(|project| project == name) {
        return Err(Message::ProjectNameTaken(name.to_string()).to_string());
    }
    Ok(())
}
