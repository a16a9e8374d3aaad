//! Display implementation for taskboard messages.
//!
//! All message text is defined here, in one match, so that every variant of
//! [`Message`] has an explicit wording and parameters are interpolated with
//! their types checked at compile time.
//!
//! ```rust
//! use taskboard::libs::messages::Message;
//!
//! assert_eq!(Message::ProjectCreated("Work".into()).to_string(), "Project 'Work' created");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === PROJECT MESSAGES ===
            Message::ProjectCreated(name) => format!("Project '{}' created", name),
            Message::ProjectDeleted(name) => format!("Project '{}' and its tasks deleted", name),
            Message::ProjectRenamed(old, new) => format!("Project '{}' renamed to '{}'", old, new),
            Message::ProjectRenameFailed(old, new) => format!("Could not rename project '{}' to '{}'", old, new),
            Message::ProjectNotFound(name) => format!("Project '{}' not found", name),
            Message::ProjectAlreadyExists(name) => format!("Project '{}' already exists", name),
            Message::ProjectNameTaken(name) => format!("A project named '{}' already exists", name),
            Message::ProjectNameReserved(name) => format!("'{}' is a built-in page and cannot name a project", name),
            Message::ProjectsHeader => "Projects".to_string(),
            Message::NoProjects => "No projects yet".to_string(),
            Message::ConfirmDeleteProject(name) => format!("Delete project '{}' and all of its tasks?", name),
            Message::PromptProjectName => "Project name (empty to cancel)".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TasksCreated(count) => format!("{} task(s) created", count),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskToggled(title, true) => format!("Task '{}' marked complete", title),
            Message::TaskToggled(title, false) => format!("Task '{}' marked incomplete", title),
            Message::TaskNotFound(id) => format!("Task with ID {} not found", id),
            Message::TaskNotFoundWithId(id) => format!("No task with ID {} to edit", id),
            Message::TaskTitleRequired => "Title is required".to_string(),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD", value),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),

            // === PAGE MESSAGES ===
            Message::PageHeader(page) => format!("📋 {}", page),
            Message::NoTasksOnPage(page) => format!("No tasks on '{}'", page),
            Message::TaskDialogQueued(project) => format!("Task dialog requested for project '{}'", project),
            Message::DialogCancelled => "Cancelled".to_string(),

            // === APPLICATION MESSAGES ===
            Message::ManagerStarted(count) => format!("Task manager started with {} project(s)", count),
            Message::ManagerStopped => "Task manager stopped, saved state removed".to_string(),
            Message::OperationFailed(error) => format!("Operation failed: {}", error),
            Message::ConfirmReset => "Delete all projects and tasks and start over?".to_string(),
            Message::AppReset => "All projects and tasks deleted".to_string(),

            // === BUS MESSAGES ===
            Message::BusEventQueued(topic) => format!("No subscribers for '{}', event queued", topic),
            Message::BusReplayingBacklog(topic, count) => format!("Replaying {} queued event(s) on '{}'", count, topic),
            Message::ResponderAlreadyRegistered(kind) => {
                format!("A responder for '{}' is already registered, keeping the existing one", kind)
            }
            Message::NoResponder(kind) => format!("No responder registered for '{}'", kind),

            // === STORAGE MESSAGES ===
            Message::StorageReadFailed(error) => format!("Failed to read saved projects: {}", error),
            Message::StorageWriteFailed(error) => format!("Failed to save projects: {}", error),
            Message::StoreReplaying(count) => format!("Restoring {} saved event(s)", count),
            Message::StoredProjectSkipped(name, reason) => format!("Skipping saved project '{}': {}", name, reason),
            Message::StoreSaved(key) => format!("Projects saved under '{}'", key),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted, defaults will be used".to_string(),
            Message::ConfigFileNotFound => "No configuration file found".to_string(),
            Message::ConfigModuleStorage => "Storage settings".to_string(),
            Message::ConfigModuleSeed => "Default project settings".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::PromptStorageFile => "Storage file name".to_string(),
            Message::PromptStorageKey => "Storage key".to_string(),
            Message::PromptSeedProject => "Default project name".to_string(),
            Message::PromptSeedTaskTitle => "Default task title".to_string(),
            Message::PromptSeedTaskDescription => "Default task description".to_string(),
            Message::PromptStartPage => "Start page".to_string(),
        };

        write!(f, "{}", text)
    }
}
