//! Topic catalog of the bus.
//!
//! Every event and request is a variant of a closed enum, so a payload's type
//! is fixed by its topic and handlers match exhaustively instead of looking
//! topics up by string. [`Topic`] and [`RequestKind`] are the fieldless keys
//! the bus registries are indexed by.

use crate::libs::task::{Task, TaskId};
use std::fmt;

/// Fire-and-forget notifications and intents.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AddProject(String),
    RemoveProject(String),
    RenameProject { old: String, new: String },
    AddTask { project: String, task: Task },
    RemoveTask(TaskId),
    EditTask { old: Task, new: Task },
    ToggleCompletion(TaskId),

    /// Asks the application to open the task dialog for a project.
    AddTaskDialog(String),
    ChangePage(String),
    ResetPage,
    /// The project set changed; carries the current project names in order.
    RenderProjects(Vec<String>),
    ToggleSidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    AddProject,
    RemoveProject,
    RenameProject,
    AddTask,
    RemoveTask,
    EditTask,
    ToggleCompletion,
    AddTaskDialog,
    ChangePage,
    ResetPage,
    RenderProjects,
    ToggleSidebar,
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::AddProject(_) => Topic::AddProject,
            Event::RemoveProject(_) => Topic::RemoveProject,
            Event::RenameProject { .. } => Topic::RenameProject,
            Event::AddTask { .. } => Topic::AddTask,
            Event::RemoveTask(_) => Topic::RemoveTask,
            Event::EditTask { .. } => Topic::EditTask,
            Event::ToggleCompletion(_) => Topic::ToggleCompletion,
            Event::AddTaskDialog(_) => Topic::AddTaskDialog,
            Event::ChangePage(_) => Topic::ChangePage,
            Event::ResetPage => Topic::ResetPage,
            Event::RenderProjects(_) => Topic::RenderProjects,
            Event::ToggleSidebar => Topic::ToggleSidebar,
        }
    }
}

impl Topic {
    /// Intent topics the task manager binds to.
    pub const MANAGER: [Topic; 7] = [
        Topic::AddProject,
        Topic::RemoveProject,
        Topic::RenameProject,
        Topic::AddTask,
        Topic::RemoveTask,
        Topic::EditTask,
        Topic::ToggleCompletion,
    ];
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Topic::AddProject => "manager.add_project",
            Topic::RemoveProject => "manager.remove_project",
            Topic::RenameProject => "manager.rename_project",
            Topic::AddTask => "manager.add_task",
            Topic::RemoveTask => "manager.remove_task",
            Topic::EditTask => "manager.edit_task",
            Topic::ToggleCompletion => "manager.toggle_completion",
            Topic::AddTaskDialog => "ui.add_task_dialog",
            Topic::ChangePage => "ui.change_page",
            Topic::ResetPage => "ui.reset_page",
            Topic::RenderProjects => "ui.sidebar.render_projects",
            Topic::ToggleSidebar => "ui.sidebar.toggle",
        };
        write!(f, "{}", name)
    }
}

/// Pull-style queries answered by exactly one responder.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ProjectNames,
    TasksForProject(String),
    AllTasks,
    CurrentPageName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ProjectNames,
    TasksForProject,
    AllTasks,
    CurrentPageName,
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::ProjectNames => RequestKind::ProjectNames,
            Request::TasksForProject(_) => RequestKind::TasksForProject,
            Request::AllTasks => RequestKind::AllTasks,
            Request::CurrentPageName => RequestKind::CurrentPageName,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RequestKind::ProjectNames => "manager.project_names",
            RequestKind::TasksForProject => "manager.tasks_for_project",
            RequestKind::AllTasks => "manager.all_tasks",
            RequestKind::CurrentPageName => "ui.header.current_page_name",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    ProjectNames(Vec<String>),
    Tasks(Vec<Task>),
    PageName(String),
}

impl Response {
    pub fn into_project_names(self) -> Option<Vec<String>> {
        match self {
            Response::ProjectNames(names) => Some(names),
            _ => None,
        }
    }

    pub fn into_tasks(self) -> Option<Vec<Task>> {
        match self {
            Response::Tasks(tasks) => Some(tasks),
            _ => None,
        }
    }

    pub fn into_page_name(self) -> Option<String> {
        match self {
            Response::PageName(name) => Some(name),
            _ => None,
        }
    }
}
