//! Filtered task pages.
//!
//! Four page names are built in and never name a real project; any other
//! page name refers to the project of that name. Pages read tasks only
//! through bus requests.

use super::comms::{Comms, Request, Response};
use super::task::{Priority, Task};
use chrono::{Duration, NaiveDate};
use std::fmt;

pub const TODAY: &str = "Today";
pub const THIS_WEEK: &str = "This week";
pub const IMPORTANT: &str = "Important";
pub const ALL_TASKS: &str = "All Tasks";

pub const RESERVED_PAGE_NAMES: [&str; 4] = [TODAY, THIS_WEEK, IMPORTANT, ALL_TASKS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Today,
    ThisWeek,
    Important,
    AllTasks,
    Project(String),
}

impl Page {
    pub fn from_name(name: &str) -> Self {
        match name {
            TODAY => Page::Today,
            THIS_WEEK => Page::ThisWeek,
            IMPORTANT => Page::Important,
            ALL_TASKS => Page::AllTasks,
            project => Page::Project(project.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Page::Today => TODAY,
            Page::ThisWeek => THIS_WEEK,
            Page::Important => IMPORTANT,
            Page::AllTasks => ALL_TASKS,
            Page::Project(name) => name.as_str(),
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Page::Project(_))
    }

    /// Tasks shown on this page, incomplete ones first.
    pub fn tasks(&self, comms: &Comms, today: NaiveDate) -> Vec<Task> {
        let tasks = match self {
            Page::Project(name) => request_tasks(comms, Request::TasksForProject(name.clone())),
            _ => request_tasks(comms, Request::AllTasks).into_iter().filter(|task| self.includes(task, today)).collect(),
        };
        render_order(tasks)
    }

    fn includes(&self, task: &Task, today: NaiveDate) -> bool {
        let tomorrow = today + Duration::days(1);
        let next_week = today + Duration::days(7);

        match self {
            Page::Today => task.due_date == today,
            Page::ThisWeek => task.due_date >= tomorrow && task.due_date < next_week,
            Page::Important => task.priority == Priority::High,
            Page::AllTasks | Page::Project(_) => true,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn request_tasks(comms: &Comms, request: Request) -> Vec<Task> {
    comms.request(&request).and_then(Response::into_tasks).unwrap_or_default()
}

/// Incomplete tasks first, then completed ones, each group keeping its order.
pub fn render_order(tasks: Vec<Task>) -> Vec<Task> {
    let (mut open, done): (Vec<Task>, Vec<Task>) = tasks.into_iter().partition(|task| !task.is_complete);
    open.extend(done);
    open
}
