//! Task values and their persisted representation.
//!
//! A [`Task`] is a single to-do item. Its [`TaskId`] is drawn from a
//! process-wide counter when the task is created and never changes
//! afterwards, so no two tasks created in one process ever share an id.
//! Ids are not persisted as identity: tasks restored from storage are
//! rebuilt with fresh ids.
//!
//! Due dates are calendar days. On the wire they are ISO 8601 strings; both
//! plain dates (`2024-05-01`) and full RFC 3339 date-times are accepted when
//! reading, the latter being converted to the local calendar day.

use chrono::{DateTime, Local, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::StoreError;

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl TaskId {
    fn next() -> Self {
        TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub is_complete: bool,
}

impl Task {
    pub fn new(title: &str, description: &str, due_date: NaiveDate, priority: Priority, is_complete: bool) -> Self {
        Task {
            id: TaskId::next(),
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            priority,
            is_complete,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns this task carrying `id` instead of its own.
    ///
    /// Used when a replacement takes the place of an existing task during an edit.
    pub(crate) fn with_id(self, id: TaskId) -> Self {
        Task { id, ..self }
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }
}

/// Form input collected for a new or edited task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: &str) -> Self {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            due_date: Local::now().date_naive(),
            priority: Priority::default(),
        }
    }

    pub fn into_task(self, is_complete: bool) -> Result<Task, StoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        Ok(Task::new(title, &self.description, self.due_date, self.priority, is_complete))
    }
}

/// Plain-data form of a task as it sits in durable storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "due_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_complete: bool,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        TaskRecord {
            id: Some(task.id.0),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            is_complete: task.is_complete,
        }
    }
}

impl TaskRecord {
    /// Rebuilds a live task from stored data; the stored id is not reused.
    pub fn restore(self) -> Task {
        Task::new(&self.title, &self.description, self.due_date, self.priority, self.is_complete)
    }
}

/// Parses a due date from either `YYYY-MM-DD` or an RFC 3339 date-time.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date_time| date_time.with_timezone(&Local).date_naive())
}

pub mod due_date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_due_date(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid due date '{}'", value)))
    }
}
