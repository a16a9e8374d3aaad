//! Canonical task and project state.
//!
//! [`TaskStore`] maps project names to ordered task lists and mirrors every
//! mutation to one durable key (write-through). Persistence is best effort:
//! storage failures are logged and swallowed, and the in-memory state stays
//! authoritative for the session.
//!
//! The store is owned and mutated only by the task manager. It never
//! restores itself directly: [`TaskStore::replay_events`] turns persisted
//! data into bus events so that startup goes through the same path, and
//! produces the same notifications, as live edits.

use chrono::Local;
use indexmap::IndexMap;

use super::comms::Event;
use super::config::SeedConfig;
use super::error::{StorageError, StoreError};
use super::messages::Message;
use super::pages::RESERVED_PAGE_NAMES;
use super::storage::KeyValueStorage;
use super::task::{Priority, Task, TaskId, TaskRecord};
use crate::{msg_debug, msg_error, msg_warning};

/// Persisted layout: project name to task records, in insertion order.
type StoredProjects = IndexMap<String, Vec<TaskRecord>>;

pub struct TaskStore {
    projects: IndexMap<String, Vec<Task>>,
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl TaskStore {
    pub fn new(storage: Box<dyn KeyValueStorage>, key: &str) -> Self {
        TaskStore {
            projects: IndexMap::new(),
            storage,
            key: key.to_string(),
        }
    }

    /// Reads the persisted projects and returns the events that rebuild them.
    ///
    /// When nothing is stored, or the stored value cannot be parsed, storage
    /// is cleared and the events seed one default project holding one default
    /// task instead. Stored projects whose name could not be created today
    /// (empty or a built-in page name) are skipped with a warning, together
    /// with their tasks, so that every returned event applies cleanly.
    pub fn replay_events(&mut self, seed: &SeedConfig) -> Vec<Event> {
        let stored = match self.storage.get_item(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => return self.seed_events(seed),
            Err(e) => {
                msg_error!(Message::StorageReadFailed(e.to_string()));
                return self.reset_to_seed(seed);
            }
        };

        match serde_json::from_str::<StoredProjects>(&stored) {
            Ok(projects) => {
                let mut events = Vec::new();
                for (name, records) in projects {
                    if let Err(e) = validate_project_name(&name) {
                        msg_warning!(Message::StoredProjectSkipped(name, e.to_string()));
                        continue;
                    }
                    events.push(Event::AddProject(name.clone()));
                    for record in records {
                        events.push(Event::AddTask {
                            project: name.clone(),
                            task: record.restore(),
                        });
                    }
                }
                msg_debug!(Message::StoreReplaying(events.len()));
                events
            }
            Err(e) => {
                msg_error!(Message::StorageReadFailed(e.to_string()));
                self.reset_to_seed(seed)
            }
        }
    }

    fn reset_to_seed(&mut self, seed: &SeedConfig) -> Vec<Event> {
        if let Err(e) = self.storage.clear() {
            msg_error!(Message::StorageWriteFailed(e.to_string()));
        }
        self.seed_events(seed)
    }

    fn seed_events(&mut self, seed: &SeedConfig) -> Vec<Event> {
        self.projects.clear();

        let task = Task::new(
            &seed.task_title,
            &seed.task_description,
            Local::now().date_naive(),
            Priority::Low,
            false,
        );
        vec![
            Event::AddProject(seed.project.clone()),
            Event::AddTask {
                project: seed.project.clone(),
                task,
            },
        ]
    }

    pub fn project_names(&self) -> Vec<String> {
        self.projects.keys().cloned().collect()
    }

    pub fn has_project(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    /// Tasks of one project in store order; empty for an unknown project.
    pub fn tasks_for_project(&self, name: &str) -> Vec<Task> {
        self.projects.get(name).cloned().unwrap_or_default()
    }

    /// Every task, project by project, each project in store order.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.projects.values().flatten().cloned().collect()
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.projects.values().flatten().find(|task| task.id() == id)
    }

    /// Creates an empty project and returns whether it was inserted.
    /// Adding an existing name only warns.
    pub fn add_project(&mut self, name: &str) -> Result<bool, StoreError> {
        validate_project_name(name)?;

        if self.projects.contains_key(name) {
            msg_warning!(Message::ProjectAlreadyExists(name.to_string()));
            return Ok(false);
        }

        self.projects.insert(name.to_string(), Vec::new());
        self.persist();
        Ok(true)
    }

    /// Drops a project and all its tasks; a missing project is not an error.
    pub fn remove_project(&mut self, name: &str) {
        self.projects.shift_remove(name);
        self.persist();
    }

    /// Renames a project in place, keeping its tasks and its position.
    pub fn rename_project(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        if !self.projects.contains_key(old) {
            return Err(StoreError::ProjectNotFound(old.to_string()));
        }
        if old == new {
            return Ok(());
        }
        validate_project_name(new)?;
        if self.projects.contains_key(new) {
            return Err(StoreError::DuplicateProject(new.to_string()));
        }

        self.projects = std::mem::take(&mut self.projects)
            .into_iter()
            .map(|(name, tasks)| if name == old { (new.to_string(), tasks) } else { (name, tasks) })
            .collect();

        self.persist();
        Ok(())
    }

    pub fn add_task(&mut self, project: &str, task: Task) -> Result<(), StoreError> {
        if !self.projects.contains_key(project) {
            return Err(StoreError::ProjectNotFound(project.to_string()));
        }
        if self.find_task(task.id()).is_some() {
            return Err(StoreError::DuplicateTask(task.id()));
        }

        if let Some(tasks) = self.projects.get_mut(project) {
            tasks.push(task);
        }
        self.persist();
        Ok(())
    }

    /// Removes the task with `id` wherever it is. Persists even when nothing matched.
    pub fn remove_task(&mut self, id: TaskId) {
        for tasks in self.projects.values_mut() {
            tasks.retain(|task| task.id() != id);
        }
        self.persist();
    }

    /// Replaces the task identified by `old.id()` with `new`, in place.
    ///
    /// The replacement keeps the original id. An unknown task is silently
    /// ignored; storage is written either way.
    pub fn edit_task(&mut self, old: &Task, new: Task) {
        let slot = self.projects.values_mut().flatten().find(|task| task.id() == old.id());

        match slot {
            Some(slot) => *slot = new.with_id(old.id()),
            None => msg_debug!(Message::TaskNotFoundWithId(old.id().0)),
        }
        self.persist();
    }

    pub fn toggle_completion(&mut self, id: TaskId) -> Result<(), StoreError> {
        let task = self
            .projects
            .values_mut()
            .flatten()
            .find(|task| task.id() == id)
            .ok_or(StoreError::TaskNotFound(id))?;

        task.is_complete = !task.is_complete;
        self.persist();
        Ok(())
    }

    /// Removes the persisted key; the in-memory state is left as is.
    pub fn clear_persisted(&mut self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            msg_error!(Message::StorageWriteFailed(e.to_string()));
        }
    }

    /// The JSON document written to storage for the current state.
    pub fn to_json(&self) -> Result<String, StorageError> {
        let stored: IndexMap<&str, Vec<TaskRecord>> = self
            .projects
            .iter()
            .map(|(name, tasks)| (name.as_str(), tasks.iter().map(TaskRecord::from).collect()))
            .collect();
        Ok(serde_json::to_string(&stored)?)
    }

    fn persist(&mut self) {
        let result = self.to_json().and_then(|json| self.storage.set_item(&self.key, &json));
        match result {
            Ok(()) => msg_debug!(Message::StoreSaved(self.key.clone())),
            Err(e) => msg_error!(Message::StorageWriteFailed(e.to_string())),
        }
    }
}

/// Rejects empty names and the names of the built-in filtered pages.
pub fn validate_project_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::EmptyProjectName);
    }
    if RESERVED_PAGE_NAMES.contains(&name) {
        return Err(StoreError::ReservedProjectName(name.to_string()));
    }
    Ok(())
}
