//! Task manager: the only writer of the task store.
//!
//! The manager binds every task/project intent topic of the bus to exactly
//! one store operation and answers the three read-only requests (project
//! names, tasks of a project, all tasks). After an operation that changes
//! the set of projects it publishes [`Event::RenderProjects`] with the new
//! project list.
//!
//! ## Lifecycle
//!
//! [`TaskManager::start`] builds the store, publishes the startup events
//! restored from storage and then subscribes. Because nothing listens to the
//! intent topics yet, those events wait in the bus backlog and are replayed
//! into the manager's handlers the moment it subscribes, so every other
//! listener (the sidebar's project list, for one) sees startup exactly like
//! a sequence of live edits. The manager must therefore be the first
//! component to subscribe to its intent topics.
//!
//! [`TaskManager::stop`] unbinds everything and deletes the persisted state.
//! Dropping a manager unbinds it without touching storage.

use super::comms::{Comms, Event, Request, RequestKind, Response, SubscriptionId, Topic};
use super::config::Config;
use super::error::StoreError;
use super::messages::Message;
use super::storage::KeyValueStorage;
use super::store::TaskStore;
use super::task::{Task, TaskId};
use crate::{msg_debug, msg_error};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

const RESPONDERS: [RequestKind; 3] = [RequestKind::ProjectNames, RequestKind::TasksForProject, RequestKind::AllTasks];

pub struct TaskManager {
    comms: Arc<Comms>,
    store: Arc<Mutex<TaskStore>>,
    subscriptions: Vec<(Topic, SubscriptionId)>,
    responders: Vec<RequestKind>,
}

impl TaskManager {
    pub fn start(comms: &Arc<Comms>, storage: Box<dyn KeyValueStorage>, config: &Config) -> Self {
        let mut store = TaskStore::new(storage, &config.storage.key);
        let startup = store.replay_events(&config.seed);

        let mut manager = TaskManager {
            comms: Arc::clone(comms),
            store: Arc::new(Mutex::new(store)),
            subscriptions: Vec::new(),
            responders: Vec::new(),
        };

        for event in startup {
            comms.publish(event);
        }
        manager.bind();

        msg_debug!(Message::ManagerStarted(manager.project_names().len()));
        manager
    }

    fn bind(&mut self) {
        for kind in RESPONDERS {
            let store = Arc::clone(&self.store);
            if self.comms.register_responder(kind, move |request| answer(&store.lock(), request)) {
                self.responders.push(kind);
            }
        }

        for topic in Topic::MANAGER {
            let store = Arc::clone(&self.store);
            let comms = Arc::downgrade(&self.comms);
            let id = self.comms.subscribe(topic, move |event| {
                if let Err(e) = apply(&store, &comms, event) {
                    msg_error!(Message::OperationFailed(e.to_string()));
                }
            });
            self.subscriptions.push((topic, id));
        }
    }

    fn unbind(&mut self) {
        for kind in self.responders.drain(..) {
            self.comms.unregister_responder(kind);
        }
        for (topic, id) in self.subscriptions.drain(..) {
            self.comms.unsubscribe(topic, Some(id));
        }
    }

    /// Tears the manager down and removes the persisted state.
    pub fn stop(mut self) {
        self.unbind();
        self.store.lock().clear_persisted();
        msg_debug!(Message::ManagerStopped);
    }

    pub fn find_task(&self, id: TaskId) -> Option<Task> {
        self.store.lock().find_task(id).cloned()
    }

    pub fn project_names(&self) -> Vec<String> {
        self.store.lock().project_names()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.unbind();
    }
}

fn answer(store: &TaskStore, request: &Request) -> Option<Response> {
    match request {
        Request::ProjectNames => Some(Response::ProjectNames(store.project_names())),
        Request::TasksForProject(name) => Some(Response::Tasks(store.tasks_for_project(name))),
        Request::AllTasks => Some(Response::Tasks(store.all_tasks())),
        Request::CurrentPageName => None,
    }
}

/// Runs the store operation bound to `event`.
///
/// The store lock is released before the project list is published, so
/// listeners may query the manager again.
fn apply(store: &Mutex<TaskStore>, comms: &Weak<Comms>, event: &Event) -> Result<(), StoreError> {
    let projects_changed = {
        let mut store = store.lock();
        match event {
            Event::AddProject(name) => store.add_project(name)?.then(|| store.project_names()),
            Event::RemoveProject(name) => {
                store.remove_project(name);
                Some(store.project_names())
            }
            Event::RenameProject { old, new } => {
                store.rename_project(old, new)?;
                Some(store.project_names())
            }
            Event::AddTask { project, task } => {
                store.add_task(project, task.clone())?;
                None
            }
            Event::RemoveTask(id) => {
                store.remove_task(*id);
                None
            }
            Event::EditTask { old, new } => {
                store.edit_task(old, new.clone());
                None
            }
            Event::ToggleCompletion(id) => {
                store.toggle_completion(*id)?;
                None
            }
            Event::AddTaskDialog(_)
            | Event::ChangePage(_)
            | Event::ResetPage
            | Event::RenderProjects(_)
            | Event::ToggleSidebar => None,
        }
    };

    if let (Some(names), Some(comms)) = (projects_changed, comms.upgrade()) {
        comms.publish(Event::RenderProjects(names));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::storage::MemoryStorage;

    fn empty_storage(config: &Config) -> MemoryStorage {
        MemoryStorage::with_item(&config.storage.key, "{}")
    }

    #[test]
    fn test_start_replays_startup_events_through_backlog() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let manager = TaskManager::start(&comms, Box::new(MemoryStorage::new()), &config);

        assert_eq!(manager.project_names(), vec![config.seed.project.clone()]);
        assert_eq!(comms.backlog_len(Topic::AddProject), 0);
        assert_eq!(comms.backlog_len(Topic::AddTask), 0);
        // Nobody listens to the project list yet, so the notification waits.
        assert_eq!(comms.backlog_len(Topic::RenderProjects), 1);
    }

    #[test]
    fn test_project_changes_publish_project_list() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let _manager = TaskManager::start(&comms, Box::new(empty_storage(&config)), &config);

        let lists = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lists);
        comms.subscribe(Topic::RenderProjects, move |event| {
            if let Event::RenderProjects(names) = event {
                sink.lock().push(names.clone());
            }
        });

        comms.publish(Event::AddProject("Work".into()));
        comms.publish(Event::RenameProject {
            old: "Work".into(),
            new: "Job".into(),
        });
        comms.publish(Event::RemoveProject("Job".into()));

        assert_eq!(*lists.lock(), vec![vec!["Work".to_string()], vec!["Job".to_string()], Vec::new()]);
    }

    #[test]
    fn test_duplicate_project_publishes_nothing() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let _manager = TaskManager::start(&comms, Box::new(empty_storage(&config)), &config);

        comms.publish(Event::AddProject("Work".into()));
        let lists = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lists);
        comms.subscribe(Topic::RenderProjects, move |event| {
            if let Event::RenderProjects(names) = event {
                sink.lock().push(names.clone());
            }
        });
        lists.lock().clear();

        comms.publish(Event::AddProject("Work".into()));

        assert!(lists.lock().is_empty());
        assert_eq!(comms.backlog_len(Topic::RenderProjects), 0);
    }

    #[test]
    fn test_invalid_saved_project_does_not_drop_others() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let json = r#"{"Today":[{"title":"Hidden","dueDate":"2024-05-01"}],"Work":[{"title":"Keep me","dueDate":"2024-05-01"}]}"#;
        let storage = MemoryStorage::with_item(&config.storage.key, json);
        let manager = TaskManager::start(&comms, Box::new(storage), &config);

        assert_eq!(manager.project_names(), vec!["Work".to_string()]);
        let tasks = comms.request(&Request::AllTasks).and_then(Response::into_tasks).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Keep me");
    }

    #[test]
    fn test_failed_operation_leaves_state_untouched() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let manager = TaskManager::start(&comms, Box::new(empty_storage(&config)), &config);

        comms.publish(Event::RenameProject {
            old: "Missing".into(),
            new: "Other".into(),
        });
        comms.publish(Event::ToggleCompletion(TaskId(u64::MAX)));

        assert!(manager.project_names().is_empty());
    }

    #[test]
    fn test_drop_unbinds_without_wiping_storage() {
        let comms = Arc::new(Comms::new());
        let config = Config::default();
        let storage = MemoryStorage::new();
        let manager = TaskManager::start(&comms, Box::new(storage.clone()), &config);

        drop(manager);

        assert_eq!(comms.subscriber_count(Topic::AddProject), 0);
        assert!(!comms.has_responder(RequestKind::AllTasks));
        assert!(!storage.is_empty());
    }
}
