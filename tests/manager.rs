#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::sync::Arc;
    use taskboard::libs::comms::{Comms, Event, Request, Response};
    use taskboard::libs::config::Config;
    use taskboard::libs::manager::TaskManager;
    use taskboard::libs::storage::{KeyValueStorage, MemoryStorage};
    use taskboard::libs::task::{Priority, Task};
    use test_context::{test_context, TestContext};

    /// A bus with a manager started on empty (but initialised) storage.
    struct ManagerContext {
        comms: Arc<Comms>,
        storage: MemoryStorage,
        config: Config,
        manager: Option<TaskManager>,
    }

    impl TestContext for ManagerContext {
        fn setup() -> Self {
            let config = Config::default();
            let storage = MemoryStorage::with_item(&config.storage.key, "{}");
            let comms = Arc::new(Comms::new());
            let manager = TaskManager::start(&comms, Box::new(storage.clone()), &config);
            ManagerContext {
                comms,
                storage,
                config,
                manager: Some(manager),
            }
        }
    }

    impl ManagerContext {
        fn all_tasks(&self) -> Vec<Task> {
            self.comms.request(&Request::AllTasks).and_then(Response::into_tasks).unwrap_or_default()
        }

        fn tasks_for(&self, project: &str) -> Vec<Task> {
            self.comms
                .request(&Request::TasksForProject(project.to_string()))
                .and_then(Response::into_tasks)
                .unwrap_or_default()
        }

        fn project_names(&self) -> Vec<String> {
            self.comms
                .request(&Request::ProjectNames)
                .and_then(Response::into_project_names)
                .unwrap_or_default()
        }

        /// Stops the running manager without wiping storage and starts a new one.
        fn restart(&mut self) {
            drop(self.manager.take());
            self.comms = Arc::new(Comms::new());
            self.manager = Some(TaskManager::start(&self.comms, Box::new(self.storage.clone()), &self.config));
        }
    }

    fn task(title: &str) -> Task {
        let due = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Task::new(title, "description", due, Priority::Medium, false)
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_add_project_add_task_toggle(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("Test".to_string()));
        let item = task("Test");
        let id = item.id();
        ctx.comms.publish(Event::AddTask {
            project: "Test".to_string(),
            task: item,
        });

        let tasks = ctx.all_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].is_complete);

        ctx.comms.publish(Event::ToggleCompletion(id));
        assert!(ctx.all_tasks()[0].is_complete);
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_duplicate_project_is_ignored(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("X".to_string()));
        ctx.comms.publish(Event::AddProject("X".to_string()));

        assert_eq!(ctx.project_names(), vec!["X"]);
        assert!(ctx.tasks_for("X").is_empty());
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_rename_preserves_tasks(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("Work".to_string()));
        for title in ["one", "two", "three"] {
            ctx.comms.publish(Event::AddTask {
                project: "Work".to_string(),
                task: task(title),
            });
        }

        ctx.comms.publish(Event::RenameProject {
            old: "Work".to_string(),
            new: "Job".to_string(),
        });

        let titles: Vec<String> = ctx.tasks_for("Job").into_iter().map(|task| task.title).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert!(!ctx.project_names().contains(&"Work".to_string()));
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_remove_project_removes_its_tasks(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("A".to_string()));
        ctx.comms.publish(Event::AddProject("B".to_string()));
        ctx.comms.publish(Event::AddTask {
            project: "A".to_string(),
            task: task("gone"),
        });
        ctx.comms.publish(Event::AddTask {
            project: "B".to_string(),
            task: task("kept"),
        });

        ctx.comms.publish(Event::RemoveProject("A".to_string()));

        let titles: Vec<String> = ctx.all_tasks().into_iter().map(|task| task.title).collect();
        assert_eq!(titles, vec!["kept"]);
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_edit_replaces_in_place_and_keeps_id(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("A".to_string()));
        let original = task("draft");
        ctx.comms.publish(Event::AddTask {
            project: "A".to_string(),
            task: original.clone(),
        });

        let mut replacement = task("final");
        replacement.priority = Priority::High;
        ctx.comms.publish(Event::EditTask {
            old: original.clone(),
            new: replacement,
        });

        let tasks = ctx.tasks_for("A");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "final");
        assert_eq!(tasks[0].id(), original.id());
        assert_eq!(ctx.manager.as_ref().unwrap().find_task(original.id()).unwrap().priority, Priority::High);
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_state_survives_restart(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("Home".to_string()));
        ctx.comms.publish(Event::AddProject("Work".to_string()));
        let mut done = task("done");
        done.is_complete = true;
        ctx.comms.publish(Event::AddTask {
            project: "Work".to_string(),
            task: done,
        });

        ctx.restart();

        assert_eq!(ctx.project_names(), vec!["Home", "Work"]);
        let restored = ctx.tasks_for("Work");
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].title, "done");
        assert_eq!(restored[0].description, "description");
        assert_eq!(restored[0].priority, Priority::Medium);
        assert!(restored[0].is_complete);
        assert_eq!(restored[0].due_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test_context(ManagerContext)]
    #[test]
    fn test_stop_wipes_storage(ctx: &mut ManagerContext) {
        ctx.comms.publish(Event::AddProject("Work".to_string()));
        assert!(ctx.storage.get_item(&ctx.config.storage.key).unwrap().is_some());

        ctx.manager.take().unwrap().stop();

        assert_eq!(ctx.storage.get_item(&ctx.config.storage.key).unwrap(), None);
        assert!(ctx.comms.request(&Request::AllTasks).is_none());
    }

    #[test]
    fn test_first_start_seeds_default_project() {
        let config = Config::default();
        let comms = Arc::new(Comms::new());
        let _manager = TaskManager::start(&comms, Box::new(MemoryStorage::new()), &config);

        let names = comms.request(&Request::ProjectNames).and_then(Response::into_project_names);
        assert_eq!(names, Some(vec![config.seed.project.clone()]));

        let tasks = comms.request(&Request::AllTasks).and_then(Response::into_tasks).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, config.seed.task_title);
        assert_eq!(tasks[0].description, config.seed.task_description);
        assert_eq!(tasks[0].priority, Priority::Low);
        assert!(!tasks[0].is_complete);
    }

    #[test]
    fn test_corrupt_storage_is_replaced_by_seed() {
        let config = Config::default();
        let storage = MemoryStorage::with_item(&config.storage.key, "[[[");
        let comms = Arc::new(Comms::new());
        let _manager = TaskManager::start(&comms, Box::new(storage.clone()), &config);

        let names = comms.request(&Request::ProjectNames).and_then(Response::into_project_names);
        assert_eq!(names, Some(vec![config.seed.project.clone()]));

        // The seed is written back through the normal write path.
        let saved = storage.get_item(&config.storage.key).unwrap().unwrap();
        assert!(saved.contains(&config.seed.project));
    }

    #[test]
    fn test_legacy_iso_dates_are_read() {
        let config = Config::default();
        let json = r#"{"Inbox":[{"title":"Old","description":"","dueDate":"2024-02-29T12:00:00.000Z","priority":"low","isComplete":false}]}"#;
        let comms = Arc::new(Comms::new());
        let _manager = TaskManager::start(&comms, Box::new(MemoryStorage::with_item(&config.storage.key, json)), &config);

        let tasks = comms.request(&Request::AllTasks).and_then(Response::into_tasks).unwrap();
        assert_eq!(tasks[0].title, "Old");
    }
}
