#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use taskboard::libs::app::App;
    use taskboard::libs::comms::{Event, Request, RequestKind, Response, Topic};
    use taskboard::libs::config::Config;
    use taskboard::libs::dialog::DialogOutcome;
    use taskboard::libs::pages::Page;
    use taskboard::libs::storage::{KeyValueStorage, MemoryStorage};
    use taskboard::libs::task::{Priority, Task, TaskDraft};

    fn start() -> (App, Config, MemoryStorage) {
        let config = Config::default();
        let storage = MemoryStorage::new();
        let app = App::run(&config, Box::new(storage.clone()));
        (app, config, storage)
    }

    #[test]
    fn test_startup_shows_start_page_and_seeded_sidebar() {
        let (app, config, _) = start();

        assert_eq!(app.header().page_name(), config.start_page);
        assert_eq!(app.sidebar().active_page(), config.start_page);
        assert_eq!(app.sidebar().projects(), vec![config.seed.project.clone()]);
        assert!(app.sidebar().is_visible());

        let current = app.comms().request(&Request::CurrentPageName).and_then(Response::into_page_name);
        assert_eq!(current, Some(config.start_page));
    }

    #[test]
    fn test_sidebar_follows_project_changes() {
        let (app, config, _) = start();
        let comms = app.comms();

        comms.publish(Event::AddProject("Work".to_string()));
        comms.publish(Event::RenameProject {
            old: config.seed.project.clone(),
            new: "Inbox".to_string(),
        });

        assert_eq!(app.sidebar().projects(), vec!["Inbox", "Work"]);
    }

    #[test]
    fn test_removing_open_project_returns_to_start_page() {
        let (app, config, _) = start();
        let comms = app.comms();

        comms.publish(Event::AddProject("Work".to_string()));
        comms.publish(Event::ChangePage("Work".to_string()));
        assert_eq!(app.header().page_name(), "Work");

        comms.publish(Event::RemoveProject("Work".to_string()));

        assert_eq!(app.header().page_name(), config.start_page);
        assert_eq!(app.sidebar().active_page(), config.start_page);
        assert_eq!(app.sidebar().projects(), vec![config.seed.project]);
    }

    #[test]
    fn test_pages_filter_tasks_from_the_manager() {
        let (app, config, _) = start();
        let comms = app.comms();
        let today = Local::now().date_naive();

        let urgent = Task::new("urgent", "", today + Duration::days(2), Priority::High, false);
        let later = Task::new("later", "", today + Duration::days(30), Priority::Low, false);
        for task in [urgent, later] {
            comms.publish(Event::AddTask {
                project: config.seed.project.clone(),
                task,
            });
        }

        let titles = |page: Page| -> Vec<String> { page.tasks(comms, today).into_iter().map(|task| task.title).collect() };

        assert_eq!(titles(Page::Today), vec![config.seed.task_title.clone()]);
        assert_eq!(titles(Page::ThisWeek), vec!["urgent"]);
        assert_eq!(titles(Page::Important), vec!["urgent"]);
        assert_eq!(titles(Page::AllTasks).len(), 3);
        assert_eq!(titles(Page::Project(config.seed.project.clone())).len(), 3);
    }

    #[test]
    fn test_toggle_sidebar_twice_restores_visibility() {
        let (app, _, _) = start();

        app.comms().publish(Event::ToggleSidebar);
        assert!(!app.sidebar().is_visible());
        app.comms().publish(Event::ToggleSidebar);
        assert!(app.sidebar().is_visible());
    }

    #[tokio::test]
    async fn test_queued_dialogs_run_in_order() {
        let (app, _, _) = start();
        let comms = app.comms();
        comms.publish(Event::AddProject("Work".to_string()));
        comms.publish(Event::AddProject("Home".to_string()));

        comms.publish(Event::AddTaskDialog("Work".to_string()));
        comms.publish(Event::AddTaskDialog("Home".to_string()));

        let added = app
            .run_pending_dialogs_with(|project| {
                let draft = TaskDraft::new(&format!("{} task", project));
                async move { Ok(DialogOutcome::Submitted(draft)) }
            })
            .await
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(app.header().page_name(), "Home");
        let work = comms.request(&Request::TasksForProject("Work".to_string())).and_then(Response::into_tasks).unwrap();
        assert_eq!(work[0].title, "Work task");
    }

    #[tokio::test]
    async fn test_blank_dialog_title_is_rejected() {
        let (app, _, _) = start();
        app.comms().publish(Event::AddTaskDialog("Test".to_string()));

        let result = app.run_pending_dialogs_with(|_| async { Ok(DialogOutcome::Submitted(TaskDraft::new("   "))) }).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_close_unbinds_everything_and_wipes_storage() {
        let (app, config, storage) = start();
        let comms = app.comms().clone();
        assert!(storage.get_item(&config.storage.key).unwrap().is_some());

        app.close();

        assert_eq!(storage.get_item(&config.storage.key).unwrap(), None);
        assert!(!comms.has_responder(RequestKind::AllTasks));
        assert!(!comms.has_responder(RequestKind::CurrentPageName));
        for topic in Topic::MANAGER {
            assert_eq!(comms.subscriber_count(topic), 0);
        }
        assert_eq!(comms.subscriber_count(Topic::AddTaskDialog), 0);
    }

    #[test]
    fn test_reopen_after_close_starts_from_seed() {
        let (app, config, storage) = start();
        app.comms().publish(Event::AddProject("Work".to_string()));
        app.close();

        let app = App::run(&config, Box::new(storage));
        assert_eq!(app.sidebar().projects(), vec![config.seed.project]);
    }
}
