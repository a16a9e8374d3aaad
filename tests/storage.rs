#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use taskboard::libs::app::App;
    use taskboard::libs::comms::{Comms, Event, Request, Response};
    use taskboard::libs::config::Config;
    use taskboard::libs::manager::TaskManager;
    use taskboard::libs::storage::{FileStorage, KeyValueStorage};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct FileStorageContext {
        _temp_dir: TempDir,
        path: std::path::PathBuf,
        config: Config,
    }

    impl TestContext for FileStorageContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let path = temp_dir.path().join("storage.json");
            FileStorageContext {
                _temp_dir: temp_dir,
                path,
                config: Config::default(),
            }
        }
    }

    #[test_context(FileStorageContext)]
    #[test]
    fn test_projects_survive_process_restart(ctx: &mut FileStorageContext) {
        {
            let app = App::run(&ctx.config, Box::new(FileStorage::new(&ctx.path)));
            app.comms().publish(Event::AddProject("Work".to_string()));
            app.comms().publish(Event::RemoveProject(ctx.config.seed.project.clone()));
        }

        let comms = Arc::new(Comms::new());
        let _manager = TaskManager::start(&comms, Box::new(FileStorage::new(&ctx.path)), &ctx.config);

        let names = comms.request(&Request::ProjectNames).and_then(Response::into_project_names);
        assert_eq!(names, Some(vec!["Work".to_string()]));
    }

    #[test_context(FileStorageContext)]
    #[test]
    fn test_persisted_document_layout(ctx: &mut FileStorageContext) {
        {
            let _app = App::run(&ctx.config, Box::new(FileStorage::new(&ctx.path)));
        }

        let storage = FileStorage::new(&ctx.path);
        let document = storage.get_item(&ctx.config.storage.key).unwrap().unwrap();
        let projects: serde_json::Value = serde_json::from_str(&document).unwrap();

        let task = &projects[&ctx.config.seed.project][0];
        assert_eq!(task["title"], ctx.config.seed.task_title.as_str());
        assert_eq!(task["priority"], "low");
        assert_eq!(task["isComplete"], false);
        assert!(task["dueDate"].as_str().unwrap().len() == 10);
    }

    #[test_context(FileStorageContext)]
    #[test]
    fn test_reset_removes_saved_state(ctx: &mut FileStorageContext) {
        let app = App::run(&ctx.config, Box::new(FileStorage::new(&ctx.path)));
        app.close();

        assert_eq!(FileStorage::new(&ctx.path).get_item(&ctx.config.storage.key).unwrap(), None);
    }
}
