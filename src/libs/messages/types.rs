/// Every user-facing and log string of the application.
///
/// Text lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === PROJECT MESSAGES ===
    ProjectCreated(String),
    ProjectDeleted(String),
    ProjectRenamed(String, String), // old, new
    ProjectRenameFailed(String, String),
    ProjectNotFound(String),
    ProjectAlreadyExists(String),
    ProjectNameTaken(String),
    ProjectNameReserved(String),
    ProjectsHeader,
    NoProjects,
    ConfirmDeleteProject(String),
    PromptProjectName,

    // === TASK MESSAGES ===
    TaskCreated(String),
    TasksCreated(usize),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskToggled(String, bool), // title, complete
    TaskNotFound(u64),
    TaskNotFoundWithId(u64),
    TaskTitleRequired,
    InvalidDueDate(String),
    ConfirmDeleteTask(String),
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskDueDate,
    PromptTaskPriority,

    // === PAGE MESSAGES ===
    PageHeader(String),
    NoTasksOnPage(String),
    TaskDialogQueued(String),
    DialogCancelled,

    // === APPLICATION MESSAGES ===
    ManagerStarted(usize), // project count
    ManagerStopped,
    OperationFailed(String),
    ConfirmReset,
    AppReset,

    // === BUS MESSAGES ===
    BusEventQueued(String),           // topic
    BusReplayingBacklog(String, usize), // topic, count
    ResponderAlreadyRegistered(String),
    NoResponder(String),

    // === STORAGE MESSAGES ===
    StorageReadFailed(String),
    StorageWriteFailed(String),
    StoreReplaying(usize),
    StoredProjectSkipped(String, String), // name, reason
    StoreSaved(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleStorage,
    ConfigModuleSeed,
    PromptSelectModules,
    PromptStorageFile,
    PromptStorageKey,
    PromptSeedProject,
    PromptSeedTaskTitle,
    PromptSeedTaskDescription,
    PromptStartPage,
}
