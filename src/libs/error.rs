//! Error types for store operations and durable storage access.

use super::task::TaskId;

/// Failure raised by a task store operation that targets a missing or
/// conflicting entity.
///
/// Best-effort cleanup operations (removing a task or a project) never
/// produce these; "already gone" is an acceptable end state for them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("project '{0}' not defined")]
    ProjectNotFound(String),

    #[error("task with id '{0}' doesn't exist")]
    TaskNotFound(TaskId),

    #[error("a task with id '{0}' already exists")]
    DuplicateTask(TaskId),

    #[error("project '{0}' already exists")]
    DuplicateProject(String),

    /// The name belongs to one of the built-in filtered pages.
    #[error("'{0}' is a reserved page name and cannot be used for a project")]
    ReservedProjectName(String),

    #[error("project name cannot be empty")]
    EmptyProjectName,

    #[error("task title cannot be empty")]
    EmptyTitle,
}

/// Failure while reading or writing the durable key-value storage.
///
/// These are always caught by the store, logged and swallowed; the
/// in-memory state stays authoritative for the session.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
