//! # Taskboard - projects and tasks over an in-process bus
//!
//! A command-line to-do manager. Projects hold ordered task lists; tasks
//! carry a title, description, due date, priority and completion flag.
//! Components never call each other: they publish events and issue requests
//! on a shared bus, and one task manager owns and persists the state.
//!
//! ## Features
//!
//! - **Projects**: create, rename (tasks kept) and delete (tasks deleted)
//! - **Tasks**: create, edit, delete and toggle completion
//! - **Pages**: Today, This week, Important, All Tasks and one page per project
//! - **Persistence**: every change is written through to a JSON file in the
//!   user's data directory and replayed on the next start
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
