//! Core library modules for the taskboard application.
//!
//! ## Features
//!
//! - **Bus**: topic events with backlog replay and single-responder requests
//! - **State**: the task store and the manager that alone mutates it
//! - **Views**: filtered pages, header and sidebar components, table output
//! - **Infrastructure**: configuration, data directory, durable storage, messaging
//!
//! ## Usage
//!
//! ```rust
//! use taskboard::libs::app::App;
//! use taskboard::libs::comms::{Event, Request, Response};
//! use taskboard::libs::config::Config;
//! use taskboard::libs::storage::MemoryStorage;
//!
//! let app = App::run(&Config::default(), Box::new(MemoryStorage::new()));
//! app.comms().publish(Event::AddProject("Work".to_string()));
//!
//! let names = app.comms().request(&Request::ProjectNames).and_then(Response::into_project_names);
//! assert_eq!(names, Some(vec!["Test".to_string(), "Work".to_string()]));
//! ```

pub mod app;
pub mod comms;
pub mod config;
pub mod data_storage;
pub mod dialog;
pub mod error;
pub mod manager;
pub mod messages;
pub mod pages;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;
