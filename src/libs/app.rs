//! Application context.
//!
//! [`App`] owns the bus and every long-lived component. It is created
//! explicitly and passed around, so several independent applications can
//! coexist in one process (tests rely on this).
//!
//! Start order matters: the manager subscribes first so the startup events
//! waiting in the backlog reach the store before the view components mount.

use super::comms::{Comms, Event, SubscriptionId, Topic};
use super::config::Config;
use super::dialog::{task_dialog, DialogOutcome};
use super::manager::TaskManager;
use super::messages::Message;
use super::storage::KeyValueStorage;
use super::task::TaskDraft;
use super::view::{Header, Sidebar};
use crate::{msg_debug, msg_info};
use anyhow::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

pub struct App {
    comms: Arc<Comms>,
    manager: TaskManager,
    header: Header,
    sidebar: Sidebar,
    pending: Arc<Mutex<VecDeque<String>>>,
    dialog_subscription: SubscriptionId,
}

impl App {
    pub fn run(config: &Config, storage: Box<dyn KeyValueStorage>) -> Self {
        let comms = Arc::new(Comms::new());
        let manager = TaskManager::start(&comms, storage, config);
        let header = Header::mount(&comms);
        let sidebar = Sidebar::mount(&comms, &config.start_page);

        let pending = Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&pending);
        let dialog_subscription = comms.subscribe(Topic::AddTaskDialog, move |event| {
            if let Event::AddTaskDialog(project) = event {
                msg_debug!(Message::TaskDialogQueued(project.clone()));
                queue.lock().push_back(project.clone());
            }
        });

        comms.publish(Event::ChangePage(config.start_page.clone()));

        App {
            comms,
            manager,
            header,
            sidebar,
            pending,
            dialog_subscription,
        }
    }

    pub fn comms(&self) -> &Arc<Comms> {
        &self.comms
    }

    pub fn manager(&self) -> &TaskManager {
        &self.manager
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Projects with a task dialog waiting to be shown.
    pub fn pending_dialogs(&self) -> Vec<String> {
        self.pending.lock().iter().cloned().collect()
    }

    /// Shows the queued task dialogs one after another.
    ///
    /// Returns how many tasks were added.
    pub async fn run_pending_dialogs(&self) -> Result<usize> {
        self.run_pending_dialogs_with(|_| task_dialog(None)).await
    }

    /// Like [`App::run_pending_dialogs`], with `dialog` producing each outcome.
    pub async fn run_pending_dialogs_with<F, Fut>(&self, mut dialog: F) -> Result<usize>
    where
        F: FnMut(&str) -> Fut,
        Fut: Future<Output = Result<DialogOutcome<TaskDraft>>>,
    {
        let mut added = 0;

        loop {
            let next = self.pending.lock().pop_front();
            let Some(project) = next else {
                break;
            };

            match dialog(&project).await? {
                DialogOutcome::Submitted(draft) => {
                    let task = draft.into_task(false)?;
                    self.comms.publish(Event::AddTask {
                        project: project.clone(),
                        task,
                    });
                    self.comms.publish(Event::ChangePage(project));
                    added += 1;
                }
                DialogOutcome::Cancelled => msg_info!(Message::DialogCancelled),
            }
        }

        Ok(added)
    }

    /// Tears the application down and wipes the persisted state.
    pub fn close(self) {
        let App {
            comms,
            manager,
            header,
            sidebar,
            dialog_subscription,
            ..
        } = self;

        comms.unsubscribe(Topic::AddTaskDialog, Some(dialog_subscription));
        header.unmount();
        sidebar.unmount();
        manager.stop();
    }
}
