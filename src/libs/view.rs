//! Terminal rendering and the bus-driven view components.
//!
//! [`Header`] and [`Sidebar`] hold no reference to the manager or to each
//! other; everything they know arrives through the bus.

use super::comms::{Comms, Event, Request, RequestKind, Response, SubscriptionId, Topic};
use super::task::Task;
use anyhow::Result;
use parking_lot::Mutex;
use prettytable::{row, Table};
use std::sync::{Arc, Weak};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "DUE", "PRIORITY", "DONE"]);
        for task in tasks {
            let done = if task.is_complete { "x" } else { "" };
            table.add_row(row![
                task.id(),
                task.title,
                task.description,
                task.due_date.format("%Y-%m-%d"),
                task.priority,
                done
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Prints the project list, marking the active page with `>`.
    pub fn projects(projects: &[String], active: Option<&str>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "PROJECT"]);
        for project in projects {
            let marker = if Some(project.as_str()) == active { ">" } else { "" };
            table.add_row(row![marker, project]);
        }
        table.printstd();

        Ok(())
    }
}

fn unbind(comms: &Comms, subscriptions: &mut Vec<(Topic, SubscriptionId)>) {
    for (topic, id) in subscriptions.drain(..) {
        comms.unsubscribe(topic, Some(id));
    }
}

/// Page heading. Owns the answer to "which page is displayed".
pub struct Header {
    comms: Arc<Comms>,
    page: Arc<Mutex<String>>,
    subscriptions: Vec<(Topic, SubscriptionId)>,
    responder: bool,
}

impl Header {
    pub fn mount(comms: &Arc<Comms>) -> Self {
        let page = Arc::new(Mutex::new(String::new()));

        let current = Arc::clone(&page);
        let responder = comms.register_responder(RequestKind::CurrentPageName, move |_| {
            Some(Response::PageName(current.lock().clone()))
        });

        let heading = Arc::clone(&page);
        let on_change = comms.subscribe(Topic::ChangePage, move |event| {
            if let Event::ChangePage(name) = event {
                *heading.lock() = name.clone();
            }
        });

        let displayed = Arc::clone(&page);
        let bus: Weak<Comms> = Arc::downgrade(comms);
        let on_remove = comms.subscribe(Topic::RemoveProject, move |event| {
            let Event::RemoveProject(name) = event else {
                return;
            };
            let removed_current = *displayed.lock() == *name;
            if removed_current {
                if let Some(bus) = bus.upgrade() {
                    bus.publish(Event::ResetPage);
                }
            }
        });

        Header {
            comms: Arc::clone(comms),
            page,
            subscriptions: vec![(Topic::ChangePage, on_change), (Topic::RemoveProject, on_remove)],
            responder,
        }
    }

    pub fn page_name(&self) -> String {
        self.page.lock().clone()
    }

    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if std::mem::take(&mut self.responder) {
            self.comms.unregister_responder(RequestKind::CurrentPageName);
        }
        unbind(&self.comms, &mut self.subscriptions);
    }
}

impl Drop for Header {
    fn drop(&mut self) {
        self.release();
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SidebarState {
    projects: Vec<String>,
    active: String,
    visible: bool,
}

/// Navigation: the project list, the active page and its own visibility.
pub struct Sidebar {
    comms: Arc<Comms>,
    state: Arc<Mutex<SidebarState>>,
    subscriptions: Vec<(Topic, SubscriptionId)>,
}

impl Sidebar {
    /// Mounts the sidebar; a page reset navigates to `start_page`.
    pub fn mount(comms: &Arc<Comms>, start_page: &str) -> Self {
        let projects = comms
            .request(&Request::ProjectNames)
            .and_then(Response::into_project_names)
            .unwrap_or_default();
        let state = Arc::new(Mutex::new(SidebarState {
            projects,
            active: start_page.to_string(),
            visible: true,
        }));
        let mut subscriptions = Vec::new();

        let list = Arc::clone(&state);
        subscriptions.push((
            Topic::RenderProjects,
            comms.subscribe(Topic::RenderProjects, move |event| {
                if let Event::RenderProjects(names) = event {
                    list.lock().projects = names.clone();
                }
            }),
        ));

        let active = Arc::clone(&state);
        subscriptions.push((
            Topic::ChangePage,
            comms.subscribe(Topic::ChangePage, move |event| {
                if let Event::ChangePage(name) = event {
                    active.lock().active = name.clone();
                }
            }),
        ));

        let toggle = Arc::clone(&state);
        subscriptions.push((
            Topic::ToggleSidebar,
            comms.subscribe(Topic::ToggleSidebar, move |_| {
                let mut state = toggle.lock();
                state.visible = !state.visible;
            }),
        ));

        let bus = Arc::downgrade(comms);
        let start_page = start_page.to_string();
        subscriptions.push((
            Topic::ResetPage,
            comms.subscribe(Topic::ResetPage, move |_| {
                if let Some(bus) = bus.upgrade() {
                    bus.publish(Event::ChangePage(start_page.clone()));
                }
            }),
        ));

        Sidebar {
            comms: Arc::clone(comms),
            state,
            subscriptions,
        }
    }

    pub fn projects(&self) -> Vec<String> {
        self.state.lock().projects.clone()
    }

    pub fn active_page(&self) -> String {
        self.state.lock().active.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    pub fn unmount(mut self) {
        unbind(&self.comms, &mut self.subscriptions);
    }
}

impl Drop for Sidebar {
    fn drop(&mut self) {
        unbind(&self.comms, &mut self.subscriptions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_answers_current_page() {
        let comms = Arc::new(Comms::new());
        let header = Header::mount(&comms);

        comms.publish(Event::ChangePage("Important".into()));

        assert_eq!(header.page_name(), "Important");
        let answer = comms.request(&Request::CurrentPageName).and_then(Response::into_page_name);
        assert_eq!(answer.as_deref(), Some("Important"));

        header.unmount();
        assert!(!comms.has_responder(RequestKind::CurrentPageName));
    }

    #[test]
    fn test_removing_displayed_project_resets_to_start_page() {
        let comms = Arc::new(Comms::new());
        let header = Header::mount(&comms);
        let sidebar = Sidebar::mount(&comms, "Today");

        comms.publish(Event::ChangePage("Work".into()));
        comms.publish(Event::RemoveProject("Home".into()));
        assert_eq!(header.page_name(), "Work");

        comms.publish(Event::RemoveProject("Work".into()));
        assert_eq!(header.page_name(), "Today");
        assert_eq!(sidebar.active_page(), "Today");
    }

    #[test]
    fn test_sidebar_tracks_projects_and_visibility() {
        let comms = Arc::new(Comms::new());
        comms.publish(Event::RenderProjects(vec!["Queued".into()]));

        let sidebar = Sidebar::mount(&comms, "Today");
        assert_eq!(sidebar.projects(), vec!["Queued"]);

        comms.publish(Event::RenderProjects(vec!["A".into(), "B".into()]));
        comms.publish(Event::ToggleSidebar);

        assert_eq!(sidebar.projects(), vec!["A", "B"]);
        assert!(!sidebar.is_visible());
    }

    #[test]
    fn test_dropped_components_stop_listening() {
        let comms = Arc::new(Comms::new());
        drop(Header::mount(&comms));
        drop(Sidebar::mount(&comms, "Today"));

        assert_eq!(comms.subscriber_count(Topic::ChangePage), 0);
        assert_eq!(comms.subscriber_count(Topic::RenderProjects), 0);
    }
}
