use super::launch;
use crate::libs::comms::Event;
use crate::libs::messages::Message;
use crate::libs::pages::Page;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Page to display: Today, "This week", Important, "All Tasks" or a project name
    page: Option<String>,

    /// Also print the project list
    #[arg(short, long)]
    sidebar: bool,
}

pub fn cmd(args: ShowArgs) -> Result<()> {
    let app = launch()?;
    let comms = app.comms();

    if let Some(name) = args.page {
        let page = Page::from_name(&name);
        if page.is_project() && !app.sidebar().projects().contains(&name) {
            msg_bail_anyhow!(Message::ProjectNotFound(name));
        }
        comms.publish(Event::ChangePage(name));
    }

    if args.sidebar {
        let active = app.sidebar().active_page();
        View::projects(&app.sidebar().projects(), Some(&active))?;
    }

    let page = Page::from_name(&app.header().page_name());
    let tasks = page.tasks(comms, Local::now().date_naive());

    msg_print!(Message::PageHeader(page.to_string()), true);
    if tasks.is_empty() {
        msg_info!(Message::NoTasksOnPage(page.to_string()));
    } else {
        View::tasks(&tasks)?;
    }

    Ok(())
}
