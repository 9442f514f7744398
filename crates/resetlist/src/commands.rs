//! CLI command handlers.

use anyhow::{Result, anyhow};
use resetlist_app::service::TodoService;
use resetlist_app::store::EventStore;
use resetlist_app::view::TodoView;
use resetlist_core::id::TodoId;
use time::OffsetDateTime;

use crate::{Command, LsFormat};

/// Execute a CLI command against the service.
pub fn run<S: EventStore>(command: Command, service: &mut TodoService<S>) -> Result<()> {
    match command {
        Command::Ls { format } => {
            let views = service.list(OffsetDateTime::now_utc());
            if views.is_empty() {
                println!("No todos yet");
                return Ok(());
            }
            match format {
                LsFormat::Table => render_table(&views),
                LsFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
            }
        }

        Command::Add { text, reset, actor } => {
            let todo = service.add(&text, &reset, &actor)?;
            println!("added: {} ({})", todo.text, todo.id);
        }

        Command::Check { id, actor } => {
            let id = parse_todo_id(&id)?;
            service.set_completed(id, true, &actor)?;
            println!("checked: {id}");
        }

        Command::Uncheck { id, actor } => {
            let id = parse_todo_id(&id)?;
            service.set_completed(id, false, &actor)?;
            println!("unchecked: {id}");
        }

        Command::Rename { id, text, actor } => {
            let id = parse_todo_id(&id)?;
            service.rename(id, &text, &actor)?;
            println!("renamed: {id}");
        }

        Command::Rm { id, actor } => {
            let id = parse_todo_id(&id)?;
            service.remove(id, &actor)?;
            println!("removed: {id}");
        }

        Command::Serve { .. } => unreachable!("serve is routed to the HTTP server"),
    }

    Ok(())
}

fn parse_todo_id(raw: &str) -> Result<TodoId> {
    raw.parse()
        .map_err(|err| anyhow!("invalid todo id '{raw}': {err}"))
}

fn render_table(views: &[TodoView]) {
    println!("Done | Todo | Reset | Remaining");
    println!("---- | ---- | ----- | ---------");
    for view in views {
        let mark = if view.done { "x" } else { " " };
        println!(
            "[{mark}]  | {} | {} | {}",
            view.text, view.reset, view.remaining
        );
    }
}
