use crate::config::Config;
use anyhow::Result;
use checklist::TodoList;
use checklist_sync::SyncController;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ListsOp {
    /// Create a new list
    Create { title: String },
    /// Invite another user to a list you own
    Share { list_id: String, email: String },
    /// Delete a list you own
    Delete { list_id: String },
}

pub fn run(op: Option<ListsOp>, json: bool, config: &Config) -> Result<()> {
    let mut controller = SyncController::new(crate::backend(config)?);

    match op {
        None => {
            controller.load_lists()?;
            print_lists(controller.lists(), json)?;
        }
        Some(ListsOp::Create { title }) => {
            let list = controller.create_list(&title)?;
            println!("Created \"{}\" ({})", list.title, list.id);
        }
        Some(ListsOp::Share { list_id, email }) => {
            controller.share_list(&list_id, &email)?;
            println!("Shared {} with {}", list_id, email);
        }
        Some(ListsOp::Delete { list_id }) => {
            controller.delete_list(&list_id)?;
            println!("Deleted {}", list_id);
        }
    }
    Ok(())
}

fn print_lists(lists: &[TodoList], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(lists)?);
        return Ok(());
    }
    if lists.is_empty() {
        println!("No lists yet. Create one with: ckl lists create <title>");
        return Ok(());
    }
    for list in lists {
        println!("{}  {}", list.id, list.title);
    }
    Ok(())
}
