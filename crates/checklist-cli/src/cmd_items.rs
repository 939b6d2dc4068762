use crate::config::Config;
use anyhow::Result;
use checklist::TodoItem;
use checklist_sync::SyncController;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ItemsOp {
    /// Add an item to the list
    Add { title: String },
    /// Flip an item's completion flag
    Toggle { item_id: String },
    /// Remove an item from the list
    Remove { item_id: String },
}

pub fn run(list_id: &str, op: Option<ItemsOp>, json: bool, config: &Config) -> Result<()> {
    let mut controller = SyncController::new(crate::backend(config)?);
    controller.open_list(list_id)?;

    match op {
        None => {}
        Some(ItemsOp::Add { title }) => {
            let item = controller.create_item(&title)?;
            println!("Added \"{}\" ({})", item.title, item.id);
        }
        Some(ItemsOp::Toggle { item_id }) => {
            let now_complete = controller.toggle_item(&item_id)?;
            println!(
                "{} is now {}",
                item_id,
                if now_complete { "complete" } else { "incomplete" }
            );
        }
        Some(ItemsOp::Remove { item_id }) => {
            controller.delete_item(&item_id)?;
            println!("Removed {}", item_id);
        }
    }

    print_items(controller.items(), json)
}

fn print_items(items: &[TodoItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("(empty list)");
        return Ok(());
    }
    for item in items {
        let mark = if item.is_complete { "x" } else { " " };
        println!("[{}] {}  ({})", mark, item.title, item.id);
    }
    Ok(())
}
