mod cmd_auth;
mod cmd_items;
mod cmd_lists;
mod config;

use anyhow::Result;
use checklist_http::{FileSessionStore, HttpBackend};
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ckl")]
#[command(about = "Work with shared checklists from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign up, log in, log out, or show the session
    Auth {
        #[command(subcommand)]
        op: cmd_auth::AuthOp,
    },
    /// Show your lists, or create, share, and delete them
    Lists {
        #[command(subcommand)]
        op: Option<cmd_lists::ListsOp>,
    },
    /// Show a list's items, or add, toggle, and remove them
    Items {
        /// The list to operate on
        list_id: String,

        #[command(subcommand)]
        op: Option<cmd_items::ItemsOp>,
    },
}

/// HTTP backend wired to the configured server and token file.
fn backend(config: &Config) -> Result<HttpBackend<FileSessionStore>> {
    let store = FileSessionStore::new(config.token_path.clone());
    Ok(HttpBackend::new(config.api_url.clone(), store)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load()?;

    match cli.command {
        Commands::Auth { op } => cmd_auth::run(op, &config),
        Commands::Lists { op } => cmd_lists::run(op, cli.json, &config),
        Commands::Items { list_id, op } => cmd_items::run(&list_id, op, cli.json, &config),
    }
}
