use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod commands;

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - headless client for the Scribe content studio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        username: String,
    },
    /// Create a new account
    Register {
        username: String,
    },
    /// Drop the current session
    Logout,
    /// Show backend health and session state
    Status,
    /// Generate content, save it and attach analyzed images
    Generate(commands::generate::GenerateArgs),
    /// Browse and mutate the item library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
    /// Analyze images without generating anything
    Analyze {
        /// Image files to caption and tag
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Ask the content assistant a question
    Chat {
        message: String,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum LibraryAction {
    /// List items, pinned first
    List(commands::library::ListArgs),
    /// Delete an item
    Delete { id: String },
    /// Clone an item server-side
    Duplicate { id: String },
    /// Pin an item to the top of the library
    Pin { id: String },
    /// Unpin an item
    Unpin { id: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config path and effective settings
    Show,
    /// Write a default config file
    Init,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("SCRIBE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { username } => commands::auth::login(&username).await?,
        Commands::Register { username } => commands::auth::register(&username).await?,
        Commands::Logout => commands::auth::logout().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Generate(args) => commands::generate::run(args).await?,
        Commands::Library { action } => match action {
            LibraryAction::List(args) => commands::library::list(args).await?,
            LibraryAction::Delete { id } => commands::library::delete(&id).await?,
            LibraryAction::Duplicate { id } => commands::library::duplicate(&id).await?,
            LibraryAction::Pin { id } => commands::library::set_pinned(&id, true).await?,
            LibraryAction::Unpin { id } => commands::library::set_pinned(&id, false).await?,
        },
        Commands::Analyze { files } => commands::analyze::run(&files).await?,
        Commands::Chat { message } => commands::chat::run(&message).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show()?,
            ConfigAction::Init => commands::config::init()?,
        },
    }

    Ok(())
}
