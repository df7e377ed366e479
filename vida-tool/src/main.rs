mod commands;
mod config;
mod error;
mod store;

#[cfg(feature = "chat")]
mod chat;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{Overrides, Settings, load_config};
use crate::store::{AppContext, StoreType};

#[derive(Parser)]
#[command(name = "vida")]
#[command(about = "VIDA NL virtual assistant", long_about = None)]
struct Cli {
    /// Store type: fjall or memory
    #[arg(long, global = true)]
    store_type: Option<StoreType>,

    /// Path to the transcript store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Remote reply endpoint URL
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Answer from the local rules only
    #[arg(long, global = true)]
    local_only: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[cfg(feature = "chat")]
    /// Start an interactive chat session
    Chat,

    /// Send one message and print the reply
    Ask {
        /// Message text
        #[arg(conflicts_with = "suggestion")]
        text: Vec<String>,

        /// Send a suggestion's prompt instead (see `vida suggestions`)
        #[arg(short, long)]
        suggestion: Option<String>,
    },

    /// Print the stored conversation
    History {
        /// Render as HTML with inline markup
        #[arg(long)]
        html: bool,
    },

    /// Start a new conversation
    Clear,

    /// List the quick suggestions
    Suggestions,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("VIDA_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let overrides = Overrides {
        store_type: cli.store_type,
        store_path: cli.store,
        endpoint: cli.endpoint,
        local_only: cli.local_only,
    }
    .with_env();
    let settings = Settings::resolve(load_config(), overrides);

    match cli.command {
        #[cfg(feature = "chat")]
        Command::Chat => {
            let ctx = AppContext::open(&settings)?;
            chat::run(ctx).await?;
        }
        Command::Ask { text, suggestion } => {
            let prompt = commands::prompt_text(&text, suggestion.as_deref())?;
            let mut ctx = AppContext::open(&settings)?;
            commands::ask(&mut ctx.responder, &prompt, &mut io::stdout()).await?;
        }
        Command::History { html } => {
            let ctx = AppContext::open(&settings)?;
            commands::history(ctx.responder.transcript(), html, &mut io::stdout())?;
        }
        Command::Clear => {
            let mut ctx = AppContext::open(&settings)?;
            ctx.responder.clear();
        }
        Command::Suggestions => {
            commands::suggestions(&mut io::stdout())?;
        }
    }

    Ok(())
}
