use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod render;

use context::{AppContext, Options};

#[derive(Parser)]
#[command(name = "cardvote")]
#[command(about = "CardVote - review content cards one at a time with like/dislike votes", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides the config file and CARDVOTE_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep users and session in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Start an interactive review session
    Review,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cardvote=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = AppContext::build(&Options {
        config: cli.config,
        api_url: cli.api_url,
        ephemeral: cli.ephemeral,
    })?;

    match cli.command {
        Commands::Register {
            email,
            name,
            password,
        } => commands::account::register(&context, &email, &name, &password).await?,
        Commands::Login { email, password } => {
            commands::account::login(&context, &email, &password).await?
        }
        Commands::Logout => commands::account::logout(&context),
        Commands::Whoami => commands::account::whoami(&context),
        Commands::Review => commands::review::run(&context).await?,
    }

    Ok(())
}
