//! Bookshelf CLI - terminal storefront for the Bookshelf bookstore.
//!
//! Commands:
//! - `bookshelf books` - List or search the catalog
//! - `bookshelf login` - Check credentials against the store
//! - `bookshelf signup` - Create an account
//! - `bookshelf shop` - Browse, fill a cart and check out interactively

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BooksArgs, LoginArgs};

/// Bookshelf CLI - shop the Bookshelf bookstore from the terminal
#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List or search books
    Books(BooksArgs),

    /// Log in to the store
    Login(LoginArgs),

    /// Create a new account
    Signup,

    /// Start an interactive shopping session
    Shop,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), output)?;
    if let Err(e) = logging::init(&ctx.config.logging, cli.verbose) {
        ctx.output.warn(&format!("Logging disabled: {:#}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Books(args) => commands::books::run(args, &ctx).await,
        Commands::Login(args) => commands::auth::login(args, &ctx).await,
        Commands::Signup => commands::auth::signup(&ctx).await,
        Commands::Shop => commands::shop::run(&ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
