//! Cocktail Haven CLI - the storefront's front end.
//!
//! # Usage
//!
//! ```bash
//! # Accounts and session
//! haven auth register -f Ana -l Lopez -e ana@example.com
//! haven auth login -e ana@example.com
//! haven auth logout
//!
//! # Browse the catalog
//! haven catalog categories
//! haven catalog drinks --category "Ordinary Drink"
//! haven catalog show 11007
//!
//! # Manage the cart
//! haven cart show
//! haven cart add 11007
//! haven cart inc 1
//! haven cart dec 1
//! haven cart remove 1
//!
//! # Pay
//! haven checkout
//! ```
//!
//! # Commands
//!
//! - `auth` - register, login, logout
//! - `catalog` - browse categories, listings, and drink detail
//! - `cart` - show and mutate the cart
//! - `checkout` - the interactive payment flow

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary IS the screen: user-facing output goes to stdout, alerts to
// stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};

use cocktail_haven_storefront::config::HavenConfig;
use cocktail_haven_storefront::error::AppError;
use cocktail_haven_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "haven")]
#[command(author, version, about = "Cocktail Haven storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts and the active session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse the cocktail catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show and mutate the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Pay for the cart's contents
    Checkout,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Register a new account (prompts for the password)
    Register {
        /// First name
        #[arg(short = 'f', long)]
        first_name: String,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Log in and record the session identity (prompts for the password)
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Forget the session identity
    Logout,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the catalog's categories
    Categories,
    /// List drinks, optionally filtered by category
    Drinks {
        /// Category name; omitted means the "All" listing
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one drink's detail
    Show {
        /// Catalog drink identifier
        drink_id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with line numbers and totals
    Show,
    /// Add a drink to the cart as a new line
    Add {
        /// Catalog drink identifier
        drink_id: String,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Line number from `cart show`
        line: usize,
    },
    /// Decrease a line's quantity by one (asks before removing the line)
    Dec {
        /// Line number from `cart show`
        line: usize,
    },
    /// Remove a line (asks first)
    Remove {
        /// Line number from `cart show`
        line: usize,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; user-facing output goes to stdout, diagnostics to
    // the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cocktail_haven=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        // One alert line, like the app's error modal; detail is in the logs
        eprintln!("Error: {}", e.alert_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = HavenConfig::from_env()?;
    let state = AppState::new(config).await?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Register {
                first_name,
                last_name,
                email,
            } => commands::auth::register(&state, first_name, last_name, email).await?,
            AuthAction::Login { email } => commands::auth::login(&state, email).await?,
            AuthAction::Logout => commands::auth::logout(&state).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories(&state).await?,
            CatalogAction::Drinks { category } => {
                commands::catalog::drinks(&state, category.as_deref()).await?;
            }
            CatalogAction::Show { drink_id } => {
                commands::catalog::show(&state, &drink_id).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state).await?,
            CartAction::Add { drink_id } => commands::cart::add(&state, &drink_id).await?,
            CartAction::Inc { line } => commands::cart::change(&state, line, 1).await?,
            CartAction::Dec { line } => commands::cart::change(&state, line, -1).await?,
            CartAction::Remove { line } => commands::cart::remove(&state, line).await?,
        },
        Commands::Checkout => commands::checkout::run(&state).await?,
    }
    Ok(())
}
