//! Bandhan Store CLI - render the storefront and manage the local cart.
//!
//! # Usage
//!
//! ```bash
//! # Render the storefront page to a static file
//! bandhan render --out dist/index.html
//!
//! # Print the normalized configuration document
//! bandhan catalog
//!
//! # Work with the cart saved under ./data
//! bandhan cart add --id p1 --name "Silk Saree" --price 2999
//! bandhan cart set p1 3
//! bandhan cart list
//! bandhan cart checkout
//! ```
//!
//! # Commands
//!
//! - `render` - Render the storefront page with the current cart
//! - `catalog` - Print the normalized configuration as JSON
//! - `cart` - List, change or check out the saved cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bandhan")]
#[command(author, version, about = "Bandhan Store CLI tools")]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the configuration and the cart live.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Configuration source (file path or http(s) URL)
    #[arg(long, global = true, env = "STOREFRONT_CATALOG_SOURCE")]
    pub source: Option<String>,

    /// Directory holding the cart snapshot
    #[arg(long, global = true, env = "STOREFRONT_CART_DIR", default_value = "data")]
    pub cart_dir: PathBuf,

    /// Keep the cart in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Phone used when the footer has none
    #[arg(long, global = true, env = "CHECKOUT_FALLBACK_PHONE")]
    pub fallback_phone: Option<String>,

    /// Country code prefixed to 10-digit numbers
    #[arg(long, global = true, env = "CHECKOUT_COUNTRY_CODE")]
    pub country_code: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the storefront page with the current cart
    Render {
        /// Output HTML file
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print the normalized configuration as JSON
    Catalog {
        /// Print the raw document instead of the normalized one
        #[arg(long)]
        raw: bool,
    },
    /// Manage the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    List,
    /// Add one unit of a product
    Add {
        /// Product ID (a timestamp ID is assigned when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price in rupees
        #[arg(short, long)]
        price: f64,

        /// Product image URL
        #[arg(long)]
        image: Option<String>,

        /// Product category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Print the order summary and the WhatsApp link
    Checkout,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandhan_cli=info,bandhan_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = cli.store;
    match cli.command {
        Commands::Render { out } => commands::render::render(&store, &out).await?,
        Commands::Catalog { raw } => commands::catalog::print(&store, raw).await?,
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&store)?,
            CartAction::Add {
                id,
                name,
                price,
                image,
                category,
            } => {
                let item = commands::cart::new_item(id.as_deref(), &name, price, image, category)?;
                commands::cart::add(&store, item)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&store, &id)?,
            CartAction::Set { id, quantity } => commands::cart::set(&store, &id, quantity)?,
            CartAction::Clear => commands::cart::clear(&store)?,
            CartAction::Checkout => commands::cart::checkout(&store).await?,
        },
    }
    Ok(())
}
