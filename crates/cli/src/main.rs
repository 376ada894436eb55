//! Cartwheel CLI - drive the storefront stores from a terminal.
//!
//! State persists between invocations in the data directory, so a sequence
//! of commands behaves like a browsing session.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! cw --catalog catalog.yaml catalog list --sort price-low --category Electronics
//!
//! # Search-as-you-type suggestions, then submit a search
//! cw --catalog catalog.yaml suggest wat
//! cw --catalog catalog.yaml search watch
//!
//! # Cart
//! cw --catalog catalog.yaml cart add 2 -q 3
//! cw --catalog catalog.yaml cart show
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, filter and sort products; show categories
//! - `suggest` / `search` / `searches` - Suggestions and recent searches
//! - `cart` - Add, remove, update and clear cart lines
//! - `view` / `viewed` - Recently viewed products
//! - `wishlist` - Saved products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cartwheel_storefront::config::LogFormat;
use cartwheel_storefront::{Catalog, Storefront, StorefrontConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "cw")]
#[command(author, version, about = "Cartwheel storefront CLI")]
struct Cli {
    /// Catalog file (.json, .yaml or .yml); overrides `CARTWHEEL_CATALOG`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// State directory; overrides `CARTWHEEL_DATA_DIR`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show search-as-you-type suggestions for a query
    Suggest {
        query: String,

        /// Maximum number of suggestions (default: configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Submit a search: record it and list every match
    Search { query: String },
    /// Recent and popular searches
    Searches {
        #[command(subcommand)]
        action: SearchesAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// View a product (records it as recently viewed)
    View { id: String },
    /// List recently viewed products
    Viewed {
        /// Forget all recently viewed products
        #[arg(long)]
        clear: bool,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only products whose name, category or description contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Only products in this category (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Sort order (`name`, `price-low`, `price-high`, `rating`)
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// List categories
    Categories,
    /// Show one product
    Show { id: String },
}

#[derive(Subcommand)]
enum SearchesAction {
    /// Recent searches, most recent first
    Recent,
    /// Popular searches
    Popular,
    /// Forget recent searches
    Clear,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product to the cart
    Add {
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Set a line's quantity (0 removes it)
    Update { id: String, quantity: u32 },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save or unsave a product
    Toggle { id: String },
    /// Remove every saved product
    Clear,
}

fn main() {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .init();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr so command output
/// on stdout stays clean.
fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_storefront=info,cartwheel_cli=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let catalog_path = config.catalog_path.clone().ok_or(CliError::NoCatalog)?;
    let catalog = Catalog::from_path(&catalog_path)?;
    let mut shop = Storefront::open_in_data_dir(config, catalog)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                search,
                category,
                sort,
            } => commands::catalog::list(&shop, search, &category, &sort, &mut out)?,
            CatalogAction::Categories => commands::catalog::categories(&shop, &mut out)?,
            CatalogAction::Show { id } => commands::catalog::show(&shop, &id, &mut out)?,
        },
        Commands::Suggest { query, limit } => {
            commands::search::suggest(&shop, &query, limit, &mut out)?;
        }
        Commands::Search { query } => commands::search::submit(&mut shop, &query, &mut out)?,
        Commands::Searches { action } => match action {
            SearchesAction::Recent => commands::search::recent(&shop, &mut out)?,
            SearchesAction::Popular => commands::search::popular(&mut out)?,
            SearchesAction::Clear => commands::search::clear(&mut shop, &mut out)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop, &mut out)?,
            CartAction::Add { id, quantity } => {
                commands::cart::add(&mut shop, &id, quantity, &mut out)?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut shop, &id, &mut out)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut shop, &id, quantity, &mut out)?;
            }
            CartAction::Clear => commands::cart::clear(&mut shop, &mut out)?,
        },
        Commands::View { id } => commands::lists::view(&mut shop, &id, &mut out)?,
        Commands::Viewed { clear } => commands::lists::viewed(&mut shop, clear, &mut out)?,
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::lists::wishlist(&shop, &mut out)?,
            WishlistAction::Toggle { id } => {
                commands::lists::toggle_wishlist(&mut shop, &id, &mut out)?;
            }
            WishlistAction::Clear => commands::lists::clear_wishlist(&mut shop, &mut out)?,
        },
    }
    Ok(())
}
