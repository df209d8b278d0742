//! MedMart CLI - browse the catalog, place orders and inspect history.
//!
//! # Usage
//!
//! ```bash
//! # List in-stock allergy products, cheapest first
//! medmart catalog list --category "Allergy Relief" --in-stock-only --sort price-low
//!
//! # Place an order described in a YAML file
//! medmart checkout order.yaml
//!
//! # Show order history and the admin dashboard
//! medmart orders list
//! medmart dashboard
//! ```
//!
//! # Commands
//!
//! - `catalog list|show|categories` - Browse products
//! - `checkout` - Build a cart from a file and place the order
//! - `orders list|show` - Order history
//! - `dashboard` - Revenue, order count, low stock and top sellers

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medmart_core::{OrderId, ProductId};
use medmart_storefront::StorefrontConfig;
use medmart_storefront::catalog::SortKey;
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "medmart")]
#[command(author, version, about = "MedMart pharmacy storefront")]
struct Cli {
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
    /// Place an order described in a YAML file
    Checkout {
        /// Path to the order file
        file: PathBuf,
    },
    /// Inspect order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Show admin dashboard figures
    Dashboard,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products matching filters
    List(ListArgs),
    /// Show one product in detail
    Show {
        /// Product ID
        id: ProductId,
    },
    /// List categories
    Categories,
}

#[derive(clap::Args)]
struct ListArgs {
    /// Category name (`All` for every category)
    #[arg(short, long, default_value = "All")]
    category: String,

    /// Search name, category, manufacturer and description
    #[arg(short, long)]
    search: Option<String>,

    /// Lowest price to include
    #[arg(long, default_value = "0")]
    min_price: Decimal,

    /// Highest price to include
    #[arg(long, default_value = "500")]
    max_price: Decimal,

    /// Only products that need a prescription
    #[arg(long)]
    prescription_only: bool,

    /// Only products with stock
    #[arg(long)]
    in_stock_only: bool,

    /// Sort order (`name`, `price-low`, `price-high`, `popularity`)
    #[arg(long, default_value = "name")]
    sort: SortKey,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    page: usize,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all orders
    List,
    /// Show one order
    Show {
        /// Order ID
        id: OrderId,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medmart_storefront=info,medmart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = init_sentry(&config);
    init_tracing();
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let result = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List(args) => {
                let filters = commands::catalog::ListFilters {
                    category: args.category,
                    search: args.search,
                    min_price: args.min_price,
                    max_price: args.max_price,
                    prescription_only: args.prescription_only,
                    in_stock_only: args.in_stock_only,
                    sort: args.sort,
                };
                commands::catalog::list(&filters, args.page);
                Ok(())
            }
            CatalogAction::Show { id } => commands::catalog::show(id),
            CatalogAction::Categories => {
                commands::catalog::categories();
                Ok(())
            }
        },
        Commands::Checkout { file } => commands::checkout::run(config, &file).await,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(config),
            OrdersAction::Show { id } => commands::orders::show(config, id),
        },
        Commands::Dashboard => commands::dashboard::show(config),
    };

    result.map_err(|e| {
        e.report();
        e.user_message().into()
    })
}
