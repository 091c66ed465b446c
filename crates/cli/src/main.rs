//! Viki CLI - drive the storefront cart and checkout from a terminal.
//!
//! Each subcommand plays one page's part against the file-backed store in
//! `VIKI_DATA_DIR`, so a whole purchase can be walked through by hand.
//!
//! # Usage
//!
//! ```bash
//! # Listing page: add a product (price in kobo)
//! viki add --id a --name "Ankara Dress" --price 480000 --image /img/a.jpg
//!
//! # Cart page
//! viki cart
//! viki qty a 3
//! viki bump a -1
//! viki remove a
//! viki clear
//!
//! # Checkout page
//! viki review
//! viki checkout -f name="Ada Obi" -f email=ada@example.com -f phone=0800 -f address="12 Marina"
//!
//! # Payment page
//! viki order
//! viki pay
//!
//! # Contact page
//! viki contact -f name=Ada -f email=ada@example.com -f message="Hello"
//! ```
//!
//! Set `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use viki_storefront::config::StorefrontConfig;
use viki_storefront::{Storefront, StorefrontError};

mod commands;

#[derive(Parser)]
#[command(name = "viki")]
#[command(author, version, about = "Viki storefront cart and checkout")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart page
    Cart,
    /// Add one unit of a product to the cart
    Add {
        /// Product id on the add-to-cart button
        #[arg(long)]
        id: Option<String>,

        /// Product id on the enclosing product card (used when --id is absent)
        #[arg(long)]
        product_id: Option<String>,

        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price in minor currency units
        #[arg(short, long)]
        price: String,

        /// Product image URL
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Set a line's quantity (below 1 removes it)
    Qty {
        id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Change a line's quantity by a signed amount
    Bump {
        id: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line from the cart
    Remove { id: String },
    /// Empty the cart
    Clear,
    /// Show the checkout order summary
    Review,
    /// Submit the shipping form
    Checkout {
        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Show the payment page
    Order,
    /// Confirm payment and place the order
    Pay,
    /// Send the support form
    Contact {
        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_parser = commands::parse_field)]
        fields: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "viki_cli=info,viki_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        if e.is_user_error() {
            tracing::warn!("{}", e.user_message());
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), StorefrontError> {
    let config = StorefrontConfig::from_env()?;
    let storefront = Storefront::open(config)?;
    storefront.subscribe(commands::cart::announce);

    match cli.command {
        Commands::Cart => commands::cart::show(&storefront),
        Commands::Add {
            id,
            product_id,
            name,
            price,
            image,
        } => commands::cart::add(&storefront, id, product_id, name, price, image)?,
        Commands::Qty { id, quantity } => commands::cart::set_quantity(&storefront, &id, quantity)?,
        Commands::Bump { id, delta } => commands::cart::bump(&storefront, &id, delta)?,
        Commands::Remove { id } => commands::cart::remove(&storefront, &id)?,
        Commands::Clear => commands::cart::clear(&storefront)?,
        Commands::Review => commands::checkout::review(&storefront),
        Commands::Checkout { fields } => commands::checkout::submit(&storefront, fields)?,
        Commands::Order => commands::checkout::order(&storefront),
        Commands::Pay => commands::checkout::pay(&storefront)?,
        Commands::Contact { fields } => commands::contact::submit(&storefront, fields).await?,
    }
    Ok(())
}
