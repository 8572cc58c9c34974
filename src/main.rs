//! # Catalog CLI (`catalog`)
//!
//! Manage the product catalog from the command line or serve it over HTTP.
//!
//! ```bash
//! catalog --config ./config/catalog.toml <command>
//! ```
//!
//! | Command | Description |
//! |---------|-------------|
//! | `catalog init` | Create the SQLite database and the products table |
//! | `catalog create ...` | Create a product |
//! | `catalog list` | List a page of products |
//! | `catalog get <term>` | Show a product by id, title, or slug |
//! | `catalog update <id> ...` | Change fields of a product |
//! | `catalog delete <term>` | Delete a product by id, title, or slug |
//! | `catalog serve` | Start the HTTP API |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use catalog::config;
use catalog::models::{CreateProduct, UpdateProduct};
use catalog::{logging, products, schema, server};

#[derive(Parser)]
#[command(
    name = "catalog",
    about = "Product catalog: SQLite-backed CRUD with a CLI and HTTP API",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/catalog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema. Safe to run more than once.
    Init,

    /// Create a product.
    ///
    /// The slug defaults to the title and is always normalized
    /// (lower-case, spaces/apostrophes/hyphens become underscores).
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        gender: String,

        /// Available size; repeat for several.
        #[arg(long = "size", required = true)]
        sizes: Vec<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        stock: Option<i64>,

        /// Tag; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        slug: Option<String>,
    },

    /// List products in storage order.
    List {
        /// Page size (defaults to `[pagination].default_limit`).
        #[arg(long)]
        limit: Option<u32>,

        /// Number of products to skip.
        #[arg(long)]
        offset: Option<u32>,
    },

    /// Show a product by UUID, title (case-insensitive), or slug.
    Get { term: String },

    /// Update fields of a product addressed by UUID.
    ///
    /// Omitted fields keep their stored values. Changing the title does
    /// not change the slug.
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        /// Replace sizes; repeat for several.
        #[arg(long = "size")]
        sizes: Vec<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        stock: Option<i64>,

        /// Replace tags; repeat for several.
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        slug: Option<String>,
    },

    /// Delete a product by UUID, title, or slug.
    Delete { term: String },

    /// Start the HTTP API on `[server].bind`.
    Serve,
}

fn non_empty(v: Vec<String>) -> Option<Vec<String>> {
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;
    logging::init(&cfg.logging);

    match cli.command {
        Commands::Init => {
            schema::run_init(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Create {
            title,
            gender,
            sizes,
            price,
            stock,
            tags,
            description,
            slug,
        } => {
            let input = CreateProduct {
                title,
                price: price.unwrap_or_default(),
                description,
                slug,
                stock: stock.unwrap_or_default(),
                sizes,
                gender,
                tags,
            };
            products::run_create(&cfg, input).await?;
        }
        Commands::List { limit, offset } => {
            products::run_list(&cfg, limit, offset).await?;
        }
        Commands::Get { term } => {
            products::run_get(&cfg, &term).await?;
        }
        Commands::Update {
            id,
            title,
            gender,
            sizes,
            price,
            stock,
            tags,
            description,
            slug,
        } => {
            let changes = UpdateProduct {
                title,
                price,
                description,
                slug,
                stock,
                sizes: non_empty(sizes),
                gender,
                tags: non_empty(tags),
            };
            products::run_update(&cfg, &id, changes).await?;
        }
        Commands::Delete { term } => {
            products::run_delete(&cfg, &term).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
