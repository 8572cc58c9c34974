//! CLI entry points for product commands.
//!
//! Each command opens the configured SQLite database, runs one
//! [`ProductService`] operation, and prints the result to stdout. Domain
//! errors (`not found`, duplicate keys) print `Error: <message>` to
//! stderr and exit with status 1.
//!
//! ```bash
//! catalog create --title "Red Shoes" --gender unisex --size 40 --size 41
//! catalog get red_shoes
//! catalog list --limit 5 --offset 10
//! catalog update 550e8400-e29b-41d4-a716-446655440000 --stock 3
//! catalog delete "red shoes"
//! ```

use anyhow::{bail, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

use catalog_core::models::{CreateProduct, Pagination, Product, UpdateProduct};
use catalog_core::service::{parse_product_id, CatalogError, ProductService};

use crate::config::Config;
use crate::db;
use crate::schema;
use crate::sqlite_store::SqliteStore;

async fn open_service(config: &Config) -> Result<(SqlitePool, ProductService)> {
    let pool = db::connect(config).await?;
    schema::ensure_schema(&pool).await?;
    let service = ProductService::new(Arc::new(SqliteStore::new(pool.clone())));
    Ok((pool, service))
}

fn exit_with(err: CatalogError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn print_product(p: &Product) {
    println!("id:          {}", p.id);
    println!("title:       {}", p.title);
    println!("slug:        {}", p.slug);
    println!("price:       {}", p.price);
    println!("stock:       {}", p.stock);
    println!("gender:      {}", p.gender);
    println!("sizes:       {}", p.sizes.join(", "));
    println!("tags:        {}", p.tags.join(", "));
    if let Some(ref d) = p.description {
        println!("description: {}", d);
    }
}

/// `catalog create`
pub async fn run_create(config: &Config, input: CreateProduct) -> Result<()> {
    let (pool, service) = open_service(config).await?;
    let result = service.create(input).await;
    pool.close().await;

    match result {
        Ok(p) => {
            println!("Created product {} (slug: {})", p.id, p.slug);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

/// `catalog list`
pub async fn run_list(config: &Config, limit: Option<u32>, offset: Option<u32>) -> Result<()> {
    let limit = limit.unwrap_or(config.pagination.default_limit);
    if limit == 0 || limit > config.pagination.max_limit {
        bail!("--limit must be between 1 and {}", config.pagination.max_limit);
    }
    let page = Pagination {
        limit,
        offset: offset.unwrap_or(0),
    };

    let (pool, service) = open_service(config).await?;
    let result = service.find_all(page).await;
    pool.close().await;

    let products = match result {
        Ok(p) => p,
        Err(e) => exit_with(e),
    };

    println!("{} product(s)", products.len());
    for p in &products {
        println!("{}  {:<32}  {:<32}  {:>10.2}  {:>6}", p.id, p.title, p.slug, p.price, p.stock);
    }
    Ok(())
}

/// `catalog get <term>`
pub async fn run_get(config: &Config, term: &str) -> Result<()> {
    let (pool, service) = open_service(config).await?;
    let result = service.find_one(term).await;
    pool.close().await;

    match result {
        Ok(p) => {
            print_product(&p);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

/// `catalog update <id>`
pub async fn run_update(config: &Config, id: &str, changes: UpdateProduct) -> Result<()> {
    let Some(id) = parse_product_id(id) else {
        bail!("id must be a UUID, got '{}'", id);
    };

    let (pool, service) = open_service(config).await?;
    let result = service.update(id, changes).await;
    pool.close().await;

    match result {
        Ok(p) => {
            println!("Updated product {}", p.id);
            print_product(&p);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

/// `catalog delete <term>`
pub async fn run_delete(config: &Config, term: &str) -> Result<()> {
    let (pool, service) = open_service(config).await?;
    let result = service.remove(term).await;
    pool.close().await;

    match result {
        Ok(()) => {
            println!("Deleted product {}", term);
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}
