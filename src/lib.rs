//! # Catalog
//!
//! A product catalog backed by SQLite, exposed through a CLI (`catalog`)
//! and an HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐
//! │   CLI    │   │   HTTP   │
//! │(catalog) │   │  (axum)  │
//! └────┬─────┘   └────┬─────┘
//!      └──────┬───────┘
//!             ▼
//!     ┌────────────────┐     ┌──────────────┐
//!     │ ProductService │────▶│ ProductStore │──▶ SQLite / memory
//!     └────────────────┘     └──────────────┘
//! ```
//!
//! The service, models, and store trait live in the `catalog-core` crate
//! and are re-exported here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`db`] | SQLite connection pool with WAL mode |
//! | [`schema`] | Products table bootstrap |
//! | [`sqlite_store`] | SQLite implementation of `ProductStore` |
//! | [`products`] | CLI command handlers |
//! | [`server`] | HTTP API (Axum) with CORS |

pub mod config;
pub mod db;
pub mod logging;
pub mod products;
pub mod schema;
pub mod server;
pub mod sqlite_store;

pub use catalog_core::{models, service, slug, store};
pub use catalog_core::{CatalogError, ProductService, ProductStore};
