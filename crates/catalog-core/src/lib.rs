//! # Catalog Core
//!
//! Storage-agnostic logic for the product catalog: data models, slug
//! normalization, the store abstraction, and the catalog service.
//!
//! This crate contains no tokio, sqlx, or filesystem I/O. Backends live
//! behind the [`store::ProductStore`] trait; an in-memory implementation
//! ships here for tests and embedding.

pub mod models;
pub mod service;
pub mod slug;
pub mod store;

pub use models::{CreateProduct, Pagination, Product, UpdateProduct};
pub use service::{CatalogError, ProductService};
pub use store::ProductStore;
