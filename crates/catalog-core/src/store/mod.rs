//! Storage abstraction for the product catalog.
//!
//! The [`ProductStore`] trait is everything the catalog service needs from
//! a backend (SQLite, in-memory). Implementations own durable state and
//! arbitrate uniqueness of `title` and `slug`; the service holds none.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Product, UpdateProduct};

/// Portable uniqueness-violation error.
///
/// Backends that enforce uniqueness themselves return this (wrapped in
/// `anyhow::Error`); the default [`ProductStore::unique_violation_detail`]
/// recognises it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{detail}")]
pub struct UniqueViolation {
    pub detail: String,
}

impl UniqueViolation {
    pub fn new(column: &str, value: &str) -> Self {
        Self {
            detail: format!("Key ({})=({}) already exists.", column, value),
        }
    }
}

/// Abstract storage backend for catalog entries.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`insert`](ProductStore::insert) | Persist a new row atomically |
/// | [`find_by_id`](ProductStore::find_by_id) | Lookup by primary key |
/// | [`find_by_title_or_slug`](ProductStore::find_by_title_or_slug) | `lower(title) = term OR slug = term` |
/// | [`list`](ProductStore::list) | Skip/take window in storage order |
/// | [`preload`](ProductStore::preload) | Fetch a row and overlay partial changes |
/// | [`save`](ProductStore::save) | Replace an existing row atomically |
/// | [`delete`](ProductStore::delete) | Remove a row permanently |
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product. Fails with a uniqueness violation when the
    /// title or slug is already taken.
    async fn insert(&self, product: &Product) -> Result<()>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;

    /// Find the first product whose lower-cased title equals `term` or
    /// whose slug equals `term`. `term` is expected to be lower-cased
    /// by the caller.
    async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<Product>>;

    /// Return up to `limit` products after skipping `offset`, in the
    /// backend's natural (insertion) order.
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Product>>;

    /// Overwrite the stored row with the same id.
    async fn save(&self, product: &Product) -> Result<()>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Fetch the row for `id` and overlay `changes` onto it, without
    /// writing. Returns `None` when no row exists.
    async fn preload(&self, id: Uuid, changes: &UpdateProduct) -> Result<Option<Product>> {
        let mut product = match self.find_by_id(id).await? {
            Some(p) => p,
            None => return Ok(None),
        };
        changes.apply_to(&mut product);
        Ok(Some(product))
    }

    /// Classify an error returned by this store.
    ///
    /// Returns the human-readable constraint detail when `err` is a
    /// uniqueness violation, `None` for every other failure.
    fn unique_violation_detail(&self, err: &anyhow::Error) -> Option<String> {
        err.downcast_ref::<UniqueViolation>()
            .map(|v| v.detail.clone())
    }
}
