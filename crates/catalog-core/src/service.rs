//! Catalog service: create, list, lookup, update, and delete products.
//!
//! The service is stateless. Every operation delegates persistence to a
//! [`ProductStore`] and classifies each store failure into exactly one
//! [`CatalogError`] kind before returning.
//!
//! # Lookup
//!
//! [`ProductService::find_one`] takes a single string that is either a
//! product id or a human-readable key:
//!
//! - a hyphenated RFC 4122 UUID is looked up by id (format check only, the
//!   store is not consulted to decide the branch);
//! - anything else is lower-cased and matched against the lower-cased
//!   title or the stored slug.
//!
//! [`ProductService::remove`] reuses the same lookup, so a product can be
//! deleted by id, title, or slug.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};
use crate::store::ProductStore;

/// Errors surfaced by [`ProductService`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No product matched the id or key. Carries the caller-facing message.
    #[error("{0}")]
    NotFound(String),
    /// The store rejected a write because the title or slug is taken.
    /// Carries the store's constraint detail.
    #[error("{0}")]
    DuplicateKey(String),
    /// Any other store failure. The cause is logged, never exposed.
    #[error("Unexpected error, check server logs.")]
    Internal,
}

/// Interpret `term` as a product id if it is a hyphenated RFC 4122 UUID.
///
/// Besides the 8-4-4-4-12 hex layout, the version nibble must be 1 to 8 and
/// the variant bits must be `10`, so a title that merely has UUID shape
/// (`12345678-1234-0234-0234-123456789abc`) stays a human key. The nil and
/// max UUIDs are accepted as ids.
pub fn parse_product_id(term: &str) -> Option<Uuid> {
    if term.len() != 36 {
        return None;
    }
    let id = Uuid::try_parse(term).ok()?;
    if id.is_nil() || id.as_u128() == u128::MAX {
        return Some(id);
    }
    let versioned = (1..=8).contains(&id.get_version_num());
    (versioned && id.get_variant() == uuid::Variant::RFC4122).then_some(id)
}

/// CRUD operations over a [`ProductStore`].
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Create a product. An absent slug is seeded from the title; the slug
    /// is normalized right before the insert.
    pub async fn create(&self, input: CreateProduct) -> Result<Product, CatalogError> {
        let mut product = Product::from_input(input);
        product.normalize_slug_on_insert();

        self.store
            .insert(&product)
            .await
            .map_err(|e| self.handle_store_error(e))?;

        tracing::debug!(id = %product.id, slug = %product.slug, "product created");
        Ok(product)
    }

    /// List up to `page.limit` products after skipping `page.offset`.
    pub async fn find_all(&self, page: Pagination) -> Result<Vec<Product>, CatalogError> {
        self.store
            .list(page.limit, page.offset)
            .await
            .map_err(|e| self.handle_store_error(e))
    }

    /// Look up one product by id, title (case-insensitive), or slug.
    pub async fn find_one(&self, term: &str) -> Result<Product, CatalogError> {
        let found = match parse_product_id(term) {
            Some(id) => self.store.find_by_id(id).await,
            None => {
                self.store
                    .find_by_title_or_slug(&term.to_lowercase())
                    .await
            }
        }
        .map_err(|e| self.handle_store_error(e))?;

        found.ok_or_else(|| CatalogError::NotFound(format!("Product with {} not found", term)))
    }

    /// Merge `changes` onto the product with `id` and persist it.
    ///
    /// The slug is re-normalized but never re-derived from a new title.
    pub async fn update(&self, id: Uuid, changes: UpdateProduct) -> Result<Product, CatalogError> {
        let mut product = self
            .store
            .preload(id, &changes)
            .await
            .map_err(|e| self.handle_store_error(e))?
            .ok_or_else(|| CatalogError::NotFound(format!("Product with id: {} not found", id)))?;

        product.normalize_slug_on_update();

        self.store
            .save(&product)
            .await
            .map_err(|e| self.handle_store_error(e))?;

        tracing::debug!(id = %product.id, "product updated");
        Ok(product)
    }

    /// Delete the product matched by [`find_one`](Self::find_one).
    pub async fn remove(&self, term: &str) -> Result<(), CatalogError> {
        let product = self.find_one(term).await?;

        self.store
            .delete(product.id)
            .await
            .map_err(|e| self.handle_store_error(e))?;

        tracing::debug!(id = %product.id, "product removed");
        Ok(())
    }

    fn handle_store_error(&self, err: anyhow::Error) -> CatalogError {
        if let Some(detail) = self.store.unique_violation_detail(&err) {
            return CatalogError::DuplicateKey(detail);
        }

        tracing::error!(error = ?err, "unexpected product store failure");
        CatalogError::Internal
    }
}
