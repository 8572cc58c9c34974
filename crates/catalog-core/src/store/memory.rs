//! In-memory [`ProductStore`] implementation for tests and embedding.
//!
//! Rows live in a `Vec` behind `std::sync::RwLock`, so listing follows
//! insertion order. Title and slug uniqueness are checked on every write
//! and reported as [`UniqueViolation`].

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Product;

use super::{ProductStore, UniqueViolation};

/// In-memory product store.
pub struct InMemoryStore {
    rows: RwLock<Vec<Product>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Product>>> {
        self.rows.read().map_err(|_| anyhow!("product store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Product>>> {
        self.rows
            .write()
            .map_err(|_| anyhow!("product store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject `product` if another row (different id) already holds its title
/// or slug.
fn check_unique(rows: &[Product], product: &Product) -> Result<()> {
    for other in rows.iter().filter(|r| r.id != product.id) {
        if other.title == product.title {
            return Err(UniqueViolation::new("title", &product.title).into());
        }
        if other.slug == product.slug {
            return Err(UniqueViolation::new("slug", &product.slug).into());
        }
    }
    Ok(())
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn insert(&self, product: &Product) -> Result<()> {
        let mut rows = self.write()?;
        if rows.iter().any(|r| r.id == product.id) {
            return Err(UniqueViolation::new("id", &product.id.to_string()).into());
        }
        check_unique(&rows, product)?;
        rows.push(product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let rows = self.read()?;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<Product>> {
        let rows = self.read()?;
        Ok(rows
            .iter()
            .find(|r| r.title.to_lowercase() == term || r.slug == term)
            .cloned())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Product>> {
        let rows = self.read()?;
        Ok(rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn save(&self, product: &Product) -> Result<()> {
        let mut rows = self.write()?;
        check_unique(&rows, product)?;
        match rows.iter_mut().find(|r| r.id == product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(anyhow!("no product row with id {}", product.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut rows = self.write()?;
        rows.retain(|r| r.id != id);
        Ok(())
    }
}
