//! SQLite-backed [`ProductStore`] implementation.
//!
//! Maps each store operation to a single statement against the
//! `products` table created by [`crate::schema::ensure_schema`].
//!
//! SQLite's `LOWER()` folds ASCII only, so the lower-cased title is
//! computed in Rust on every write and kept in `title_lower`.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use catalog_core::models::Product;
use catalog_core::store::ProductStore;

const COLUMNS: &str = "id, title, price, description, slug, stock, sizes, gender, tags";

/// SQLite implementation of the [`ProductStore`] trait.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_product(row: &SqliteRow) -> Result<Product> {
    let id: String = row.try_get("id")?;
    let sizes: String = row.try_get("sizes")?;
    let tags: String = row.try_get("tags")?;

    Ok(Product {
        id: Uuid::parse_str(&id).with_context(|| format!("invalid product id in database: {}", id))?,
        title: row.try_get("title")?,
        price: row.try_get("price")?,
        description: row.try_get("description")?,
        slug: row.try_get("slug")?,
        stock: row.try_get("stock")?,
        sizes: serde_json::from_str(&sizes).context("invalid sizes column")?,
        gender: row.try_get("gender")?,
        tags: serde_json::from_str(&tags).context("invalid tags column")?,
    })
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, title, title_lower, price, description, slug, stock, sizes, gender, tags)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.title)
        .bind(product.title.to_lowercase())
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.stock)
        .bind(serde_json::to_string(&product.sizes)?)
        .bind(&product.gender)
        .bind(serde_json::to_string(&product.tags)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("SELECT {} FROM products WHERE id = ?", COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn find_by_title_or_slug(&self, term: &str) -> Result<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE title_lower = ? OR slug = ? ORDER BY rowid LIMIT 1",
            COLUMNS
        ))
        .bind(term)
        .bind(term)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY rowid LIMIT ? OFFSET ?",
            COLUMNS
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn save(&self, product: &Product) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                title = ?, title_lower = ?, price = ?, description = ?, slug = ?,
                stock = ?, sizes = ?, gender = ?, tags = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.title)
        .bind(product.title.to_lowercase())
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.stock)
        .bind(serde_json::to_string(&product.sizes)?)
        .bind(&product.gender)
        .bind(serde_json::to_string(&product.tags)?)
        .bind(product.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            bail!("no product row with id {}", product.id);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn unique_violation_detail(&self, err: &anyhow::Error) -> Option<String> {
        match err.downcast_ref::<sqlx::Error>() {
            Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Some(db_err.message().to_string())
            }
            _ => None,
        }
    }
}
