//! Products table bootstrap.
//!
//! Creates the table if it is missing. Idempotent; there is no versioned
//! migration history.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

/// Create the `products` table on an open pool.
///
/// `sizes` and `tags` hold JSON arrays of strings. `title_lower` is the
/// Unicode-folded title used for case-insensitive lookup. Title and slug
/// carry `UNIQUE` constraints, which the store reports as duplicate keys.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            title_lower TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            description TEXT,
            slug TEXT NOT NULL UNIQUE,
            stock INTEGER NOT NULL DEFAULT 0,
            sizes TEXT NOT NULL,
            gender TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_title_lower ON products(title_lower)")
        .execute(pool)
        .await?;

    Ok(())
}

/// `catalog init`: connect and create the schema.
pub async fn run_init(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    ensure_schema(&pool).await?;
    pool.close().await;
    Ok(())
}
