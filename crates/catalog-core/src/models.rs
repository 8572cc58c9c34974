//! Core data models for the product catalog.
//!
//! [`Product`] is the stored record. [`CreateProduct`] and
//! [`UpdateProduct`] are the already-validated payloads the service
//! accepts; [`Pagination`] bounds a listing query.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug::normalize_slug;

/// One catalog entry.
///
/// The slug is not normalized at construction time. The service calls
/// [`Product::normalize_slug_on_insert`] or
/// [`Product::normalize_slug_on_update`] right before each write, so a
/// value built in memory may carry a raw slug until it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i64,
    pub sizes: Vec<String>,
    pub gender: String,
    pub tags: Vec<String>,
}

impl Product {
    /// Build a new product from a create payload, assigning a fresh id.
    ///
    /// Absent optional fields take their defaults (price and stock 0,
    /// no tags, no description, empty slug).
    pub fn from_input(input: CreateProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            price: input.price,
            description: input.description,
            slug: input.slug.unwrap_or_default(),
            stock: input.stock,
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags,
        }
    }

    /// Pre-insert hook: seed an empty slug from the title, then normalize.
    pub fn normalize_slug_on_insert(&mut self) {
        if self.slug.is_empty() {
            self.slug = self.title.clone();
        }
        self.slug = normalize_slug(&self.slug);
    }

    /// Pre-update hook: normalize whatever slug is set. Never re-derives
    /// from the title.
    pub fn normalize_slug_on_update(&mut self) {
        self.slug = normalize_slug(&self.slug);
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub stock: i64,
    pub sizes: Vec<String>,
    pub gender: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial payload for updating a product. Absent fields keep their
/// stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateProduct {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i64>,
    pub sizes: Option<Vec<String>>,
    pub gender: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateProduct {
    /// Overlay the present fields onto `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref title) = self.title {
            product.title = title.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(ref description) = self.description {
            product.description = Some(description.clone());
        }
        if let Some(ref slug) = self.slug {
            product.slug = slug.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(ref sizes) = self.sizes {
            product.sizes = sizes.clone();
        }
        if let Some(ref gender) = self.gender {
            product.gender = gender.clone();
        }
        if let Some(ref tags) = self.tags {
            product.tags = tags.clone();
        }
    }
}

/// Listing window: take `limit` entries after skipping `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

pub const DEFAULT_LIMIT: u32 = 10;

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> CreateProduct {
        CreateProduct {
            title: title.to_string(),
            sizes: vec!["M".to_string()],
            gender: "men".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_input_applies_defaults() {
        let p = Product::from_input(input("Red Shoes"));
        assert_eq!(p.price, 0.0);
        assert_eq!(p.stock, 0);
        assert!(p.tags.is_empty());
        assert!(p.description.is_none());
        assert_eq!(p.slug, "");
    }

    #[test]
    fn test_from_input_assigns_distinct_ids() {
        let a = Product::from_input(input("A"));
        let b = Product::from_input(input("B"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_insert_hook_seeds_slug_from_title() {
        let mut p = Product::from_input(input("Red Shoes"));
        p.normalize_slug_on_insert();
        assert_eq!(p.slug, "red_shoes");
    }

    #[test]
    fn test_insert_hook_keeps_explicit_slug() {
        let mut p = Product::from_input(CreateProduct {
            slug: Some("Crimson-Kicks".to_string()),
            ..input("Red Shoes")
        });
        p.normalize_slug_on_insert();
        assert_eq!(p.slug, "crimson_kicks");
    }

    #[test]
    fn test_update_hook_does_not_reseed_from_title() {
        let mut p = Product::from_input(input("Red Shoes"));
        p.normalize_slug_on_insert();
        p.title = "Blue Shoes".to_string();
        p.normalize_slug_on_update();
        assert_eq!(p.slug, "red_shoes");
    }

    #[test]
    fn test_apply_to_overlays_only_present_fields() {
        let mut p = Product::from_input(CreateProduct {
            price: 10.0,
            tags: vec!["shoes".to_string()],
            ..input("Red Shoes")
        });
        let changes = UpdateProduct {
            price: Some(25.5),
            stock: Some(3),
            ..Default::default()
        };
        changes.apply_to(&mut p);
        assert_eq!(p.price, 25.5);
        assert_eq!(p.stock, 3);
        assert_eq!(p.title, "Red Shoes");
        assert_eq!(p.tags, vec!["shoes".to_string()]);
    }

    #[test]
    fn test_create_payload_deserializes_with_defaults() {
        let json = r#"{"title":"Red Shoes","sizes":["S","M"],"gender":"unisex"}"#;
        let parsed: CreateProduct = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price, 0.0);
        assert_eq!(parsed.stock, 0);
        assert!(parsed.tags.is_empty());
        assert!(parsed.slug.is_none());
    }

    #[test]
    fn test_update_payload_may_be_empty() {
        let parsed: UpdateProduct = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, UpdateProduct::default());
    }

    #[test]
    fn test_pagination_default() {
        let page = Pagination::default();
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 0);
    }
}
