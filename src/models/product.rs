use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a product in the catalog.
///
/// Products are never hard-deleted: `is_active` is flipped off instead,
/// so historical order lines keep a valid reference.
#[derive(Clone, Debug, Serialize)]
pub struct Product {
    /// The unique identifier for the product.
    pub id: Uuid,
    /// The product's display name.
    pub name: String,
    /// An optional free-text description.
    pub description: Option<String>,
    /// The unit price in Algerian dinars.
    pub price: i64,
    /// The primary image URL.
    pub image: String,
    /// Additional gallery image URLs.
    pub gallery: Vec<String>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Available colors.
    pub colors: Vec<String>,
    /// Stock count; `None` means stock is untracked.
    pub stock: Option<i32>,
    /// The free-text category label, if any.
    pub category: Option<String>,
    /// Whether the product is visible on the storefront.
    pub is_active: bool,
    /// The timestamp when the product was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the product was last updated.
    pub updated_at: DateTime<Utc>,
}
