use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::product::Product,
    repositories::product as product_repo,
    state::AppState,
};

/// The fields accepted when creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: String,
    pub gallery: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: Option<i32>,
    pub category: Option<String>,
}

/// The fields accepted when partially updating a product.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub stock: Option<i32>,
    pub category: Option<String>,
}

/// Normalizes a category label: trims whitespace, maps empty to `None`.
///
/// Case variants are left alone on purpose; "Tees" and "tees" stay two
/// distinct categories.
fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Creates a new product.
pub async fn create_product(state: &AppState, new: NewProduct) -> Result<Product> {
    product_repo::create_product(
        &state.db,
        Uuid::new_v4(),
        new.name,
        new.description,
        new.price,
        new.image,
        new.gallery,
        new.sizes,
        new.colors,
        new.stock,
        normalize_category(new.category),
    )
    .await
}

/// Partially updates a product.
pub async fn update_product(
    state: &AppState,
    product_id: Uuid,
    patch: ProductPatch,
) -> Result<Product> {
    product_repo::update_product(
        &state.db,
        &product_id,
        patch.name,
        patch.description,
        patch.price,
        patch.image,
        patch.gallery,
        patch.sizes,
        patch.colors,
        patch.stock,
        patch.category.and_then(|c| normalize_category(Some(c))),
    )
    .await?
    .ok_or(AppError::NotFound)
}

/// Soft-deletes a product.
pub async fn soft_delete_product(state: &AppState, product_id: Uuid) -> Result<()> {
    if !product_repo::soft_delete(&state.db, &product_id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!("🗑️ Product deactivated: {}", product_id);
    Ok(())
}

/// Lists the category labels currently in use by active products.
pub async fn list_categories(state: &AppState) -> Result<Vec<String>> {
    product_repo::list_categories(&state.db).await
}

/// "Creates" a category.
///
/// Categories are derived labels, not stored rows, so creation is only a
/// validation step; the label becomes visible once a product carries it.
pub fn create_category(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Deletes a category by clearing its label from every product carrying it.
pub async fn delete_category(state: &AppState, name: &str) -> Result<u64> {
    let cleared = product_repo::clear_category(&state.db, name.trim()).await?;
    if cleared == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!("🗑️ Category '{}' cleared from {} products", name, cleared);
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_are_trimmed() {
        assert_eq!(
            normalize_category(Some("  Oversize  ".to_string())),
            Some("Oversize".to_string())
        );
    }

    #[test]
    fn blank_category_becomes_none() {
        assert_eq!(normalize_category(Some("   ".to_string())), None);
        assert_eq!(normalize_category(None), None);
    }

    #[test]
    fn case_variants_stay_distinct() {
        assert_ne!(
            normalize_category(Some("Tees".to_string())),
            normalize_category(Some("tees".to_string()))
        );
    }

    #[test]
    fn create_category_rejects_empty_name() {
        assert!(create_category("").is_err());
        assert!(create_category("   ").is_err());
        assert_eq!(create_category(" Graphic ").unwrap(), "Graphic");
    }
}
