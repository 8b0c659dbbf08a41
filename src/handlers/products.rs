use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    repositories::product as product_repo,
    services::catalog::{self, NewProduct, ProductPatch},
    state::AppState,
    validation::products::*,
};

/// The request payload for creating a product.
#[derive(Deserialize, Debug)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub stock: Option<i32>,
    pub category: Option<String>,
}

/// The request payload for partially updating a product.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProductRequest {
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

/// Lists active products for the storefront, newest first.
#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<Response> {
    let products = product_repo::list_active(&state.db).await?;
    Ok((StatusCode::OK, Json(products)).into_response())
}

/// Gets one product by ID, active or not.
#[axum::debug_handler]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Response> {
    let product = product_repo::find_by_id(&state.db, &product_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// Creates a new product.
#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<Response> {
    validate_name(&req.name)?;
    validate_price(req.price)?;
    validate_image(&req.image)?;
    validate_stock(req.stock)?;

    let product = catalog::create_product(
        &state,
        NewProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            image: req.image,
            gallery: req.gallery,
            sizes: req.sizes,
            colors: req.colors,
            stock: req.stock,
            category: req.category,
        },
    )
    .await?;

    tracing::info!("✅ Product created: {}", product.id);
    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// Partially updates a product.
#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Response> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(ref image) = req.image {
        validate_image(image)?;
    }
    validate_stock(req.stock)?;

    let product = catalog::update_product(
        &state,
        product_id,
        ProductPatch {
            name: req.name,
            description: req.description,
            price: req.price,
            image: req.image,
            gallery: req.gallery,
            sizes: req.sizes,
            colors: req.colors,
            stock: req.stock,
            category: req.category,
        },
    )
    .await?;

    tracing::info!("✅ Product updated: {}", product.id);
    Ok((StatusCode::OK, Json(product)).into_response())
}

/// Soft-deletes a product.
#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Response> {
    catalog::soft_delete_product(&state, product_id).await?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "success": true,
        "message": "Product deactivated"
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::OK, response).into_response())
}
