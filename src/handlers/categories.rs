use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    services::catalog,
    state::AppState,
};

/// The request payload for creating a category.
#[derive(Deserialize, Debug)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Lists the category labels in use by active products.
#[axum::debug_handler]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response> {
    let categories = catalog::list_categories(&state).await?;
    Ok((StatusCode::OK, Json(categories)).into_response())
}

/// "Creates" a category.
///
/// Categories are derived from product labels, so this only validates the
/// name; nothing is stored until a product carries it.
#[axum::debug_handler]
pub async fn create_category(
    State(_state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Response> {
    let name = catalog::create_category(&req.name)?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "name": name,
        "message": "Category accepted; it appears once a product uses it"
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::CREATED, response).into_response())
}

/// Deletes a category by clearing its label from every product.
#[axum::debug_handler]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response> {
    let cleared = catalog::delete_category(&state, &name).await?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "success": true,
        "cleared": cleared
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::OK, response).into_response())
}
