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
    repositories::zone as zone_repo,
    state::AppState,
};

/// The request payload for updating a zone's delivery fee.
#[derive(Deserialize, Debug)]
pub struct UpdateFeeRequest {
    pub delivery_fee: i64,
}

/// Lists all delivery zones ordered by wilaya code.
#[axum::debug_handler]
pub async fn list_zones(State(state): State<AppState>) -> Result<Response> {
    let zones = zone_repo::list_zones(&state.db).await?;
    Ok((StatusCode::OK, Json(zones)).into_response())
}

/// Updates a zone's delivery fee.
///
/// A negative fee is rejected before any write, so the stored fee is
/// untouched on failure.
#[axum::debug_handler]
pub async fn update_zone_fee(
    State(state): State<AppState>,
    Path(zone_id): Path<Uuid>,
    Json(req): Json<UpdateFeeRequest>,
) -> Result<Response> {
    if req.delivery_fee < 0 {
        return Err(AppError::Validation(
            "Delivery fee cannot be negative".to_string(),
        ));
    }

    let zone = zone_repo::update_fee(&state.db, &zone_id, req.delivery_fee)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!("✅ Zone {} fee set to {}", zone.code, zone.delivery_fee);
    Ok((StatusCode::OK, Json(zone)).into_response())
}
