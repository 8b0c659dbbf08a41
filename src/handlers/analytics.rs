use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    error::{AppError, Result},
    models::order::OrderStatus,
    repositories::{order as order_repo, product as product_repo},
    state::AppState,
};

/// Returns the admin dashboard summary: counts plus revenue from
/// delivered orders only.
#[axum::debug_handler]
pub async fn summary(State(state): State<AppState>) -> Result<Response> {
    let total_orders = order_repo::count_orders(&state.db).await?;
    let pending_orders = order_repo::count_by_status(&state.db, OrderStatus::Pending).await?;
    let delivered_orders =
        order_repo::count_by_status(&state.db, OrderStatus::Delivered).await?;
    let revenue = order_repo::delivered_revenue(&state.db).await?;
    let total_products = product_repo::count_products(&state.db).await?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "total_orders": total_orders,
        "pending_orders": pending_orders,
        "delivered_orders": delivered_orders,
        "revenue": revenue,
        "total_products": total_products
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::OK, response).into_response())
}
