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
    models::order::OrderStatus,
    repositories::order as order_repo,
    services::orders::{self as order_service, CartItem},
    state::AppState,
    validation::orders::*,
};

/// The request payload for placing an order.
#[derive(Deserialize, Debug)]
pub struct PlaceOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub zone_id: Uuid,
    pub address: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// The request payload for updating an order's status.
#[derive(Deserialize, Debug)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Places a new order from the storefront.
#[axum::debug_handler]
pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Response> {
    validate_customer_name(&req.customer_name)?;
    validate_customer_phone(&req.customer_phone)?;
    validate_items(&req.items)?;

    let order = order_service::place_order(
        &state,
        req.customer_name,
        req.customer_phone,
        req.zone_id,
        req.address,
        &req.items,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(order)).into_response())
}

/// Lists all orders for the admin panel, newest first.
#[axum::debug_handler]
pub async fn list_orders(State(state): State<AppState>) -> Result<Response> {
    let orders = order_repo::list_orders(&state.db).await?;
    Ok((StatusCode::OK, Json(orders)).into_response())
}

/// Gets one order with its lines.
#[axum::debug_handler]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Response> {
    let order = order_repo::find_by_id(&state.db, &order_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let lines = order_repo::list_lines(&state.db, &order_id).await?;

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "id": order.id.to_string(),
        "customer_name": order.customer_name,
        "customer_phone": order.customer_phone,
        "zone_id": order.zone_id.to_string(),
        "address": order.address,
        "subtotal": order.subtotal,
        "delivery_fee": order.delivery_fee,
        "total": order.total,
        "status": order.status.as_str(),
        "created_at": order.created_at.to_rfc3339(),
        "lines": lines
            .iter()
            .map(|l| {
                sonic_rs::json!({
                    "product_id": l.product_id.to_string(),
                    "quantity": l.quantity,
                    "unit_price": l.unit_price
                })
            })
            .collect::<Vec<_>>()
    }))
    .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;

    Ok((StatusCode::OK, response).into_response())
}

/// Updates an order's status.
///
/// Any status in the fixed enumeration may follow any other; values
/// outside it are rejected before the write.
#[axum::debug_handler]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Response> {
    let status = OrderStatus::parse(&req.status).ok_or_else(|| {
        AppError::Validation(format!("Unknown order status: '{}'", req.status))
    })?;

    let order = order_repo::update_status(&state.db, &order_id, status)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!("✅ Order {} status set to {}", order.id, order.status.as_str());
    Ok((StatusCode::OK, Json(order)).into_response())
}
