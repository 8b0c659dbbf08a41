use serde::Deserialize;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::order::{NewOrderLine, Order},
    repositories::{order as order_repo, product as product_repo, zone as zone_repo},
    state::AppState,
};

/// One requested cart entry: a product reference and a quantity.
///
/// The client never supplies a price; pricing is resolved from the
/// catalog at placement time.
#[derive(Deserialize, Debug, Clone)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Computes an order subtotal from its resolved lines.
///
/// Fails with a validation error when the sum would overflow `i64`; an
/// order that large is a bad request, not a panic.
pub fn compute_subtotal(lines: &[NewOrderLine]) -> Result<i64> {
    let mut subtotal: i64 = 0;
    for line in lines {
        let line_total = line
            .unit_price
            .checked_mul(i64::from(line.quantity))
            .ok_or_else(|| AppError::Validation("Order amount is too large".to_string()))?;
        subtotal = subtotal
            .checked_add(line_total)
            .ok_or_else(|| AppError::Validation("Order amount is too large".to_string()))?;
    }
    Ok(subtotal)
}

/// Places an order: resolves the zone and every product, snapshots
/// current prices and the current delivery fee, and writes the order with
/// its lines as one transaction.
///
/// Stock is not checked or decremented here; fulfilment is manual and
/// stock counts are informational.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `customer_name` - The customer's name.
/// * `customer_phone` - The customer's phone number.
/// * `zone_id` - The delivery zone the order ships to.
/// * `address` - An optional free-text delivery address.
/// * `items` - The requested cart entries.
///
/// # Returns
///
/// A `Result` containing the created `Order`.
pub async fn place_order(
    state: &AppState,
    customer_name: String,
    customer_phone: String,
    zone_id: Uuid,
    address: Option<String>,
    items: &[CartItem],
) -> Result<Order> {
    if items.is_empty() {
        return Err(AppError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }

    let zone = zone_repo::find_by_id(&state.db, &zone_id)
        .await?
        .ok_or_else(|| AppError::Validation("Unknown delivery zone".to_string()))?;

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let product = product_repo::find_by_id(&state.db, &item.product_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown product: {}", item.product_id))
            })?;

        lines.push(NewOrderLine {
            product_id: product.id,
            quantity: item.quantity,
            unit_price: product.price,
        });
    }

    let subtotal = compute_subtotal(&lines)?;
    let total = subtotal
        .checked_add(zone.delivery_fee)
        .ok_or_else(|| AppError::Validation("Order amount is too large".to_string()))?;
    let order_id = Uuid::new_v4();

    tracing::debug!(
        "🧾 Placing order {}: {} lines, subtotal {}, fee {}, total {}",
        order_id,
        lines.len(),
        subtotal,
        zone.delivery_fee,
        total
    );

    let order = order_repo::create_order(
        &state.db,
        order_id,
        customer_name,
        customer_phone,
        zone.id,
        address,
        subtotal,
        zone.delivery_fee,
        total,
        &lines,
    )
    .await?;

    tracing::info!("✅ Order placed: {} (total {})", order.id, order.total);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: i64, quantity: i32) -> NewOrderLine {
        NewOrderLine {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price: price,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        // Two t-shirts at 1500 DZD plus one at 2500 DZD.
        let lines = vec![line(1500, 2), line(2500, 1)];
        assert_eq!(compute_subtotal(&lines).unwrap(), 5500);
    }

    #[test]
    fn subtotal_of_no_lines_is_zero() {
        assert_eq!(compute_subtotal(&[]).unwrap(), 0);
    }

    #[test]
    fn total_adds_delivery_fee() {
        let lines = vec![line(1500, 2), line(2500, 1)];
        let subtotal = compute_subtotal(&lines).unwrap();
        let delivery_fee = 300; // zone 16 - Alger
        assert_eq!(subtotal + delivery_fee, 5800);
    }

    #[test]
    fn overflowing_line_is_rejected() {
        let lines = vec![line(i64::MAX, 2)];
        assert!(compute_subtotal(&lines).is_err());
    }

    #[test]
    fn overflowing_sum_is_rejected() {
        let lines = vec![line(i64::MAX, 1), line(1500, 1)];
        assert!(compute_subtotal(&lines).is_err());
    }
}
