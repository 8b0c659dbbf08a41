use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of order statuses.
///
/// Any status may follow any other; the admin workflow is deliberately
/// unconstrained within this enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns the status as the string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its stored string form.
    ///
    /// # Arguments
    ///
    /// * `s` - The status string.
    ///
    /// # Returns
    ///
    /// `Some(status)` for a known value, `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// Represents a placed order.
///
/// `subtotal`, `delivery_fee` and `total` are snapshots taken at creation
/// time; later product price or zone fee changes never touch them.
#[derive(Clone, Debug, Serialize)]
pub struct Order {
    /// The unique identifier for the order.
    pub id: Uuid,
    /// The customer's name.
    pub customer_name: String,
    /// The customer's phone number.
    pub customer_phone: String,
    /// The delivery zone the order ships to.
    pub zone_id: Uuid,
    /// An optional free-text delivery address.
    pub address: Option<String>,
    /// The sum of line prices in Algerian dinars.
    pub subtotal: i64,
    /// The delivery fee captured at order time.
    pub delivery_fee: i64,
    /// `subtotal + delivery_fee`.
    pub total: i64,
    /// The current order status.
    pub status: OrderStatus,
    /// The timestamp when the order was placed.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Represents one line of an order.
///
/// `unit_price` is the product's price at order time, copied so that later
/// catalog edits do not rewrite history.
#[derive(Clone, Debug, Serialize)]
pub struct OrderLine {
    /// The unique identifier for the line.
    pub id: Uuid,
    /// The order this line belongs to.
    pub order_id: Uuid,
    /// The product this line references.
    pub product_id: Uuid,
    /// The ordered quantity.
    pub quantity: i32,
    /// The unit price in Algerian dinars, captured at order time.
    pub unit_price: i64,
}

/// A resolved order line ready to be written: price already snapshotted
/// from the catalog, never taken from the client.
#[derive(Clone, Debug)]
pub struct NewOrderLine {
    /// The product this line references.
    pub product_id: Uuid,
    /// The ordered quantity.
    pub quantity: i32,
    /// The unit price in Algerian dinars at order time.
    pub unit_price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_status() {
        for s in ["pending", "confirmed", "shipped", "delivered", "cancelled"] {
            let status = OrderStatus::parse(s).unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(OrderStatus::parse("refunded").is_none());
        assert!(OrderStatus::parse("Pending").is_none());
        assert!(OrderStatus::parse("").is_none());
    }
}
