use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Represents a delivery zone (an Algerian wilaya) and its flat fee.
#[derive(Clone, Debug, Serialize)]
pub struct DeliveryZone {
    /// The unique identifier for the zone.
    pub id: Uuid,
    /// The two-digit wilaya code, e.g. "16".
    pub code: String,
    /// The wilaya's display name, e.g. "Alger".
    pub name: String,
    /// The current flat delivery fee in Algerian dinars.
    pub delivery_fee: i64,
    /// The timestamp when the fee was last updated.
    pub updated_at: DateTime<Utc>,
}
