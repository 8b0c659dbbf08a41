use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::zone::DeliveryZone,
};

/// A helper function to map a `tokio_postgres::Row` to a `DeliveryZone`.
fn row_to_zone(row: &Row) -> Result<DeliveryZone> {
    Ok(DeliveryZone {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        code: row.try_get("code").map_err(|_| AppError::MissingData("code".to_string()))?,
        name: row.try_get("name").map_err(|_| AppError::MissingData("name".to_string()))?,
        delivery_fee: row.try_get("delivery_fee").map_err(|_| AppError::MissingData("delivery_fee".to_string()))?,
        updated_at: row.try_get("updated_at").map_err(|_| AppError::MissingData("updated_at".to_string()))?,
    })
}

/// Lists all delivery zones ordered by wilaya code.
pub async fn list_zones(pool: &Pool) -> Result<Vec<DeliveryZone>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, code, name, delivery_fee, updated_at
            FROM delivery_zones
            ORDER BY code ASC
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_zone).collect()
}

/// Finds a delivery zone by its ID.
pub async fn find_by_id(pool: &Pool, zone_id: &Uuid) -> Result<Option<DeliveryZone>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, code, name, delivery_fee, updated_at
            FROM delivery_zones
            WHERE id = $1
            "#,
            &[zone_id],
        )
        .await?;
    row.map(|r| row_to_zone(&r)).transpose()
}

/// Updates a zone's delivery fee.
///
/// Returns `None` when the zone does not exist. The fee must already have
/// been validated as non-negative by the caller.
pub async fn update_fee(pool: &Pool, zone_id: &Uuid, fee: i64) -> Result<Option<DeliveryZone>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE delivery_zones
            SET delivery_fee = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, code, name, delivery_fee, updated_at
            "#,
            &[zone_id, &fee],
        )
        .await?;
    row.map(|r| row_to_zone(&r)).transpose()
}
