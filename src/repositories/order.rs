use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::order::{NewOrderLine, Order, OrderLine, OrderStatus},
};

/// A helper function to map a `tokio_postgres::Row` to an `Order`.
fn row_to_order(row: &Row) -> Result<Order> {
    let status_str: String = row
        .try_get("status")
        .map_err(|_| AppError::MissingData("status".to_string()))?;
    let status = OrderStatus::parse(&status_str)
        .ok_or_else(|| AppError::MissingData(format!("unknown status '{}'", status_str)))?;

    Ok(Order {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        customer_name: row.try_get("customer_name").map_err(|_| AppError::MissingData("customer_name".to_string()))?,
        customer_phone: row.try_get("customer_phone").map_err(|_| AppError::MissingData("customer_phone".to_string()))?,
        zone_id: row.try_get("zone_id").map_err(|_| AppError::MissingData("zone_id".to_string()))?,
        address: row.try_get("address").map_err(|_| AppError::MissingData("address".to_string()))?,
        subtotal: row.try_get("subtotal").map_err(|_| AppError::MissingData("subtotal".to_string()))?,
        delivery_fee: row.try_get("delivery_fee").map_err(|_| AppError::MissingData("delivery_fee".to_string()))?,
        total: row.try_get("total").map_err(|_| AppError::MissingData("total".to_string()))?,
        status,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
        updated_at: row.try_get("updated_at").map_err(|_| AppError::MissingData("updated_at".to_string()))?,
    })
}

/// A helper function to map a `tokio_postgres::Row` to an `OrderLine`.
fn row_to_order_line(row: &Row) -> Result<OrderLine> {
    Ok(OrderLine {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        order_id: row.try_get("order_id").map_err(|_| AppError::MissingData("order_id".to_string()))?,
        product_id: row.try_get("product_id").map_err(|_| AppError::MissingData("product_id".to_string()))?,
        quantity: row.try_get("quantity").map_err(|_| AppError::MissingData("quantity".to_string()))?,
        unit_price: row.try_get("unit_price").map_err(|_| AppError::MissingData("unit_price".to_string()))?,
    })
}

/// Creates an order and its lines in a single transaction.
///
/// Either every row commits or none does; a failure on any line insert
/// rolls the order back, so a half-written order can never be observed.
#[allow(clippy::too_many_arguments)]
pub async fn create_order(
    pool: &Pool,
    id: Uuid,
    customer_name: String,
    customer_phone: String,
    zone_id: Uuid,
    address: Option<String>,
    subtotal: i64,
    delivery_fee: i64,
    total: i64,
    lines: &[NewOrderLine],
) -> Result<Order> {
    let mut client = pool.get().await?;
    let tx = client.transaction().await?;

    let row = tx
        .query_one(
            r#"
            INSERT INTO orders (id, customer_name, customer_phone, zone_id, address,
                                subtotal, delivery_fee, total, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending')
            RETURNING id, customer_name, customer_phone, zone_id, address,
                      subtotal, delivery_fee, total, status, created_at, updated_at
            "#,
            &[
                &id, &customer_name, &customer_phone, &zone_id, &address, &subtotal,
                &delivery_fee, &total,
            ],
        )
        .await?;

    let stmt = tx
        .prepare(
            r#"
            INSERT INTO order_lines (id, order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .await?;

    for line in lines {
        tx.execute(
            &stmt,
            &[
                &Uuid::new_v4(),
                &id,
                &line.product_id,
                &line.quantity,
                &line.unit_price,
            ],
        )
        .await?;
    }

    tx.commit().await?;
    row_to_order(&row)
}

/// Lists all orders, newest first.
pub async fn list_orders(pool: &Pool) -> Result<Vec<Order>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, customer_name, customer_phone, zone_id, address,
                   subtotal, delivery_fee, total, status, created_at, updated_at
            FROM orders
            ORDER BY created_at DESC
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_order).collect()
}

/// Finds an order by its ID.
pub async fn find_by_id(pool: &Pool, order_id: &Uuid) -> Result<Option<Order>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, customer_name, customer_phone, zone_id, address,
                   subtotal, delivery_fee, total, status, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
            &[order_id],
        )
        .await?;
    row.map(|r| row_to_order(&r)).transpose()
}

/// Lists the lines belonging to an order.
pub async fn list_lines(pool: &Pool, order_id: &Uuid) -> Result<Vec<OrderLine>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_lines
            WHERE order_id = $1
            "#,
            &[order_id],
        )
        .await?;
    rows.iter().map(row_to_order_line).collect()
}

/// Updates an order's status.
///
/// Returns `None` when the order does not exist. The status value must
/// already have been parsed against the fixed enumeration by the caller.
pub async fn update_status(
    pool: &Pool,
    order_id: &Uuid,
    status: OrderStatus,
) -> Result<Option<Order>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, customer_name, customer_phone, zone_id, address,
                      subtotal, delivery_fee, total, status, created_at, updated_at
            "#,
            &[order_id, &status.as_str()],
        )
        .await?;
    row.map(|r| row_to_order(&r)).transpose()
}

/// Counts all orders.
pub async fn count_orders(pool: &Pool) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one("SELECT COUNT(*) AS count FROM orders", &[])
        .await?;
    Ok(row.try_get("count")?)
}

/// Counts orders in a given status.
pub async fn count_by_status(pool: &Pool, status: OrderStatus) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            "SELECT COUNT(*) AS count FROM orders WHERE status = $1",
            &[&status.as_str()],
        )
        .await?;
    Ok(row.try_get("count")?)
}

/// Sums the totals of delivered orders.
pub async fn delivered_revenue(pool: &Pool) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            "SELECT COALESCE(SUM(total), 0)::BIGINT AS revenue FROM orders WHERE status = 'delivered'",
            &[],
        )
        .await?;
    Ok(row.try_get("revenue")?)
}
