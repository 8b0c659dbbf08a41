use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::admin::Admin,
};

/// A helper function to map a `tokio_postgres::Row` to an `Admin`.
fn row_to_admin(row: &Row) -> Result<Admin> {
    Ok(Admin {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        email: row.try_get("email").map_err(|_| AppError::MissingData("email".to_string()))?,
        password: row.try_get("password").map_err(|_| AppError::MissingData("password".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Creates a new admin account.
pub async fn create_admin(
    pool: &Pool,
    id: Uuid,
    email: &str,
    password_hash: &str,
) -> Result<Admin> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO admins (id, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, created_at
            "#,
            &[&id, &email, &password_hash],
        )
        .await?;
    row_to_admin(&row)
}

/// Finds an admin by email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<Admin>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, email, password, created_at
            FROM admins
            WHERE email = $1
            "#,
            &[&email],
        )
        .await?;
    row.map(|r| row_to_admin(&r)).transpose()
}

/// Finds an admin by ID.
pub async fn find_by_id(pool: &Pool, admin_id: &Uuid) -> Result<Option<Admin>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, email, password, created_at
            FROM admins
            WHERE id = $1
            "#,
            &[admin_id],
        )
        .await?;
    row.map(|r| row_to_admin(&r)).transpose()
}

/// Counts admin accounts.
pub async fn count_admins(pool: &Pool) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one("SELECT COUNT(*) AS count FROM admins", &[])
        .await?;
    Ok(row.try_get("count")?)
}
