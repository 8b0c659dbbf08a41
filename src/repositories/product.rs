use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;
use crate::{
    error::{AppError, Result},
    models::product::Product,
};

/// A helper function to map a `tokio_postgres::Row` to a `Product`.
fn row_to_product(row: &Row) -> Result<Product> {
    Ok(Product {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        name: row.try_get("name").map_err(|_| AppError::MissingData("name".to_string()))?,
        description: row.try_get("description").map_err(|_| AppError::MissingData("description".to_string()))?,
        price: row.try_get("price").map_err(|_| AppError::MissingData("price".to_string()))?,
        image: row.try_get("image").map_err(|_| AppError::MissingData("image".to_string()))?,
        gallery: row.try_get("gallery").map_err(|_| AppError::MissingData("gallery".to_string()))?,
        sizes: row.try_get("sizes").map_err(|_| AppError::MissingData("sizes".to_string()))?,
        colors: row.try_get("colors").map_err(|_| AppError::MissingData("colors".to_string()))?,
        stock: row.try_get("stock").map_err(|_| AppError::MissingData("stock".to_string()))?,
        category: row.try_get("category").map_err(|_| AppError::MissingData("category".to_string()))?,
        is_active: row.try_get("is_active").map_err(|_| AppError::MissingData("is_active".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
        updated_at: row.try_get("updated_at").map_err(|_| AppError::MissingData("updated_at".to_string()))?,
    })
}

/// Lists active products, most recently created first.
pub async fn list_active(pool: &Pool) -> Result<Vec<Product>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, name, description, price, image, gallery, sizes, colors,
                   stock, category, is_active, created_at, updated_at
            FROM products
            WHERE is_active = true
            ORDER BY created_at DESC
            "#,
            &[],
        )
        .await?;
    rows.iter().map(row_to_product).collect()
}

/// Finds a product by its ID, active or not.
///
/// Inactive products stay reachable here so historical orders can still
/// render their lines.
pub async fn find_by_id(pool: &Pool, product_id: &Uuid) -> Result<Option<Product>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            SELECT id, name, description, price, image, gallery, sizes, colors,
                   stock, category, is_active, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
            &[product_id],
        )
        .await?;
    row.map(|r| row_to_product(&r)).transpose()
}

/// Creates a new product.
#[allow(clippy::too_many_arguments)]
pub async fn create_product(
    pool: &Pool,
    id: Uuid,
    name: String,
    description: Option<String>,
    price: i64,
    image: String,
    gallery: Vec<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    stock: Option<i32>,
    category: Option<String>,
) -> Result<Product> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO products (id, name, description, price, image, gallery, sizes, colors, stock, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, description, price, image, gallery, sizes, colors,
                      stock, category, is_active, created_at, updated_at
            "#,
            &[
                &id, &name, &description, &price, &image, &gallery, &sizes, &colors, &stock,
                &category,
            ],
        )
        .await?;
    row_to_product(&row)
}

/// Partially updates a product; `None` fields keep their current value.
///
/// Returns `None` when the product does not exist.
#[allow(clippy::too_many_arguments)]
pub async fn update_product(
    pool: &Pool,
    product_id: &Uuid,
    name: Option<String>,
    description: Option<String>,
    price: Option<i64>,
    image: Option<String>,
    gallery: Option<Vec<String>>,
    sizes: Option<Vec<String>>,
    colors: Option<Vec<String>>,
    stock: Option<i32>,
    category: Option<String>,
) -> Result<Option<Product>> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image = COALESCE($5, image),
                gallery = COALESCE($6, gallery),
                sizes = COALESCE($7, sizes),
                colors = COALESCE($8, colors),
                stock = COALESCE($9, stock),
                category = COALESCE($10, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, image, gallery, sizes, colors,
                      stock, category, is_active, created_at, updated_at
            "#,
            &[
                product_id, &name, &description, &price, &image, &gallery, &sizes, &colors,
                &stock, &category,
            ],
        )
        .await?;
    row.map(|r| row_to_product(&r)).transpose()
}

/// Soft-deletes a product by clearing its active flag.
///
/// Returns `false` when the product does not exist.
pub async fn soft_delete(pool: &Pool, product_id: &Uuid) -> Result<bool> {
    let client = pool.get().await?;
    let updated = client
        .execute(
            r#"
            UPDATE products
            SET is_active = false, updated_at = NOW()
            WHERE id = $1
            "#,
            &[product_id],
        )
        .await?;
    Ok(updated > 0)
}

/// Lists the distinct non-empty category labels carried by active products.
pub async fn list_categories(pool: &Pool) -> Result<Vec<String>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT DISTINCT category
            FROM products
            WHERE is_active = true AND category IS NOT NULL AND category <> ''
            ORDER BY category ASC
            "#,
            &[],
        )
        .await?;
    rows.iter()
        .map(|r| {
            r.try_get("category")
                .map_err(|_| AppError::MissingData("category".to_string()))
        })
        .collect()
}

/// Clears a category label from every product carrying it.
///
/// Categories are not stored entities, so "deleting" one is this bulk
/// mutation. Returns the number of products touched.
pub async fn clear_category(pool: &Pool, category: &str) -> Result<u64> {
    let client = pool.get().await?;
    let cleared = client
        .execute(
            r#"
            UPDATE products
            SET category = NULL, updated_at = NOW()
            WHERE category = $1
            "#,
            &[&category],
        )
        .await?;
    Ok(cleared)
}

/// Counts all products, active and inactive.
pub async fn count_products(pool: &Pool) -> Result<i64> {
    let client = pool.get().await?;
    let row = client
        .query_one("SELECT COUNT(*) AS count FROM products", &[])
        .await?;
    Ok(row.try_get("count")?)
}
