//! Product Repository

use super::RepoResult;
use super::category;
use shared::models::{DEFAULT_UNIT, Product, ProductCreate, ProductUpdate};
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteExecutor;

const PRODUCT_SELECT: &str = "SELECT id, serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, created_at, updated_at FROM products";

pub async fn find_all<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(db).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Products with `0 < remaining_items <= threshold`, lowest stock first
pub async fn find_low_stock<'e, E: SqliteExecutor<'e>>(
    db: E,
    threshold: i64,
) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{PRODUCT_SELECT} WHERE remaining_items > 0 AND remaining_items <= ? ORDER BY remaining_items ASC, item_name ASC"
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(threshold)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Insert a product and register its category
///
/// `sold_items` starts at 0 and `remaining_items` at `total_stock`.
pub async fn create(conn: &mut SqliteConnection, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let total_stock = data.total_stock.unwrap_or(0);
    let unit = data.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?7, ?8, ?9, ?9) \
         RETURNING id, serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, created_at, updated_at",
    )
    .bind(id)
    .bind(&data.serial_no)
    .bind(&data.product_code)
    .bind(&data.item_name)
    .bind(&data.item_category)
    .bind(&unit)
    .bind(total_stock)
    .bind(data.price.unwrap_or(0.0))
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    if let Some(name) = product.item_category.as_deref() {
        category::register(&mut *conn, name).await?;
    }
    Ok(product)
}

/// Update the fields present in `data`
///
/// `remaining_items` is recomputed from the (possibly new) `total_stock` and
/// the current `sold_items`. Returns `None` when the product does not exist.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: ProductUpdate,
) -> RepoResult<Option<Product>> {
    let now = shared::util::now_millis();
    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET serial_no = COALESCE(?1, serial_no), product_code = COALESCE(?2, product_code), item_name = COALESCE(?3, item_name), item_category = CASE WHEN ?10 THEN ?4 ELSE item_category END, unit = COALESCE(?5, unit), total_stock = COALESCE(?6, total_stock), remaining_items = COALESCE(?6, total_stock) - sold_items, price = COALESCE(?7, price), updated_at = ?8 \
         WHERE id = ?9 \
         RETURNING id, serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, created_at, updated_at",
    )
    .bind(&data.serial_no)
    .bind(&data.product_code)
    .bind(&data.item_name)
    .bind(data.item_category.clone().flatten())
    .bind(&data.unit)
    .bind(data.total_stock)
    .bind(data.price)
    .bind(now)
    .bind(id)
    .bind(data.item_category.is_some())
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(name) = product.as_ref().and_then(|p| p.item_category.as_deref()) {
        category::register(&mut *conn, name).await?;
    }
    Ok(product)
}

/// Delete a product, returning the removed row
///
/// Order items that referenced it keep their snapshot with `product_id = NULL`.
pub async fn delete<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        "DELETE FROM products WHERE id = ? RETURNING id, serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, created_at, updated_at",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Move `quantity` units from remaining to sold (negative restores them)
///
/// Both counters change in one statement so `remaining_items` stays equal to
/// `total_stock - sold_items`. Returns the number of rows touched: 0 when the
/// product no longer exists.
pub async fn adjust_stock<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: i64,
    quantity: i64,
) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let result = sqlx::query(
        "UPDATE products SET sold_items = sold_items + ?1, remaining_items = remaining_items - ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(quantity)
    .bind(now)
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
