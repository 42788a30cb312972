//! Order Repository
//!
//! Order headers and their line items. Items are loaded for a page of orders
//! with one `IN (...)` query and grouped in memory.

use std::collections::HashMap;

use super::RepoResult;
use shared::models::{Order, OrderDetail, OrderItem};
use sqlx::sqlite::SqliteExecutor;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

pub(crate) const ORDER_COLUMNS: &str =
    "o.id, o.order_number, o.customer_id, o.customer_name, o.total_amount, o.status, o.notes, o.created_at, o.updated_at";

const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, unit_price, subtotal";

/// Order header as written by [`insert`]
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: i64,
    pub order_number: String,
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Line item as written by [`insert_item`]
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(db: E, order: &NewOrder) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, order_number, customer_id, customer_name, total_amount, status, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(order.id)
    .bind(&order.order_number)
    .bind(order.customer_id)
    .bind(&order.customer_name)
    .bind(order.total_amount)
    .bind(&order.status)
    .bind(&order.notes)
    .bind(order.created_at)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn insert_item<'e, E: SqliteExecutor<'e>>(
    db: E,
    order_id: i64,
    item: &NewOrderItem,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_items (order_id, product_id, product_name, quantity, unit_price, subtotal) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(item.product_id)
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.subtotal)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn find_header<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders o WHERE o.id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn find_items<'e, E: SqliteExecutor<'e>>(
    db: E,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id");
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

/// Line items for several orders, keyed by order id
pub async fn items_by_order(
    conn: &mut SqliteConnection,
    order_ids: &[i64],
) -> RepoResult<HashMap<i64, Vec<OrderItem>>> {
    let mut map: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    if order_ids.is_empty() {
        return Ok(map);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id IN ("
    ));
    let mut ids = qb.separated(", ");
    for id in order_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY order_id, id");

    let items: Vec<OrderItem> = qb.build_query_as::<OrderItem>().fetch_all(&mut *conn).await?;
    for item in items {
        map.entry(item.order_id).or_default().push(item);
    }
    Ok(map)
}

async fn with_items(
    conn: &mut SqliteConnection,
    orders: Vec<Order>,
) -> RepoResult<Vec<OrderDetail>> {
    let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let mut items = items_by_order(conn, &ids).await?;
    Ok(orders
        .into_iter()
        .map(|order| OrderDetail {
            items: items.remove(&order.id).unwrap_or_default(),
            order,
        })
        .collect())
}

/// All orders with items, newest first
pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!("SELECT {ORDER_COLUMNS} FROM orders o ORDER BY o.created_at DESC, o.id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .fetch_all(&mut *conn)
        .await?;
    with_items(conn, orders).await
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<OrderDetail>> {
    let Some(order) = find_header(&mut *conn, id).await? else {
        return Ok(None);
    };
    let items = find_items(&mut *conn, id).await?;
    Ok(Some(OrderDetail { order, items }))
}

/// A customer's orders with items, newest first
pub async fn find_by_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> RepoResult<Vec<OrderDetail>> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders o WHERE o.customer_id = ? ORDER BY o.created_at DESC, o.id DESC"
    );
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(customer_id)
        .fetch_all(&mut *conn)
        .await?;
    with_items(conn, orders).await
}

/// Update status and/or notes; `None` when the order does not exist
pub async fn update<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: i64,
    status: Option<&str>,
    notes: Option<&str>,
) -> RepoResult<Option<Order>> {
    let now = shared::util::now_millis();
    let row = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = COALESCE(?1, status), notes = COALESCE(?2, notes), updated_at = ?3 WHERE id = ?4 \
         RETURNING id, order_number, customer_id, customer_name, total_amount, status, notes, created_at, updated_at",
    )
    .bind(status)
    .bind(notes)
    .bind(now)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Delete an order; its items go with it (ON DELETE CASCADE)
pub async fn delete<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn header(id: i64, created_at: i64) -> NewOrder {
        NewOrder {
            id,
            order_number: shared::util::order_number(id, created_at),
            customer_id: None,
            customer_name: None,
            total_amount: 3.0,
            status: "completed".into(),
            notes: None,
            created_at,
        }
    }

    fn line(name: &str) -> NewOrderItem {
        NewOrderItem {
            product_id: 1,
            product_name: name.into(),
            quantity: 1,
            unit_price: 1.5,
            subtotal: 1.5,
        }
    }

    async fn seed_product(db: &DbService) {
        sqlx::query(
            "INSERT INTO products (id, serial_no, product_code, item_name, created_at, updated_at) VALUES (1, 'SN-1', 'P-1', 'Tea', 0, 0)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_items_grouped_per_order() {
        let db = DbService::in_memory().await.unwrap();
        seed_product(&db).await;
        insert(&db.pool, &header(10, 1_000)).await.unwrap();
        insert(&db.pool, &header(20, 2_000)).await.unwrap();
        insert_item(&db.pool, 10, &line("a")).await.unwrap();
        insert_item(&db.pool, 20, &line("b")).await.unwrap();
        insert_item(&db.pool, 10, &line("c")).await.unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        let all = find_all(&mut conn).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].order.id, 20);
        assert_eq!(all[0].items.len(), 1);
        let names: Vec<&str> = all[1].items.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let db = DbService::in_memory().await.unwrap();
        seed_product(&db).await;
        insert(&db.pool, &header(10, 1_000)).await.unwrap();
        insert_item(&db.pool, 10, &line("a")).await.unwrap();

        assert!(delete(&db.pool, 10).await.unwrap());
        assert!(!delete(&db.pool, 10).await.unwrap());
        assert!(find_items(&db.pool, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_absent_fields() {
        let db = DbService::in_memory().await.unwrap();
        let mut order = header(10, 1_000);
        order.notes = Some("gift wrap".into());
        insert(&db.pool, &order).await.unwrap();

        let updated = update(&db.pool, 10, Some("refunded"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "refunded");
        assert_eq!(updated.notes.as_deref(), Some("gift wrap"));

        assert!(update(&db.pool, 99, Some("x"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_product_delete_keeps_item_snapshot() {
        let db = DbService::in_memory().await.unwrap();
        seed_product(&db).await;
        insert(&db.pool, &header(10, 1_000)).await.unwrap();
        insert_item(&db.pool, 10, &line("Tea")).await.unwrap();

        sqlx::query("DELETE FROM products WHERE id = 1")
            .execute(&db.pool)
            .await
            .unwrap();

        let items = find_items(&db.pool, 10).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, None);
        assert_eq!(items[0].product_name, "Tea");
    }
}
