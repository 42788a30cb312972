//! Customer Repository

use std::collections::HashMap;

use super::RepoResult;
use shared::models::{Customer, CustomerCreate, CustomerUpdate, CustomerWithProducts};
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteExecutor;

const CUSTOMER_COLUMNS: &str = "id, customer_name, phone, email, address, created_at, updated_at";

pub async fn find_all<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<Customer>> {
    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, id DESC");
    let rows = sqlx::query_as::<_, Customer>(&sql).fetch_all(db).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn create<'e, E: SqliteExecutor<'e>>(db: E, data: CustomerCreate) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let sql = format!(
        "INSERT INTO customers (id, customer_name, phone, email, address, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING {CUSTOMER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .bind(data.customer_name.trim())
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(now)
        .fetch_one(db)
        .await?;
    Ok(row)
}

/// Update the fields present in `data`; `None` when the customer does not exist
///
/// For the optional contact fields `Some(None)` stores NULL.
pub async fn update<'e, E: SqliteExecutor<'e>>(
    db: E,
    id: i64,
    data: CustomerUpdate,
) -> RepoResult<Option<Customer>> {
    let now = shared::util::now_millis();
    let sql = format!(
        "UPDATE customers SET customer_name = COALESCE(?1, customer_name), \
         phone = CASE WHEN ?2 THEN ?3 ELSE phone END, \
         email = CASE WHEN ?4 THEN ?5 ELSE email END, \
         address = CASE WHEN ?6 THEN ?7 ELSE address END, \
         updated_at = ?8 WHERE id = ?9 RETURNING {CUSTOMER_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(data.customer_name.as_deref().map(str::trim))
        .bind(data.phone.is_some())
        .bind(data.phone.flatten())
        .bind(data.email.is_some())
        .bind(data.email.flatten())
        .bind(data.address.is_some())
        .bind(data.address.flatten())
        .bind(now)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Delete a customer, returning the removed row
///
/// Their orders stay, with `customer_id = NULL` and the name snapshot intact.
pub async fn delete<'e, E: SqliteExecutor<'e>>(db: E, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("DELETE FROM customers WHERE id = ? RETURNING {CUSTOMER_COLUMNS}");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Every customer with the distinct names of the products they have bought
pub async fn find_all_with_products(
    conn: &mut SqliteConnection,
) -> RepoResult<Vec<CustomerWithProducts>> {
    let customers = find_all(&mut *conn).await?;

    let pairs: Vec<(i64, String)> = sqlx::query_as(
        "SELECT DISTINCT o.customer_id, p.item_name \
         FROM orders o \
         JOIN order_items oi ON oi.order_id = o.id \
         JOIN products p ON p.id = oi.product_id \
         WHERE o.customer_id IS NOT NULL \
         ORDER BY p.item_name ASC",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut products: HashMap<i64, Vec<String>> = HashMap::new();
    for (customer_id, item_name) in pairs {
        products.entry(customer_id).or_default().push(item_name);
    }

    Ok(customers
        .into_iter()
        .map(|customer| CustomerWithProducts {
            purchased_products: products.remove(&customer.id).unwrap_or_default(),
            customer,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn new_customer(name: &str) -> CustomerCreate {
        CustomerCreate {
            customer_name: name.to_string(),
            phone: Some("555-0100".into()),
            email: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_crud_round() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, new_customer("  Ana ")).await.unwrap();
        assert_eq!(created.customer_name, "Ana");
        assert_eq!(created.phone.as_deref(), Some("555-0100"));

        let updated = update(
            &db.pool,
            created.id,
            CustomerUpdate {
                email: Some(Some("ana@example.com".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.customer_name, "Ana");
        assert_eq!(updated.email.as_deref(), Some("ana@example.com"));

        let deleted = delete(&db.pool, created.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(find_by_id(&db.pool, created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_clears_contact_with_null() {
        let db = DbService::in_memory().await.unwrap();
        let created = create(&db.pool, new_customer("Ana")).await.unwrap();

        let patch: CustomerUpdate =
            serde_json::from_str(r#"{"phone": null, "address": "1 Main St"}"#).unwrap();
        let updated = update(&db.pool, created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.phone, None);
        assert_eq!(updated.address.as_deref(), Some("1 Main St"));
        assert_eq!(updated.email, created.email);

        // An empty body keeps everything
        let patch: CustomerUpdate = serde_json::from_str("{}").unwrap();
        let unchanged = update(&db.pool, created.id, patch).await.unwrap().unwrap();
        assert_eq!(unchanged.address.as_deref(), Some("1 Main St"));
        assert_eq!(unchanged.phone, None);
    }

    #[tokio::test]
    async fn test_missing_customer() {
        let db = DbService::in_memory().await.unwrap();
        assert!(find_by_id(&db.pool, 1).await.unwrap().is_none());
        assert!(update(&db.pool, 1, CustomerUpdate::default()).await.unwrap().is_none());
        assert!(delete(&db.pool, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_with_products_without_orders() {
        let db = DbService::in_memory().await.unwrap();
        create(&db.pool, new_customer("Ana")).await.unwrap();

        let mut conn = db.pool.acquire().await.unwrap();
        let rows = find_all_with_products(&mut conn).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].purchased_products.is_empty());
    }
}
