//! Report Repository
//!
//! Read-only aggregate queries. Each report reflects the tables at query time.

use super::RepoResult;
use super::order::{ORDER_COLUMNS, items_by_order};
use crate::utils::money;
use crate::utils::time::DateRange;
use rust_decimal::Decimal;
use shared::models::{
    CategorySales, CustomerSpend, Dashboard, DashboardStats, InventoryRow, Order, SalesOrder,
    SalesReport, SalesSummary, TopProduct,
};
use sqlx::SqliteConnection;
use sqlx::sqlite::SqliteExecutor;

const RECENT_ORDERS: i64 = 5;
const TOP_PRODUCTS: i64 = 5;

#[derive(sqlx::FromRow)]
struct SalesOrderRow {
    #[sqlx(flatten)]
    order: Order,
    phone: Option<String>,
}

pub async fn dashboard(conn: &mut SqliteConnection, low_stock_threshold: i64) -> RepoResult<Dashboard> {
    let (total_products, total_customers, total_orders, total_revenue, low_stock_count): (
        i64,
        i64,
        i64,
        f64,
        i64,
    ) = sqlx::query_as(
        "SELECT \
           (SELECT COUNT(*) FROM products), \
           (SELECT COUNT(*) FROM customers), \
           (SELECT COUNT(*) FROM orders), \
           (SELECT COALESCE(SUM(total_amount), 0.0) FROM orders), \
           (SELECT COUNT(*) FROM products WHERE remaining_items > 0 AND remaining_items <= ?)",
    )
    .bind(low_stock_threshold)
    .fetch_one(&mut *conn)
    .await?;

    let sql = format!(
        "SELECT {ORDER_COLUMNS} FROM orders o ORDER BY o.created_at DESC, o.id DESC LIMIT ?"
    );
    let recent_orders = sqlx::query_as::<_, Order>(&sql)
        .bind(RECENT_ORDERS)
        .fetch_all(&mut *conn)
        .await?;

    let top_products = sqlx::query_as::<_, TopProduct>(
        "SELECT item_name, sold_items, item_category FROM products WHERE sold_items > 0 ORDER BY sold_items DESC, item_name ASC LIMIT ?",
    )
    .bind(TOP_PRODUCTS)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Dashboard {
        stats: DashboardStats {
            total_products,
            total_customers,
            total_orders,
            total_revenue: money::round_money(total_revenue),
            low_stock_count,
        },
        recent_orders,
        top_products,
    })
}

/// Every product with `revenue = sold_items * price`, by category then name
pub async fn inventory<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<InventoryRow>> {
    let mut rows = sqlx::query_as::<_, InventoryRow>(
        "SELECT serial_no, product_code, item_name, item_category, unit, total_stock, sold_items, remaining_items, price, \
                sold_items * price AS revenue \
         FROM products \
         ORDER BY item_category ASC, item_name ASC",
    )
    .fetch_all(db)
    .await?;
    for row in &mut rows {
        row.revenue = money::to_f64(money::line_amount(row.sold_items, row.price));
    }
    Ok(rows)
}

/// Orders inside `range` with items and customer phone, plus totals
pub async fn sales(conn: &mut SqliteConnection, range: DateRange) -> RepoResult<SalesReport> {
    let sql = format!(
        "SELECT {ORDER_COLUMNS}, c.phone \
         FROM orders o \
         LEFT JOIN customers c ON c.id = o.customer_id \
         WHERE (?1 IS NULL OR o.created_at >= ?1) AND (?2 IS NULL OR o.created_at < ?2) \
         ORDER BY o.created_at DESC, o.id DESC"
    );
    let rows = sqlx::query_as::<_, SalesOrderRow>(&sql)
        .bind(range.start_ms)
        .bind(range.end_ms)
        .fetch_all(&mut *conn)
        .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.order.id).collect();
    let mut items = items_by_order(conn, &ids).await?;

    let total_sales: Decimal = rows
        .iter()
        .map(|r| money::to_decimal(r.order.total_amount))
        .sum();
    let total_sales = money::to_f64(total_sales);
    let total_orders = rows.len() as i64;

    let orders = rows
        .into_iter()
        .map(|row| SalesOrder {
            items: items.remove(&row.order.id).unwrap_or_default(),
            order: row.order,
            phone: row.phone,
        })
        .collect();

    Ok(SalesReport {
        orders,
        summary: SalesSummary {
            total_orders,
            total_sales,
            average_order_value: money::average(total_sales, total_orders),
        },
    })
}

/// Per-customer order count and spend, biggest spender first
pub async fn customers<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<CustomerSpend>> {
    let mut rows = sqlx::query_as::<_, CustomerSpend>(
        "SELECT c.id, c.customer_name, c.phone, c.email, \
                COUNT(o.id) AS total_orders, \
                COALESCE(SUM(o.total_amount), 0.0) AS total_spent \
         FROM customers c \
         LEFT JOIN orders o ON o.customer_id = c.id \
         GROUP BY c.id \
         ORDER BY total_spent DESC, c.customer_name ASC",
    )
    .fetch_all(db)
    .await?;
    for row in &mut rows {
        row.total_spent = money::round_money(row.total_spent);
    }
    Ok(rows)
}

/// Quantity and revenue per product category, biggest revenue first
///
/// Items whose product has been deleted are not attributed to any category.
pub async fn category_sales<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<CategorySales>> {
    let mut rows = sqlx::query_as::<_, CategorySales>(
        "SELECT p.item_category, \
                SUM(oi.quantity) AS total_quantity_sold, \
                SUM(oi.subtotal) AS total_revenue \
         FROM order_items oi \
         JOIN products p ON p.id = oi.product_id \
         GROUP BY p.item_category \
         ORDER BY total_revenue DESC",
    )
    .fetch_all(db)
    .await?;
    for row in &mut rows {
        row.total_revenue = money::round_money(row.total_revenue);
    }
    Ok(rows)
}
