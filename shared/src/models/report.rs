//! Report Models
//!
//! Read-only aggregations over products, customers and orders.

use serde::{Deserialize, Serialize};

use super::order::{Order, OrderItem};

/// Headline counters shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub low_stock_count: i64,
}

/// Best-selling product entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TopProduct {
    pub item_name: String,
    pub sold_items: i64,
    pub item_category: Option<String>,
}

/// Dashboard report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub top_products: Vec<TopProduct>,
}

/// Inventory valuation row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryRow {
    pub serial_no: String,
    pub product_code: String,
    pub item_name: String,
    pub item_category: Option<String>,
    pub unit: String,
    pub total_stock: i64,
    pub sold_items: i64,
    pub remaining_items: i64,
    pub price: f64,
    /// `sold_items * price`
    pub revenue: f64,
}

/// Order as listed in the sales report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(flatten)]
    pub order: Order,
    /// Live phone number of the linked customer, if any
    pub phone: Option<String>,
    pub items: Vec<OrderItem>,
}

/// Totals over the orders of a sales report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_orders: i64,
    pub total_sales: f64,
    pub average_order_value: f64,
}

/// Sales report (optionally restricted to a date range)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub orders: Vec<SalesOrder>,
    pub summary: SalesSummary,
}

/// Per-customer order count and spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CustomerSpend {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub total_orders: i64,
    pub total_spent: f64,
}

/// Per-category quantity and revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategorySales {
    pub item_category: Option<String>,
    pub total_quantity_sold: i64,
    pub total_revenue: f64,
}
