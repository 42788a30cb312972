//! Product Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;

/// Default unit for products created without one
pub const DEFAULT_UNIT: &str = "pcs";

/// Product entity
///
/// Stock counters always satisfy `remaining_items == total_stock - sold_items`.
/// `sold_items` / `remaining_items` are only moved by order create/delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    /// Globally unique serial number
    pub serial_no: String,
    /// Globally unique product code
    pub product_code: String,
    pub item_name: String,
    pub item_category: Option<String>,
    pub unit: String,
    pub total_stock: i64,
    pub sold_items: i64,
    pub remaining_items: i64,
    pub price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub serial_no: String,
    pub product_code: String,
    pub item_name: String,
    pub item_category: Option<String>,
    pub unit: Option<String>,
    pub total_stock: Option<i64>,
    pub price: Option<f64>,
}

/// Update product payload
///
/// Absent fields keep their value; `item_category: null` clears the category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub serial_no: Option<String>,
    pub product_code: Option<String>,
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub item_category: Option<Option<String>>,
    pub unit: Option<String>,
    pub total_stock: Option<i64>,
    pub price: Option<f64>,
}
