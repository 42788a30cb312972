//! Customer Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::double_option;

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Update customer payload
///
/// Absent fields keep their value; `null` clears `phone`, `email` or `address`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
}

/// Customer with the distinct names of the products they have bought
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerWithProducts {
    #[serde(flatten)]
    pub customer: Customer,
    pub purchased_products: Vec<String>,
}
