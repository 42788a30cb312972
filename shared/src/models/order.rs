//! Order Model

use serde::{Deserialize, Serialize};

/// Status given to newly created orders
pub const DEFAULT_ORDER_STATUS: &str = "completed";

/// Order header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Human-readable unique number (`ORD-YYYYMMDD-<id>`)
    pub order_number: String,
    /// `None` for walk-in sales or when the customer was deleted
    pub customer_id: Option<i64>,
    /// Customer name snapshot taken at creation time
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item
///
/// Product name and price are snapshots; later catalog edits do not touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    /// `None` once the referenced product has been deleted
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Order together with its line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Line item of a create-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    /// Copied from the catalog when absent
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Create order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    pub notes: Option<String>,
}

/// Update order payload (status / notes only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_create_without_items_deserializes_empty() {
        let req: OrderCreate = serde_json::from_str(r#"{"customer_id": 7}"#).unwrap();
        assert_eq!(req.customer_id, Some(7));
        assert!(req.items.is_empty());
        assert!(req.customer_name.is_none());
    }

    #[test]
    fn test_order_detail_flattens_header() {
        let detail = OrderDetail {
            order: Order {
                id: 1,
                order_number: "ORD-20240101-1".into(),
                customer_id: None,
                customer_name: None,
                total_amount: 15.0,
                status: DEFAULT_ORDER_STATUS.into(),
                notes: None,
                created_at: 0,
                updated_at: 0,
            },
            items: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["order_number"], "ORD-20240101-1");
        assert_eq!(json["total_amount"], 15.0);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
