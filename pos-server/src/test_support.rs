//! Fixtures for unit tests

use shared::models::{Customer, CustomerCreate, OrderCreate, OrderItemInput, Product, ProductCreate};
use sqlx::SqlitePool;

use crate::db::repository::{customer, product};

pub async fn seed_product(pool: &SqlitePool, code: &str, stock: i64, price: f64) -> Product {
    let mut conn = pool.acquire().await.unwrap();
    product::create(
        &mut conn,
        ProductCreate {
            serial_no: format!("SN-{code}"),
            product_code: code.to_string(),
            item_name: format!("Item {code}"),
            item_category: Some("General".into()),
            unit: None,
            total_stock: Some(stock),
            price: Some(price),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_customer(pool: &SqlitePool, name: &str) -> Customer {
    customer::create(
        pool,
        CustomerCreate {
            customer_name: name.to_string(),
            phone: None,
            email: None,
            address: None,
        },
    )
    .await
    .unwrap()
}

pub fn line(product_id: i64, quantity: i64, unit_price: f64, subtotal: f64) -> OrderItemInput {
    OrderItemInput {
        product_id,
        product_name: None,
        quantity,
        unit_price,
        subtotal,
    }
}

pub fn order_with(items: Vec<OrderItemInput>) -> OrderCreate {
    OrderCreate {
        items,
        ..Default::default()
    }
}
