//! Order service: create, update and delete orders

use shared::models::{
    DEFAULT_ORDER_STATUS, Order, OrderCreate, OrderDetail, OrderItemInput, OrderUpdate,
};
use sqlx::{SqliteConnection, SqlitePool};

use super::{OrderError, OrderPolicy, StockPolicy, SubtotalPolicy};
use crate::db::repository::order::{NewOrder, NewOrderItem};
use crate::db::repository::{customer, order, product};
use crate::db::unit_of_work::transaction;
use crate::utils::money;

/// Order lifecycle over the connection pool
#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    policy: OrderPolicy,
}

impl OrderService {
    pub fn new(pool: SqlitePool, policy: OrderPolicy) -> Self {
        Self { pool, policy }
    }

    /// Create an order and take its quantities out of stock
    ///
    /// Validation runs before any write. Header, items and stock changes are
    /// one transaction: on any error nothing persists.
    pub async fn create(&self, req: OrderCreate) -> Result<OrderDetail, OrderError> {
        validate(&req, self.policy.subtotal)?;

        let stock_policy = self.policy.stock;
        let detail = transaction(&self.pool, move |conn| {
            Box::pin(create_in_tx(conn, req, stock_policy))
        })
        .await?;

        tracing::info!(
            order_number = %detail.order.order_number,
            items = detail.items.len(),
            total_amount = detail.order.total_amount,
            "Order created"
        );
        Ok(detail)
    }

    /// Change status and/or notes
    pub async fn update(&self, id: i64, req: OrderUpdate) -> Result<Order, OrderError> {
        let status = match req.status.as_deref().map(str::trim) {
            Some("") => return Err(OrderError::BlankStatus),
            other => other,
        };
        order::update(&self.pool, id, status, req.notes.as_deref())
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Delete an order and put its quantities back into stock
    ///
    /// Lines whose product has since been deleted restore nothing. Returns the
    /// order as it was before deletion.
    pub async fn delete(&self, id: i64) -> Result<OrderDetail, OrderError> {
        let detail = transaction(&self.pool, move |conn| Box::pin(delete_in_tx(conn, id))).await?;

        tracing::info!(
            order_number = %detail.order.order_number,
            items = detail.items.len(),
            "Order deleted, stock restored"
        );
        Ok(detail)
    }
}

/// Check an order request without touching storage
pub fn validate(req: &OrderCreate, subtotal_policy: SubtotalPolicy) -> Result<(), OrderError> {
    if req.items.is_empty() {
        return Err(OrderError::Empty);
    }
    for (index, item) in req.items.iter().enumerate() {
        validate_item(item, subtotal_policy).map_err(|reason| OrderError::InvalidItem {
            index,
            reason: reason.to_string(),
        })?;
    }
    Ok(())
}

fn validate_item(item: &OrderItemInput, subtotal_policy: SubtotalPolicy) -> Result<(), &'static str> {
    if item.quantity <= 0 {
        return Err("quantity must be greater than zero");
    }
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err("unit_price must be a non-negative number");
    }
    if !item.subtotal.is_finite() || item.subtotal < 0.0 {
        return Err("subtotal must be a non-negative number");
    }
    if subtotal_policy == SubtotalPolicy::Verify && !money::subtotal_matches(item) {
        return Err("subtotal does not match quantity * unit_price");
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

async fn create_in_tx(
    conn: &mut SqliteConnection,
    req: OrderCreate,
    stock_policy: StockPolicy,
) -> Result<OrderDetail, OrderError> {
    // Snapshot the customer name; a missing customer fails the order
    let customer_name = match req.customer_id {
        Some(customer_id) => {
            let customer = customer::find_by_id(&mut *conn, customer_id)
                .await?
                .ok_or(OrderError::CustomerNotFound(customer_id))?;
            Some(non_blank(req.customer_name).unwrap_or(customer.customer_name))
        }
        None => non_blank(req.customer_name),
    };

    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let header = NewOrder {
        id,
        order_number: shared::util::order_number(id, now),
        customer_id: req.customer_id,
        customer_name,
        total_amount: money::order_total(&req.items),
        status: DEFAULT_ORDER_STATUS.to_string(),
        notes: req.notes,
        created_at: now,
    };
    order::insert(&mut *conn, &header).await?;

    for item in req.items {
        let product = product::find_by_id(&mut *conn, item.product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(item.product_id))?;

        // Reads inside the transaction see earlier lines of this order
        if stock_policy == StockPolicy::RejectInsufficient && item.quantity > product.remaining_items {
            return Err(OrderError::InsufficientStock {
                product_id: product.id,
                requested: item.quantity,
                remaining: product.remaining_items,
            });
        }

        let line = NewOrderItem {
            product_id: product.id,
            product_name: non_blank(item.product_name).unwrap_or(product.item_name),
            quantity: item.quantity,
            unit_price: money::round_money(item.unit_price),
            subtotal: money::round_money(item.subtotal),
        };
        order::insert_item(&mut *conn, id, &line).await?;
        product::adjust_stock(&mut *conn, product.id, item.quantity).await?;
    }

    order::find_by_id(conn, id)
        .await?
        .ok_or(OrderError::NotFound(id))
}

async fn delete_in_tx(conn: &mut SqliteConnection, id: i64) -> Result<OrderDetail, OrderError> {
    let detail = order::find_by_id(&mut *conn, id)
        .await?
        .ok_or(OrderError::NotFound(id))?;

    for item in &detail.items {
        if let Some(product_id) = item.product_id {
            product::adjust_stock(&mut *conn, product_id, -item.quantity).await?;
        }
    }
    order::delete(&mut *conn, id).await?;

    Ok(detail)
}
