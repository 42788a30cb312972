//! Order errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::repository::RepoError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    Empty,

    #[error("Invalid item at index {index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    #[error("Customer {0} not found")]
    CustomerNotFound(i64),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Insufficient stock for product {product_id}: requested {requested}, remaining {remaining}")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        remaining: i64,
    },

    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("Status must not be blank")]
    BlankStatus,

    /// Any storage failure inside the unit of work; the transaction was rolled back
    #[error("Transaction failed: {0}")]
    Transaction(#[from] RepoError),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Transaction(err.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::Empty => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidItem { index, .. } => {
                AppError::with_message(ErrorCode::OrderInvalid, message).with_detail("index", index)
            }
            OrderError::CustomerNotFound(id) => {
                AppError::with_message(ErrorCode::CustomerNotFound, message).with_detail("customer_id", id)
            }
            OrderError::ProductNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("product_id", id)
            }
            OrderError::InsufficientStock {
                product_id,
                requested,
                remaining,
            } => AppError::with_message(ErrorCode::ProductOutOfStock, message)
                .with_detail("product_id", product_id)
                .with_detail("requested", requested)
                .with_detail("remaining", remaining),
            OrderError::NotFound(_) => AppError::with_message(ErrorCode::OrderNotFound, message),
            OrderError::BlankStatus => {
                AppError::with_message(ErrorCode::ValidationFailed, message).with_detail("field", "status")
            }
            OrderError::Transaction(e) => {
                tracing::error!(error = %e, "Order transaction failed");
                AppError::new(ErrorCode::TransactionFailed)
            }
        }
    }
}
