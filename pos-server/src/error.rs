//! Unified service-layer error type
//!
//! `ServiceError` bridges storage errors (`sqlx::Error`, [`RepoError`]) and the
//! API-layer error (`AppError`) so handlers can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::repository::RepoError;
use crate::orders::OrderError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: storage/infrastructure errors (logged, mapped to `DatabaseError`)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Duplicate(msg) => ServiceError::App(AppError::conflict(msg)),
            RepoError::Database(err) => err.into(),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_is_opaque() {
        let app: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.message, "Database error");
    }

    #[test]
    fn test_pool_timeout_is_database_error() {
        let app: AppError = ServiceError::from(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
        assert_eq!(app.http_status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_duplicate_is_conflict() {
        let app: AppError = ServiceError::from(RepoError::Duplicate("x".into())).into();
        assert_eq!(app.http_status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_order_error_passes_through() {
        let app: AppError = ServiceError::from(OrderError::NotFound(7)).into();
        assert_eq!(app.code, ErrorCode::OrderNotFound);
    }
}
