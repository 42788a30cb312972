//! Repository Module
//!
//! SQL access for every table, as free functions. Single-statement functions
//! accept any SQLite executor (the pool or a transaction connection);
//! functions that issue several statements take `&mut SqliteConnection`.

pub mod category;
pub mod customer;
pub mod order;
pub mod product;
pub mod report;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A UNIQUE constraint rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_unique_violation_maps_to_duplicate() {
        let db = DbService::in_memory().await.unwrap();
        let insert = "INSERT INTO categories (name, created_at) VALUES ('Drinks', 0)";
        sqlx::query(insert).execute(&db.pool).await.unwrap();

        let err: RepoError = sqlx::query(insert)
            .execute(&db.pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_other_errors_map_to_database() {
        let db = DbService::in_memory().await.unwrap();
        let err: RepoError = sqlx::query("SELECT * FROM no_such_table")
            .execute(&db.pool)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
