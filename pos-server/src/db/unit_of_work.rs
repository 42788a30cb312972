//! Unit of work
//!
//! Runs a closure inside one database transaction. The closure only sees the
//! transaction's connection; everything it writes commits together on `Ok`
//! and is rolled back on `Err`. The connection goes back to the pool on every
//! exit path when the transaction guard drops.
//!
//! Transactions start with `BEGIN IMMEDIATE` so the write lock is taken up
//! front. A deferred transaction that reads first cannot be upgraded once
//! another writer has committed in WAL mode (`SQLITE_BUSY` without waiting),
//! while an immediate one waits on the busy timeout like any other writer.

use futures::future::BoxFuture;
use sqlx::{SqliteConnection, SqlitePool};

/// Execute `work` atomically
///
/// ```ignore
/// let product = transaction(&pool, move |conn| {
///     Box::pin(async move { product::insert(conn, data).await })
/// })
/// .await?;
/// ```
///
/// A failed rollback is logged and the original error returned.
pub async fn transaction<T, E, F>(pool: &SqlitePool, work: F) -> Result<T, E>
where
    F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, E>>,
    E: From<sqlx::Error>,
{
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    match work(&mut *tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn count_customers(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn insert_customer(conn: &mut SqliteConnection, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO customers (id, customer_name, created_at, updated_at) VALUES (?, 'Ana', 0, 0)",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_commit_on_ok() {
        let db = DbService::in_memory().await.unwrap();

        let result: Result<i64, sqlx::Error> = transaction(&db.pool, |conn| {
            Box::pin(async move {
                insert_customer(conn, 1).await?;
                insert_customer(conn, 2).await?;
                Ok(2)
            })
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(count_customers(&db.pool).await, 2);
    }

    #[tokio::test]
    async fn test_rollback_on_err() {
        let db = DbService::in_memory().await.unwrap();

        // The second insert collides on the primary key
        let result: Result<(), sqlx::Error> = transaction(&db.pool, |conn| {
            Box::pin(async move {
                insert_customer(conn, 1).await?;
                insert_customer(conn, 1).await?;
                Ok(())
            })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(count_customers(&db.pool).await, 0);
    }

    #[tokio::test]
    async fn test_rollback_on_application_error() {
        #[derive(Debug)]
        enum WorkError {
            Rejected,
            Db,
        }
        impl From<sqlx::Error> for WorkError {
            fn from(_: sqlx::Error) -> Self {
                WorkError::Db
            }
        }

        let db = DbService::in_memory().await.unwrap();

        let result: Result<(), WorkError> = transaction(&db.pool, |conn| {
            Box::pin(async move {
                insert_customer(conn, 1).await?;
                Err(WorkError::Rejected)
            })
        })
        .await;

        assert!(matches!(result, Err(WorkError::Rejected)));
        assert_eq!(count_customers(&db.pool).await, 0);
    }
}
