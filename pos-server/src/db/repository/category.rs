//! Category Repository

use super::RepoResult;
use shared::models::Category;
use sqlx::sqlite::SqliteExecutor;

pub async fn find_all<'e, E: SqliteExecutor<'e>>(db: E) -> RepoResult<Vec<Category>> {
    let rows = sqlx::query_as::<_, Category>(
        "SELECT id, name, created_at FROM categories ORDER BY name ASC",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Record a category name; blank names and known names are ignored
pub async fn register<'e, E: SqliteExecutor<'e>>(db: E, name: &str) -> RepoResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(());
    }
    sqlx::query("INSERT OR IGNORE INTO categories (name, created_at) VALUES (?, ?)")
        .bind(name)
        .bind(shared::util::now_millis())
        .execute(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_register_is_idempotent_and_sorted() {
        let db = DbService::in_memory().await.unwrap();
        register(&db.pool, "Snacks").await.unwrap();
        register(&db.pool, "Drinks").await.unwrap();
        register(&db.pool, " Snacks ").await.unwrap();
        register(&db.pool, "   ").await.unwrap();

        let names: Vec<String> = find_all(&db.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Drinks", "Snacks"]);
    }
}
