use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open the SQLite pool, creating the file if missing / 打开数据库连接池
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    tracing::debug!("Connected to {}", database_url);
    Ok(pool)
}

/// Run database migrations / 运行数据库迁移
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    // AUTOINCREMENT keeps deleted ids from being handed out again
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vocabs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            word TEXT NOT NULL,
            context TEXT,
            source TEXT,
            zipf REAL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vocabs_word ON vocabs(word)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_vocabs_zipf ON vocabs(zipf)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Single-connection in-memory pool for tests / 测试用内存数据库
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    // Every connection to :memory: is a separate database, so pin the pool to one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vocabs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_connect_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.db");
        let url = format!("sqlite:{}", path.to_string_lossy());

        let pool = connect(&url, 2).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(path.exists());
        pool.close().await;
    }
}
