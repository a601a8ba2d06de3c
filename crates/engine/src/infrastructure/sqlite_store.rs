//! SQLite-backed key-value storage.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, KeyValueStore, RepoError};

/// SQLite implementation of the key-value store.
///
/// One row per key; writes are upserts stamped with the clock time.
pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteStore {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("kv_store.connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("kv_store.schema", e))?;

        Ok(Self { pool, clock })
    }

    /// When the key was last written, as stored (RFC 3339).
    pub async fn updated_at(&self, key: &str) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("kv_store.updated_at", e))?;

        Ok(row.map(|row| row.get("updated_at")))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("kv_store.read", e))?;

        Ok(row.map(|row| row.get("value")))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepoError> {
        let now = self.clock.now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("kv_store.write", e))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("kv_store.remove", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    async fn open(dir: &tempfile::TempDir) -> SqliteStore {
        let path = dir.path().join("loothub.db");
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        ));
        SqliteStore::new(path.to_str().unwrap(), clock).await.unwrap()
    }

    #[tokio::test]
    async fn write_read_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;

        assert_eq!(store.read("fc_loot_codes").await.unwrap(), None);

        store.write("fc_loot_codes", "[]").await.unwrap();
        store.write("fc_loot_codes", "[1]").await.unwrap();

        assert_eq!(
            store.read("fc_loot_codes").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert_eq!(
            store.updated_at("fc_loot_codes").await.unwrap().as_deref(),
            Some("2025-05-01T12:00:00+00:00")
        );
    }

    #[tokio::test]
    async fn remove_deletes_only_that_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;

        store.write("a", "1").await.unwrap();
        store.write("b", "2").await.unwrap();
        store.remove("a").await.unwrap();
        store.remove("missing").await.unwrap();

        assert_eq!(store.read("a").await.unwrap(), None);
        assert_eq!(store.read("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn data_survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open(&dir).await;
            store.write("fc_loot_news", "[\"kept\"]").await.unwrap();
            store.pool.close().await;
        }

        let reopened = open(&dir).await;
        assert_eq!(
            reopened.read("fc_loot_news").await.unwrap().as_deref(),
            Some("[\"kept\"]")
        );
    }
}
