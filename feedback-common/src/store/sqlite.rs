//! SQLite backend
//!
//! Single `feedback` table holding all six record fields plus an integer
//! primary key that fixes insertion order.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info};

use super::FeedbackStore;
use crate::time::{format_timestamp, parse_timestamp};
use crate::{FeedbackRecord, Result};

const CREATE_FEEDBACK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS feedback (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL,
        rating INTEGER NOT NULL,
        review TEXT NOT NULL,
        ai_response TEXT NOT NULL,
        ai_summary TEXT NOT NULL,
        ai_action TEXT NOT NULL
    )
"#;

/// SQLite feedback store
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and its table
    pub async fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // mode=rwc: read, write, create
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        debug!("Connecting to database: {}", db_url);

        let pool = SqlitePool::connect(&db_url).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the table if it is missing
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(CREATE_FEEDBACK_TABLE).execute(&pool).await?;
        info!("Database table initialized (feedback)");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl FeedbackStore for SqliteStore {
    async fn append(&self, record: &FeedbackRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO feedback (
                timestamp, rating, review, ai_response, ai_summary, ai_action
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(format_timestamp(&record.timestamp))
        .bind(record.rating)
        .bind(&record.review)
        .bind(&record.ai_response)
        .bind(&record.ai_summary)
        .bind(&record.ai_action)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT timestamp, rating, review, ai_response, ai_summary, ai_action
            FROM feedback
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<FeedbackRecord> {
                let timestamp: String = row.try_get("timestamp")?;
                Ok(FeedbackRecord {
                    timestamp: parse_timestamp(&timestamp)?,
                    rating: row.try_get("rating")?,
                    review: row.try_get("review")?,
                    ai_response: row.try_get("ai_response")?,
                    ai_summary: row.try_get("ai_summary")?,
                    ai_action: row.try_get("ai_action")?,
                })
            })
            .collect()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("feedback.db");

        let store = SqliteStore::open(&path).await.unwrap();

        assert!(path.exists());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.db");

        {
            let store = SqliteStore::open(&path).await.unwrap();
            store
                .append(&FeedbackRecord::new(2, "Slow delivery", "Sorry", "Late order", "Check courier"))
                .await
                .unwrap();
            store.pool().close().await;
        }

        let store = SqliteStore::open(&path).await.unwrap();
        let records = store.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ai_action, "Check courier");
    }
}
