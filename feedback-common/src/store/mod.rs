//! Persistence adapters for feedback records
//!
//! Two interchangeable backends implement [`FeedbackStore`]:
//! - [`CsvFileStore`]: append-only CSV file with a fixed header
//! - [`SqliteStore`]: single `feedback` table
//!
//! Both create their storage medium on first use. Writers are not
//! coordinated across requests; submissions are expected to be rare enough
//! that interleaving is an accepted risk.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::config::StorageConfig;
use crate::{Error, FeedbackRecord, Result};

mod csv_file;
mod sqlite;

pub use csv_file::{CsvFileStore, CSV_HEADERS};
pub use sqlite::SqliteStore;

/// Append-only store of feedback records
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Durably write one record
    async fn append(&self, record: &FeedbackRecord) -> Result<()>;

    /// All stored records in insertion order (empty if none exist)
    async fn list_all(&self) -> Result<Vec<FeedbackRecord>>;

    /// Short backend identifier for logs and health output
    fn backend_name(&self) -> &'static str;
}

/// Storage backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Csv,
    Sqlite,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Csv => "csv",
            StorageBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(StorageBackend::Csv),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(Error::Config(format!(
                "Unknown storage backend '{}' (expected 'csv' or 'sqlite')",
                other
            ))),
        }
    }
}

/// Open the configured backend
pub async fn open_store(config: &StorageConfig) -> Result<Arc<dyn FeedbackStore>> {
    let store: Arc<dyn FeedbackStore> = match config.backend {
        StorageBackend::Csv => {
            info!(path = %config.csv_path.display(), "Using CSV feedback store");
            Arc::new(CsvFileStore::new(&config.csv_path))
        }
        StorageBackend::Sqlite => {
            info!(path = %config.db_path.display(), "Using SQLite feedback store");
            Arc::new(SqliteStore::open(&config.db_path).await?)
        }
    };
    Ok(store)
}
