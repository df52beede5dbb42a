//! CSV file backend
//!
//! One header row followed by one row per submission. Fields are quoted per
//! standard CSV rules, so commas, quotes and embedded newlines round-trip.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::FeedbackStore;
use crate::time::{format_timestamp, parse_timestamp};
use crate::{Error, FeedbackRecord, Result};

/// Fixed header row
pub const CSV_HEADERS: [&str; 6] = [
    "timestamp",
    "rating",
    "review",
    "ai_response",
    "ai_summary",
    "ai_action",
];

/// On-disk row shape, matched to the header by column name
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    timestamp: String,
    rating: i64,
    review: String,
    ai_response: String,
    ai_summary: String,
    ai_action: String,
}

impl From<&FeedbackRecord> for CsvRow {
    fn from(record: &FeedbackRecord) -> Self {
        Self {
            timestamp: format_timestamp(&record.timestamp),
            rating: record.rating,
            review: record.review.clone(),
            ai_response: record.ai_response.clone(),
            ai_summary: record.ai_summary.clone(),
            ai_action: record.ai_action.clone(),
        }
    }
}

impl TryFrom<CsvRow> for FeedbackRecord {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        Ok(Self {
            timestamp: parse_timestamp(&row.timestamp)?,
            rating: row.rating,
            review: row.review,
            ai_response: row.ai_response,
            ai_summary: row.ai_summary,
            ai_action: row.ai_action,
        })
    }
}

/// Append-only CSV feedback store
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create the file with its header row if it is missing or empty
fn ensure_initialized(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let needs_header = match fs::metadata(path) {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
        Err(e) => return Err(e.into()),
    };

    if needs_header {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(CSV_HEADERS)?;
        writer.flush()?;
        debug!(path = %path.display(), "Created feedback CSV with header");
    }

    Ok(())
}

fn append_blocking(path: &Path, record: &FeedbackRecord) -> Result<()> {
    ensure_initialized(path)?;

    let file = OpenOptions::new().append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.serialize(CsvRow::from(record))?;
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?
        .sync_data()?;

    Ok(())
}

fn read_all_blocking(path: &Path) -> Result<Vec<FeedbackRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<CsvRow>()
        .map(|row| -> Result<FeedbackRecord> { FeedbackRecord::try_from(row?) })
        .collect()
}

#[async_trait]
impl FeedbackStore for CsvFileStore {
    async fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || append_blocking(&path, &record))
            .await
            .map_err(|e| Error::Internal(format!("CSV append task failed: {}", e)))?
    }

    async fn list_all(&self) -> Result<Vec<FeedbackRecord>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_all_blocking(&path))
            .await
            .map_err(|e| Error::Internal(format!("CSV read task failed: {}", e)))?
    }

    fn backend_name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(review: &str) -> FeedbackRecord {
        FeedbackRecord::new(4, review, "Thanks!", "Positive", "None")
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.csv");

        append_blocking(&path, &sample("first")).unwrap();
        append_blocking(&path, &sample("second")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let header_lines = contents
            .lines()
            .filter(|line| *line == CSV_HEADERS.join(","))
            .count();
        assert_eq!(header_lines, 1);
        assert!(contents.starts_with("timestamp,rating,review,ai_response,ai_summary,ai_action"));
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        fs::write(&path, "").unwrap();

        append_blocking(&path, &sample("after empty")).unwrap();

        let records = read_all_blocking(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].review, "after empty");
    }

    #[test]
    fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("feedback.csv");

        append_blocking(&path, &sample("nested")).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_read_missing_file_is_empty_and_does_not_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        assert!(read_all_blocking(&path).unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_reads_legacy_naive_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legacy.csv");
        fs::write(
            &path,
            "timestamp,rating,review,ai_response,ai_summary,ai_action\r\n\
             2025-01-05T10:11:12.345678,3,\"Okay, I guess\",Thanks ,Mixed ,Follow up \r\n",
        )
        .unwrap();

        let records = read_all_blocking(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, 3);
        assert_eq!(records[0].review, "Okay, I guess");
        assert_eq!(records[0].ai_response, "Thanks ");
    }

    #[test]
    fn test_non_integer_rating_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(
            &path,
            "timestamp,rating,review,ai_response,ai_summary,ai_action\n\
             2025-01-05T10:11:12Z,five,x,y,z,w\n",
        )
        .unwrap();

        assert!(matches!(read_all_blocking(&path), Err(Error::Csv(_))));
    }
}
