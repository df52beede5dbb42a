//! # Feedback Common Library
//!
//! Shared code for the feedback service including:
//! - The `FeedbackRecord` entity
//! - Persistence adapters (CSV file and SQLite)
//! - Configuration loading
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod record;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use record::FeedbackRecord;
pub use store::{open_store, FeedbackStore, StorageBackend};
