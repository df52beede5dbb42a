//! Command-line arguments
//!
//! Each option also reads an environment variable; clap gives the command
//! line precedence over the environment.

use clap::Parser;
use feedback_common::config::ConfigOverrides;
use feedback_common::StorageBackend;
use std::path::PathBuf;

/// Command-line arguments for feedback-server
#[derive(Parser, Debug)]
#[command(name = "feedback-server")]
#[command(about = "Two-dashboard AI feedback service")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "FEEDBACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on (host:port)
    #[arg(short, long, env = "FEEDBACK_BIND")]
    pub bind: Option<String>,

    /// Storage backend: csv or sqlite
    #[arg(short, long, env = "FEEDBACK_STORAGE")]
    pub storage: Option<StorageBackend>,

    /// CSV file location
    #[arg(long, env = "CSV_PATH")]
    pub csv_path: Option<PathBuf>,

    /// SQLite database location
    #[arg(long, env = "FEEDBACK_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Gemini API key (fallback responses when unset)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub base_url: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bind: self.bind.clone(),
            storage: self.storage,
            csv_path: self.csv_path.clone(),
            db_path: self.db_path.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
