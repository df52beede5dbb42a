//! AI response generator
//!
//! Turns a review and rating into three texts: a reply for the user, a
//! one-line summary and a recommended action for the admin view.
//!
//! The text-generation provider sits behind [`TextOracle`]. Generation never
//! fails from the caller's point of view: with no provider configured, or
//! when the provider errors, the fixed [`AiOutputs::fallback`] triple is
//! returned instead.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

mod gemini;
mod parser;
mod prompt;

pub use gemini::GeminiClient;
pub use parser::{parse_response, ADMIN_ACTION_MARKER, ADMIN_SUMMARY_MARKER, USER_RESPONSE_MARKER};
pub use prompt::build_prompt;

pub const FALLBACK_USER_RESPONSE: &str =
    "Thank you for your feedback! We appreciate you taking the time to share your experience.";
pub const FALLBACK_SUMMARY: &str = "AI summary unavailable.";
pub const FALLBACK_ACTION: &str = "Review this feedback manually.";

/// Text-generation provider errors
#[derive(Debug, Error)]
pub enum OracleError {
    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Provider returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Failed to parse provider response JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider answered without any text
    #[error("Empty response from provider")]
    EmptyResponse,
}

/// Single-shot text generation
#[async_trait]
pub trait TextOracle: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, OracleError>;
}

/// The three generated texts for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiOutputs {
    pub user_response: String,
    pub summary: String,
    pub action: String,
}

impl AiOutputs {
    /// Canned triple used when no provider is available
    pub fn fallback() -> Self {
        Self {
            user_response: FALLBACK_USER_RESPONSE.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
            action: FALLBACK_ACTION.to_string(),
        }
    }
}

/// Prompt builder, provider call and response parser in one
#[derive(Clone)]
pub struct ResponseGenerator {
    oracle: Option<Arc<dyn TextOracle>>,
}

impl ResponseGenerator {
    pub fn new(oracle: Arc<dyn TextOracle>) -> Self {
        Self {
            oracle: Some(oracle),
        }
    }

    /// Generator that always answers with the fallback triple
    pub fn fallback_only() -> Self {
        Self { oracle: None }
    }

    /// Whether a provider is configured
    pub fn is_enabled(&self) -> bool {
        self.oracle.is_some()
    }

    pub async fn generate(&self, review: &str, rating: i64) -> AiOutputs {
        let Some(oracle) = &self.oracle else {
            info!("No text-generation provider configured, using fallback response");
            return AiOutputs::fallback();
        };

        let prompt = build_prompt(review, rating);

        match oracle.generate_text(&prompt).await {
            Ok(raw) => {
                let text = raw.trim();
                debug!(raw_output = %text, "Model output received");
                let outputs = parse_response(text);
                if outputs.user_response.is_empty() {
                    warn!("Model output had no user response section");
                }
                outputs
            }
            Err(e) => {
                warn!(error = %e, "Text generation failed, using fallback response");
                AiOutputs::fallback()
            }
        }
    }
}
