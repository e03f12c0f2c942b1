//! Content generators
//!
//! Every generator turns [`GenerationParams`] into one [`ContentItem`]. The
//! orchestrator picks exactly one of them from configuration and never cares
//! which.

pub mod llm;
pub mod quote_api;
pub mod static_quotes;

use async_trait::async_trait;
use std::sync::Arc;

use crate::clients::{LlmClient, QuoteClient};
use crate::core::config::{AppConfig, ContentSource};
use crate::core::models::{ContentItem, GenerationParams};
use crate::errors::BotError;
use crate::resilience::Sleeper;

pub use llm::LlmGenerator;
pub use quote_api::QuoteApiGenerator;
pub use static_quotes::StaticQuotes;

/// Text delivered when generation is exhausted.
pub const FALLBACK_TEXT: &str =
    "Consistency beats intensity. One focused hour daily changes everything.";

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Produce one item. A single attempt from the caller's point of view;
    /// the orchestrator owns the retry budget.
    async fn generate(&self, params: &GenerationParams) -> Result<ContentItem, BotError>;
}

/// Build the generator selected by `config.content_source`.
///
/// # Errors
///
/// Fails if an HTTP client cannot be built or a built-in provider URL
/// cannot be parsed.
pub fn from_config(
    config: &AppConfig,
    sleeper: Arc<dyn Sleeper>,
) -> Result<Box<dyn ContentGenerator>, BotError> {
    let generator: Box<dyn ContentGenerator> = match config.content_source {
        ContentSource::Llm => Box::new(LlmGenerator::new(LlmClient::new(
            &config.openai_base_url,
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_image_model.clone(),
            config.timeouts.generation,
        )?)),
        ContentSource::Quotes => Box::new(QuoteApiGenerator::new(
            QuoteClient::new(config.timeouts.quotes)?,
            crate::clients::quotes::default_providers()?,
            config.generation_retry.clone(),
            sleeper,
        )),
        ContentSource::Static => Box::new(StaticQuotes::default()),
    };
    Ok(generator)
}
