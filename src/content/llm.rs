use async_trait::async_trait;
use tracing::{info, warn};

use super::ContentGenerator;
use crate::clients::LlmClient;
use crate::core::models::{ContentItem, GenerationParams};
use crate::errors::BotError;

/// Writes the quote with a chat model and, on request, renders a poster.
pub struct LlmGenerator {
    client: LlmClient,
}

impl LlmGenerator {
    #[must_use]
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentGenerator for LlmGenerator {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn generate(&self, params: &GenerationParams) -> Result<ContentItem, BotError> {
        let text = self
            .client
            .generate_quote(&params.theme, params.max_chars)
            .await?;
        let item = ContentItem::text(text);

        if !params.with_image {
            return Ok(item);
        }

        // A missing poster must not cost us the quote.
        match self
            .client
            .generate_poster(&item.text, &params.theme, &params.image_size)
            .await
        {
            Ok(bytes) => {
                info!("Poster rendered ({} bytes)", bytes.len());
                Ok(item.with_image(bytes))
            }
            Err(e) => {
                warn!("Poster generation failed, continuing without it: {}", e);
                Ok(item)
            }
        }
    }
}
