use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::ContentGenerator;
use crate::clients::QuoteClient;
use crate::clients::quotes::QuoteProvider;
use crate::core::models::{ContentItem, GenerationParams};
use crate::errors::BotError;
use crate::resilience::{RetryPolicy, Sleeper, first_success};
use crate::utils::text::truncate_chars;

/// Pulls a quote from public quote APIs, trying providers in order.
pub struct QuoteApiGenerator {
    client: QuoteClient,
    providers: Vec<QuoteProvider>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl QuoteApiGenerator {
    #[must_use]
    pub fn new(
        client: QuoteClient,
        providers: Vec<QuoteProvider>,
        policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            client,
            providers,
            policy,
            sleeper,
        }
    }
}

#[async_trait]
impl ContentGenerator for QuoteApiGenerator {
    fn name(&self) -> &'static str {
        "quotes"
    }

    async fn generate(&self, params: &GenerationParams) -> Result<ContentItem, BotError> {
        let client = &self.client;
        let fetched = first_success(
            &self.providers,
            &self.policy,
            self.sleeper.as_ref(),
            |provider: &QuoteProvider| {
                let provider = provider.clone();
                async move { client.fetch(&provider).await }
            },
        )
        .await?;

        info!(
            "Quote provider {} answered",
            self.providers[fetched.source_index]
        );
        Ok(ContentItem::text(truncate_chars(
            &fetched.value,
            params.max_chars,
        )))
    }
}
