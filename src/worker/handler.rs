use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::acquire::acquire_image;
use super::deliver::deliver;
use super::generate::generate_content;
use crate::clients::{DeliverySink, HttpImageFetcher, ImageFetcher, ImageSource, TelegramClient};
use crate::content::{self, ContentGenerator};
use crate::core::config::{AppConfig, ImageMode};
use crate::core::models::{GenerationParams, ImageOrigin, RunReport};
use crate::errors::BotError;
use crate::resilience::{RetryPolicy, Sleeper, TokioSleeper};
use crate::utils::text::build_caption;

/// The parts of [`AppConfig`] a run actually consults.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub params: GenerationParams,
    pub image_mode: ImageMode,
    pub image_sources: Vec<ImageSource>,
    pub generation_retry: RetryPolicy,
    pub image_retry: RetryPolicy,
    pub hashtags: String,
}

impl From<&AppConfig> for RunSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            params: config.params.clone(),
            image_mode: config.image_mode,
            image_sources: config.image_sources.clone(),
            generation_retry: config.generation_retry.clone(),
            image_retry: config.image_retry.clone(),
            hashtags: config.hashtags.clone(),
        }
    }
}

/// Produces one message and delivers it.
pub struct Orchestrator {
    generator: Box<dyn ContentGenerator>,
    fetcher: Box<dyn ImageFetcher>,
    sink: Box<dyn DeliverySink>,
    sleeper: Arc<dyn Sleeper>,
    settings: RunSettings,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        generator: Box<dyn ContentGenerator>,
        fetcher: Box<dyn ImageFetcher>,
        sink: Box<dyn DeliverySink>,
        sleeper: Arc<dyn Sleeper>,
        settings: RunSettings,
    ) -> Self {
        Self {
            generator,
            fetcher,
            sink,
            sleeper,
            settings,
        }
    }

    /// Wire up the real clients described by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the selected generator or an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
        let generator = content::from_config(config, Arc::clone(&sleeper))?;
        let fetcher = Box::new(HttpImageFetcher::new(config.timeouts.image)?);
        let sink = Box::new(TelegramClient::new(
            &config.telegram_api_base,
            config.telegram_bot_token.clone(),
            config.telegram_chat_id.clone(),
            config.timeouts.telegram,
        )?);

        Ok(Self::new(generator, fetcher, sink, sleeper, RunSettings::from(config)))
    }

    /// Execute one run, using the current Unix time as the cache-busting value.
    ///
    /// # Errors
    ///
    /// Only fails when neither the photo nor the text message could be delivered.
    pub async fn run(&self) -> Result<RunReport, BotError> {
        let cache_buster = chrono::Utc::now().timestamp().to_string();
        self.run_with_cache_buster(&cache_buster).await
    }

    /// # Errors
    ///
    /// Only fails when neither the photo nor the text message could be delivered.
    pub async fn run_with_cache_buster(&self, cache_buster: &str) -> Result<RunReport, BotError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id, generator = self.generator.name());
        self.execute(run_id, cache_buster).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid, cache_buster: &str) -> Result<RunReport, BotError> {
        let settings = &self.settings;
        let sleeper = self.sleeper.as_ref();

        let generated = generate_content(
            self.generator.as_ref(),
            &settings.params,
            &settings.generation_retry,
            sleeper,
        )
        .await;
        info!("Quote used: {}", generated.item.text);

        let (image, origin) = match (generated.item.image, settings.image_mode) {
            (_, ImageMode::Off) => (None, ImageOrigin::Absent),
            (Some(bytes), _) => (Some(bytes), ImageOrigin::Generated),
            (None, _) => match acquire_image(
                self.fetcher.as_ref(),
                &settings.image_sources,
                cache_buster,
                &settings.image_retry,
                sleeper,
            )
            .await
            {
                Ok(acquired) => (Some(acquired.bytes), ImageOrigin::Fetched(acquired.url)),
                Err(e) => {
                    warn!("Image acquisition failed, sending text only: {}", e);
                    (None, ImageOrigin::Absent)
                }
            },
        };

        let message = build_caption(&generated.item.text, &settings.hashtags);
        let outcome = deliver(self.sink.as_ref(), &message, image.as_deref()).await?;
        info!("Run finished with {:?} delivery", outcome);

        Ok(RunReport {
            run_id,
            text: generated.item.text,
            used_fallback_text: generated.used_fallback,
            image: origin,
            outcome,
        })
    }
}
