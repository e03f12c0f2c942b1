/// Motivator - posts a short motivational quote, usually with a picture, to a Telegram chat.
///
/// Each invocation is one run:
/// 1. Generate a quote (chat model, public quote APIs, or a built-in list),
///    falling back to a fixed line if generation keeps failing
/// 2. Fetch an image from a preference-ordered list of hosts, or use a poster
///    rendered by the model
/// 3. Post a photo with caption, or plain text when no image is available
///
/// # Architecture
///
/// The crate uses:
/// - reqwest for every HTTP call (`OpenAI`-compatible API, image hosts, Telegram)
/// - a retry executor with exponential backoff and an ordered source fallback
/// - Tokio for the async runtime (stages run strictly one after another)
///
/// # Example
///
/// ```no_run
/// use motivator::core::config::AppConfig;
/// use motivator::worker::Orchestrator;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     motivator::setup_logging();
///
///     let config = AppConfig::from_lookup(|key| match key {
///         "OPENAI_API_KEY" => Some("dummy_openai_key".to_string()),
///         "TELEGRAM_BOT_TOKEN" => Some("123:dummy".to_string()),
///         "TELEGRAM_CHAT_ID" => Some("-1001234567890".to_string()),
///         "CONTENT_SOURCE" => Some("static".to_string()),
///         _ => None,
///     })?;
///
///     let report = Orchestrator::from_config(&config)?.run().await?;
///     println!("Delivered as {:?}", report.outcome);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod clients;
pub mod content;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod resilience;
pub mod utils;
pub mod worker;

pub use errors::BotError;

/// Configure structured JSON logging.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// motivator::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
