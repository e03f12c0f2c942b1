use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::clients::image_host::{ImageSource, default_sources};
use crate::core::models::{DEFAULT_THEME, GenerationParams};
use crate::errors::BotError;
use crate::resilience::RetryPolicy;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_HASHTAGS: &str = "#motivation #study #jee #boards";

/// Which generator produces the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Llm,
    Quotes,
    Static,
}

impl FromStr for ContentSource {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llm" | "openai" => Ok(Self::Llm),
            "quotes" | "quote-api" => Ok(Self::Quotes),
            "static" => Ok(Self::Static),
            other => Err(BotError::Config(format!(
                "CONTENT_SOURCE: unknown source '{other}' (expected llm, quotes or static)"
            ))),
        }
    }
}

/// How the run obtains its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Download from the image host list.
    Fetch,
    /// Ask the generator for a poster, then fall back to the host list.
    Generate,
    Off,
}

impl FromStr for ImageMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fetch" => Ok(Self::Fetch),
            "generate" | "poster" => Ok(Self::Generate),
            "off" | "none" => Ok(Self::Off),
            other => Err(BotError::Config(format!(
                "IMAGE_MODE: unknown mode '{other}' (expected fetch, generate or off)"
            ))),
        }
    }
}

/// Per-call HTTP timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    pub generation: Duration,
    pub quotes: Duration,
    pub image: Duration,
    pub telegram: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            generation: Duration::from_secs(90),
            quotes: Duration::from_secs(20),
            image: Duration::from_secs(60),
            telegram: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub content_source: ContentSource,
    pub openai_base_url: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_image_model: String,
    pub image_mode: ImageMode,
    pub image_sources: Vec<ImageSource>,
    pub hashtags: String,
    pub telegram_api_base: String,
    pub params: GenerationParams,
    pub generation_retry: RetryPolicy,
    pub image_retry: RetryPolicy,
    pub timeouts: Timeouts,
}

// Credentials never reach logs through `{:?}`.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("content_source", &self.content_source)
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_org_id", &self.openai_org_id)
            .field("openai_model", &self.openai_model)
            .field("openai_image_model", &self.openai_image_model)
            .field("image_mode", &self.image_mode)
            .field("image_sources", &self.image_sources)
            .field("hashtags", &self.hashtags)
            .field("telegram_api_base", &self.telegram_api_base)
            .field("params", &self.params)
            .field("generation_retry", &self.generation_retry)
            .field("image_retry", &self.image_retry)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Missing or blank
    /// credentials are fatal; optional knobs fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| BotError::Config(format!("{key}: required but not set")))
        };

        let openai_api_key = required("OPENAI_API_KEY")?;
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let content_source = get("CONTENT_SOURCE")
            .map(|v| v.parse::<ContentSource>())
            .transpose()?
            .unwrap_or(ContentSource::Llm);
        let image_mode = get("IMAGE_MODE")
            .map(|v| v.parse::<ImageMode>())
            .transpose()?
            .unwrap_or(ImageMode::Fetch);

        let image_sources = match get("IMAGE_SOURCES") {
            Some(raw) => parse_sources(&raw)?,
            None => default_sources(),
        };

        let params = GenerationParams {
            theme: get("CONTENT_THEME").unwrap_or_else(|| DEFAULT_THEME.to_string()),
            max_chars: parse_or(&get, "MAX_QUOTE_CHARS", 200)?,
            with_image: image_mode == ImageMode::Generate,
            image_size: get("IMAGE_SIZE").unwrap_or_else(|| "1024x1024".to_string()),
        };
        if params.max_chars == 0 {
            return Err(BotError::Config("MAX_QUOTE_CHARS: must be positive".into()));
        }

        let generation_retry = retry_policy(
            &get,
            "GENERATION",
            RetryPolicy::new(6, Duration::from_secs(1), 2.0, Duration::from_secs(60)),
        )?;
        let image_retry = retry_policy(&get, "IMAGE", RetryPolicy::default())?;

        let defaults = Timeouts::default();
        let timeouts = Timeouts {
            generation: secs_or(&get, "GENERATION_TIMEOUT_SECS", defaults.generation)?,
            quotes: secs_or(&get, "QUOTE_TIMEOUT_SECS", defaults.quotes)?,
            image: secs_or(&get, "IMAGE_TIMEOUT_SECS", defaults.image)?,
            telegram: secs_or(&get, "TELEGRAM_TIMEOUT_SECS", defaults.telegram)?,
        };

        Ok(Self {
            openai_api_key,
            telegram_bot_token,
            telegram_chat_id,
            content_source,
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_org_id: get("OPENAI_ORG_ID"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            openai_image_model: get("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|| "gpt-image-1".to_string()),
            image_mode,
            image_sources,
            // Blank means "no hashtags", so this one is read without the filter.
            hashtags: lookup("CAPTION_HASHTAGS")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| DEFAULT_HASHTAGS.to_string()),
            telegram_api_base: get("TELEGRAM_API_BASE")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
            params,
            generation_retry,
            image_retry,
            timeouts,
        })
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T, BotError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| BotError::Config(format!("{key}: invalid value '{raw}': {e}"))),
        None => Ok(default),
    }
}

fn secs_or<G>(get: &G, key: &str, default: Duration) -> Result<Duration, BotError>
where
    G: Fn(&str) -> Option<String>,
{
    parse_or(get, key, default.as_secs()).map(Duration::from_secs)
}

/// Read `{prefix}_RETRY_*` overrides on top of `defaults`.
fn retry_policy<G>(get: &G, prefix: &str, defaults: RetryPolicy) -> Result<RetryPolicy, BotError>
where
    G: Fn(&str) -> Option<String>,
{
    let key = |suffix: &str| format!("{prefix}_RETRY_{suffix}");

    let max_attempts: u32 = parse_or(get, &key("ATTEMPTS"), defaults.max_attempts)?;
    let base_ms: u64 = parse_or(
        get,
        &key("BASE_MS"),
        u64::try_from(defaults.base_delay.as_millis()).unwrap_or(u64::MAX),
    )?;
    let multiplier: f64 = parse_or(get, &key("MULTIPLIER"), defaults.multiplier)?;
    let max_ms: u64 = parse_or(
        get,
        &key("MAX_MS"),
        u64::try_from(defaults.max_delay.as_millis()).unwrap_or(u64::MAX),
    )?;
    let jitter: bool = parse_or(get, &key("JITTER"), defaults.jitter)?;

    if max_attempts == 0 {
        return Err(BotError::Config(format!("{}: must be at least 1", key("ATTEMPTS"))));
    }
    if !multiplier.is_finite() || multiplier < 1.0 {
        return Err(BotError::Config(format!(
            "{}: must be a finite number >= 1",
            key("MULTIPLIER")
        )));
    }

    Ok(RetryPolicy::new(
        max_attempts,
        Duration::from_millis(base_ms),
        multiplier,
        Duration::from_millis(max_ms),
    )
    .with_jitter(jitter))
}

fn parse_sources(raw: &str) -> Result<Vec<ImageSource>, BotError> {
    let sources: Vec<ImageSource> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ImageSource::from_template)
        .collect::<Result<_, _>>()?;

    if sources.is_empty() {
        return Err(BotError::Config("IMAGE_SOURCES: no templates given".into()));
    }
    Ok(sources)
}
