//! Image host client
//!
//! Downloads raw image bytes from templated URLs. Each template carries a
//! `{cache}` placeholder that is replaced with a per-run value so hosts and
//! intermediate caches hand out a fresh picture.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::errors::BotError;
use crate::utils::mime::is_image_content_type;

/// Placeholder substituted with the run's cache-busting value.
pub const CACHE_PLACEHOLDER: &str = "{cache}";

const DEFAULT_TEMPLATES: [&str; 3] = [
    "https://source.unsplash.com/1920x1080/?nature,landscape,mountains,forest&sig={cache}",
    "https://picsum.photos/seed/{cache}/1920/1080",
    "https://picsum.photos/1920/1080?random={cache}",
];

/// One candidate image endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    template: String,
}

impl ImageSource {
    /// # Errors
    ///
    /// Returns a configuration error when the template does not form a valid
    /// URL once the placeholder is filled in.
    pub fn from_template(template: &str) -> Result<Self, BotError> {
        let source = Self {
            template: template.to_string(),
        };
        source.resolve("0")?;
        Ok(source)
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// # Errors
    ///
    /// Returns an error if the filled-in template is not a valid URL.
    pub fn resolve(&self, cache_buster: &str) -> Result<Url, BotError> {
        Ok(Url::parse(&self.template.replace(CACHE_PLACEHOLDER, cache_buster))?)
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Preference-ordered default sources: best pictures first, most reliable last.
#[must_use]
pub fn default_sources() -> Vec<ImageSource> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|t| ImageSource {
            template: (*t).to_string(),
        })
        .collect()
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download one image. A single attempt; retries belong to the caller.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, BotError>;
}

pub struct HttpImageFetcher {
    http: Client,
}

impl HttpImageFetcher {
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, BotError> {
        debug!("Fetching image from {}", url);
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Image host {} returned status {}", url, status);
            return Err(BotError::ImageHost {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            && !is_image_content_type(content_type)
        {
            return Err(BotError::invalid(
                url.as_str(),
                format!("expected an image, got {content_type}"),
            ));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(BotError::invalid(url.as_str(), "empty image body"));
        }
        Ok(bytes.to_vec())
    }
}
