//! Public quote API clients (ZenQuotes, Quotable)

use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::errors::BotError;
use crate::utils::text::attribute;

pub const ZENQUOTES_URL: &str = "https://zenquotes.io/api/random";
pub const QUOTABLE_URL: &str = "https://api.quotable.io/random?tags=motivational|inspirational";

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    #[serde(default)]
    a: String,
}

#[derive(Debug, Deserialize)]
struct QuotableQuote {
    content: String,
    #[serde(default)]
    author: String,
}

/// Response shape of a quote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteFormat {
    /// `[{"q": "...", "a": "..."}]`
    ZenQuotes,
    /// `{"content": "...", "author": "..."}`
    Quotable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteProvider {
    pub name: &'static str,
    pub url: Url,
    pub format: QuoteFormat,
}

impl fmt::Display for QuoteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// ZenQuotes first, Quotable second.
///
/// # Errors
///
/// Only fails if the built-in URLs stop parsing.
pub fn default_providers() -> Result<Vec<QuoteProvider>, BotError> {
    Ok(vec![
        QuoteProvider {
            name: "zenquotes",
            url: Url::parse(ZENQUOTES_URL)?,
            format: QuoteFormat::ZenQuotes,
        },
        QuoteProvider {
            name: "quotable",
            url: Url::parse(QUOTABLE_URL)?,
            format: QuoteFormat::Quotable,
        },
    ])
}

/// Turn a provider's JSON body into `quote — author`.
///
/// # Errors
///
/// Returns `InvalidResponse` when the body does not match the provider's
/// shape or holds an empty quote.
pub fn parse_quote(format: QuoteFormat, service: &str, body: &str) -> Result<String, BotError> {
    let (quote, author) = match format {
        QuoteFormat::ZenQuotes => {
            let mut items: Vec<ZenQuote> =
                serde_json::from_str(body).map_err(|e| BotError::invalid(service, e))?;
            if items.is_empty() {
                return Err(BotError::invalid(service, "empty quote list"));
            }
            let first = items.swap_remove(0);
            (first.q, first.a)
        }
        QuoteFormat::Quotable => {
            let item: QuotableQuote =
                serde_json::from_str(body).map_err(|e| BotError::invalid(service, e))?;
            (item.content, item.author)
        }
    };

    if quote.trim().is_empty() {
        return Err(BotError::invalid(service, "quote text is empty"));
    }
    Ok(attribute(&quote, &author))
}

pub struct QuoteClient {
    http: Client,
}

impl QuoteClient {
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch one attributed quote. A single attempt.
    ///
    /// # Errors
    ///
    /// Returns network, status or parse errors from the provider.
    pub async fn fetch(&self, provider: &QuoteProvider) -> Result<String, BotError> {
        let response = self.http.get(provider.url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BotError::from_status(provider.name, status.as_u16(), body));
        }
        parse_quote(provider.format, provider.name, &body)
    }
}
