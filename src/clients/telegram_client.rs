//! Telegram Bot API client module
//!
//! Sends the run's message to a single chat, either as a photo with a caption
//! or as plain text.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::error;

use crate::errors::BotError;
use crate::utils::mime::{image_file_name, image_mime};

/// Telegram's documented limit for photo captions.
pub const CAPTION_LIMIT: usize = 1024;

/// Telegram's documented limit for `sendMessage` text.
pub const MESSAGE_LIMIT: usize = 4096;

/// Where a run's message ends up.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Post `image` with `caption`. The caption is expected to fit already.
    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), BotError>;

    /// Post `text` without attachment.
    async fn send_text(&self, text: &str) -> Result<(), BotError>;

    fn caption_limit(&self) -> usize {
        CAPTION_LIMIT
    }

    fn text_limit(&self) -> usize {
        MESSAGE_LIMIT
    }
}

/// Build the JSON payload for `sendMessage`.
#[must_use]
pub fn build_message_payload(chat_id: &str, text: &str) -> Value {
    json!({
        "chat_id": chat_id,
        "text": text,
    })
}

pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(
        api_base: &str,
        token: String,
        chat_id: String,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            chat_id,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }

    /// Any non-2xx reply becomes a `Delivery` error carrying status and body.
    async fn check(response: reqwest::Response, method: &str) -> Result<(), BotError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        error!("Telegram {} failed: status={} body={}", method, status, body);
        Err(BotError::Delivery {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DeliverySink for TelegramClient {
    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), BotError> {
        let photo = Part::bytes(image.to_vec())
            .file_name(image_file_name(image))
            .mime_str(&image_mime(image))?;

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part("photo", photo);

        let response = self
            .http
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .send()
            .await?;

        Self::check(response, "sendPhoto").await
    }

    async fn send_text(&self, text: &str) -> Result<(), BotError> {
        let response = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&build_message_payload(&self.chat_id, text))
            .send()
            .await?;

        Self::check(response, "sendMessage").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url_strips_trailing_slash() {
        let client = TelegramClient::new(
            "https://api.telegram.org/",
            "123:abc".to_string(),
            "-100".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.method_url("sendPhoto"),
            "https://api.telegram.org/bot123:abc/sendPhoto"
        );
    }

    #[test]
    fn test_message_payload() {
        let payload = build_message_payload("-100", "hi");
        assert_eq!(payload["chat_id"], "-100");
        assert_eq!(payload["text"], "hi");
    }
}
