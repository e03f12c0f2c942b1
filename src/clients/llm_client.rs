//! LLM (`OpenAI`-compatible) API client module
//!
//! Encapsulates the chat-completion call that writes the quote and the
//! image-generation call that renders a poster from it.

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::errors::BotError;
use crate::prompt::{SYSTEM_PROMPT, poster_prompt, quote_prompt};
use crate::utils::text::{clean_generated, truncate_chars};

const SERVICE: &str = "openai";

/// Rough token budget for a reply of `max_chars` characters.
#[must_use]
pub fn estimate_tokens(max_chars: usize) -> u32 {
    u32::try_from(max_chars / 4 + 16).unwrap_or(u32::MAX)
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

/// Pull the quote out of a chat-completion body and fit it to `max_chars`.
///
/// # Errors
///
/// Returns `InvalidResponse` when the body is malformed or the reply is empty.
pub fn parse_completion(body: &str, max_chars: usize) -> Result<String, BotError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| BotError::invalid(SERVICE, e))?;

    let text = parsed
        .choices
        .into_iter()
        .find_map(|c| c.message.content)
        .map(|raw| clean_generated(&raw))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| BotError::invalid(SERVICE, "No text in response"))?;

    Ok(truncate_chars(&text, max_chars))
}

/// Decode the first base64 image of an image-generation body.
///
/// # Errors
///
/// Returns `InvalidResponse` when no image is present or it is not valid base64.
pub fn parse_image(body: &str) -> Result<Vec<u8>, BotError> {
    let parsed: ImageResponse =
        serde_json::from_str(body).map_err(|e| BotError::invalid(SERVICE, e))?;

    let encoded = parsed
        .data
        .into_iter()
        .find_map(|d| d.b64_json)
        .ok_or_else(|| BotError::invalid(SERVICE, "No image in response"))?;

    general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| BotError::invalid(SERVICE, format!("bad base64 image: {e}")))
}

/// LLM API client for quotes and posters
pub struct LlmClient {
    http: Client,
    base_url: String,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    image_model: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        image_model: String,
        timeout: Duration,
    ) -> Result<Self, BotError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            org_id,
            model_name,
            image_model,
        })
    }

    fn headers(&self) -> Result<HeaderMap, BotError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| BotError::Config("OPENAI_API_KEY contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org) = &self.org_id {
            let org = HeaderValue::from_str(org)
                .map_err(|_| BotError::Config("OPENAI_ORG_ID contains invalid characters".into()))?;
            headers.insert("OpenAI-Organization", org);
        }
        Ok(headers)
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, BotError> {
        let response = self
            .http
            .post(format!("{}/{path}", self.base_url))
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());

        if !status.is_success() {
            return Err(BotError::from_status(SERVICE, status.as_u16(), text));
        }
        Ok(text)
    }

    /// Ask the model for one quote about `theme`.
    ///
    /// # Errors
    ///
    /// Returns network, status or parse errors from the API.
    pub async fn generate_quote(&self, theme: &str, max_chars: usize) -> Result<String, BotError> {
        let user_prompt = quote_prompt(theme, max_chars);

        #[cfg(feature = "debug-logs")]
        info!("Using quote prompt:\n{}", user_prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!("Requesting quote from model {}", self.model_name);

        let request = ChatCompletionRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: estimate_tokens(max_chars),
            temperature: 0.9,
        };

        let body = self.post_json("chat/completions", &request).await?;
        parse_completion(&body, max_chars)
    }

    /// Render a poster for `quote` and return the image bytes.
    ///
    /// # Errors
    ///
    /// Returns network, status or decoding errors from the API.
    pub async fn generate_poster(
        &self,
        quote: &str,
        theme: &str,
        size: &str,
    ) -> Result<Vec<u8>, BotError> {
        let prompt = poster_prompt(quote, theme);

        #[cfg(feature = "debug-logs")]
        info!("Using poster prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!("Requesting {} poster from model {}", size, self.image_model);

        let request = ImageRequest {
            model: &self.image_model,
            prompt: &prompt,
            size,
            n: 1,
        };

        let body = self.post_json("images/generations", &request).await?;
        parse_image(&body)
    }
}
