use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("{service} rejected the credentials (status {status})")]
    Unauthorized { service: String, status: u16 },

    #[error("{service} returned status {status}: {body}")]
    ApiStatus {
        service: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {service}: {message}")]
    InvalidResponse { service: String, message: String },

    #[error("Image host {url} returned status {status}")]
    ImageHost { url: String, status: u16 },

    #[error("Gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        source: Box<BotError>,
    },

    #[error("All {sources} sources failed")]
    SourcesExhausted {
        sources: usize,
        #[source]
        last: Option<Box<BotError>>,
    },

    #[error("Telegram returned status {status}: {body}")]
    Delivery { status: u16, body: String },

    #[error("Message could not be delivered: {0}")]
    Undelivered(#[source] Box<BotError>),
}

impl BotError {
    /// Map a non-2xx API reply to an error, separating credential problems.
    pub fn from_status(service: &str, status: u16, body: String) -> Self {
        match status {
            401 | 403 => BotError::Unauthorized {
                service: service.to_string(),
                status,
            },
            _ => BotError::ApiStatus {
                service: service.to_string(),
                status,
                body,
            },
        }
    }

    pub fn invalid(service: &str, message: impl std::fmt::Display) -> Self {
        BotError::InvalidResponse {
            service: service.to_string(),
            message: message.to_string(),
        }
    }

    /// Network and timeout class failures, plus server-side statuses.
    /// Everything else (auth, validation, exhaustion) is permanent.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            BotError::Timeout(_) | BotError::HttpError(_) | BotError::ImageHost { .. } => true,
            BotError::ApiStatus { status, .. } => {
                *status == 408 || *status == 429 || *status >= 500
            }
            _ => false,
        }
    }
}

// The URL is dropped from the message: Telegram carries the bot token in it.
impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        let error = error.without_url();
        if error.is_timeout() {
            BotError::Timeout(error.to_string())
        } else if error.is_builder() {
            BotError::Config(format!("HTTP client setup failed: {error}"))
        } else if error.is_connect() || error.is_request() || error.is_body() {
            BotError::HttpError(error.to_string())
        } else {
            BotError::invalid("http", error)
        }
    }
}

impl From<url::ParseError> for BotError {
    fn from(error: url::ParseError) -> Self {
        BotError::Config(format!("Invalid URL: {error}"))
    }
}
