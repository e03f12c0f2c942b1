#![allow(dead_code)]

use async_trait::async_trait;
use motivator::BotError;
use motivator::clients::{DeliverySink, ImageFetcher};
use motivator::content::ContentGenerator;
use motivator::core::models::{ContentItem, GenerationParams};
use motivator::resilience::Sleeper;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Records requested backoff delays instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

pub fn network_error() -> BotError {
    BotError::HttpError("connection reset".to_string())
}

pub fn auth_error() -> BotError {
    BotError::Unauthorized {
        service: "openai".to_string(),
        status: 401,
    }
}

/// One scripted generator outcome; errors are built fresh on each call.
pub type Step = Result<ContentItem, fn() -> BotError>;

pub fn step_ok(text: &str) -> Step {
    Ok(ContentItem::text(text))
}

pub fn step_err(make: fn() -> BotError) -> Step {
    Err(make)
}

/// Generator that replays a script of outcomes, then keeps repeating the last.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Step>>,
    pub calls: Mutex<u32>,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn ok(text: &str) -> Self {
        Self::new(vec![step_ok(text)])
    }

    pub fn failing(error: fn() -> BotError) -> Self {
        Self::new(vec![step_err(error)])
    }

    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, _params: &GenerationParams) -> Result<ContentItem, BotError> {
        *self.calls.lock().unwrap() += 1;
        let mut script = self.script.lock().unwrap();
        let next = if script.len() > 1 {
            script.pop_front()
        } else {
            script.front().cloned()
        };
        match next.expect("script must not be empty") {
            Ok(item) => Ok(item),
            Err(make) => Err(make()),
        }
    }
}

/// Fetcher answering per URL host: hosts listed in `working` return `bytes`,
/// everything else fails transiently. Every requested URL is recorded.
pub struct MockFetcher {
    working: Vec<String>,
    bytes: Vec<u8>,
    pub requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new(working: &[&str], bytes: &[u8]) -> Self {
        Self {
            working: working.iter().map(ToString::to_string).collect(),
            bytes: bytes.to_vec(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn all_failing() -> Self {
        Self::new(&[], b"")
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, BotError> {
        self.requests.lock().unwrap().push(url.to_string());
        let host = url.host_str().unwrap_or_default().to_string();
        if self.working.contains(&host) {
            Ok(self.bytes.clone())
        } else {
            Err(BotError::ImageHost {
                url: url.to_string(),
                status: 503,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Photo { caption: String, image: Vec<u8> },
    Text(String),
}

/// Sink that records every call and fails the kinds it is told to fail.
#[derive(Default)]
pub struct RecordingSink {
    pub fail_photo: bool,
    pub fail_text: bool,
    pub calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliverySink for RecordingSink {
    async fn send_photo(&self, image: &[u8], caption: &str) -> Result<(), BotError> {
        self.calls.lock().unwrap().push(SinkCall::Photo {
            caption: caption.to_string(),
            image: image.to_vec(),
        });
        if self.fail_photo {
            Err(BotError::Delivery {
                status: 400,
                body: r#"{"ok":false,"description":"Bad Request: IMAGE_PROCESS_FAILED"}"#.into(),
            })
        } else {
            Ok(())
        }
    }

    async fn send_text(&self, text: &str) -> Result<(), BotError> {
        self.calls.lock().unwrap().push(SinkCall::Text(text.to_string()));
        if self.fail_text {
            Err(BotError::Delivery {
                status: 500,
                body: "Internal Server Error".into(),
            })
        } else {
            Ok(())
        }
    }
}
