//! Client modules for external API interactions

pub mod image_host;
pub mod llm_client;
pub mod quotes;
pub mod telegram_client;

pub use image_host::{HttpImageFetcher, ImageFetcher, ImageSource};
pub use llm_client::LlmClient;
pub use quotes::QuoteClient;
pub use telegram_client::{DeliverySink, TelegramClient};
