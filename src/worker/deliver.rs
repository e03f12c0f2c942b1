use tracing::{error, info, warn};

use crate::clients::DeliverySink;
use crate::core::models::DeliveryOutcome;
use crate::errors::BotError;
use crate::utils::text::truncate_chars;

/// Deliver `message` once: as a photo caption when an image is at hand,
/// otherwise (or when the photo is refused) as plain text. The text attempt
/// happens at most once.
///
/// # Errors
///
/// Returns `Undelivered` wrapping the text attempt's error when nothing got
/// through.
pub async fn deliver(
    sink: &dyn DeliverySink,
    message: &str,
    image: Option<&[u8]>,
) -> Result<DeliveryOutcome, BotError> {
    if let Some(bytes) = image {
        let caption = truncate_chars(message, sink.caption_limit());
        match sink.send_photo(bytes, &caption).await {
            Ok(()) => {
                info!("Posted photo with caption ({} chars)", caption.chars().count());
                return Ok(DeliveryOutcome::Photo);
            }
            Err(e) => warn!("Photo delivery failed, falling back to text: {}", e),
        }
    }

    let text = truncate_chars(message, sink.text_limit());
    match sink.send_text(&text).await {
        Ok(()) => {
            info!("Posted text message ({} chars)", text.chars().count());
            Ok(DeliveryOutcome::Text)
        }
        Err(e) => {
            error!("Text delivery failed: {}", e);
            Err(BotError::Undelivered(Box::new(e)))
        }
    }
}
