use tracing::info;

use crate::clients::{ImageFetcher, ImageSource};
use crate::errors::BotError;
use crate::resilience::{RetryPolicy, Sleeper, first_success};

/// Bytes of the downloaded image and the URL that served them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    pub bytes: Vec<u8>,
    pub url: String,
}

/// Download one image, walking `sources` in preference order.
///
/// # Errors
///
/// Returns `SourcesExhausted` when every source used up its retry budget or
/// failed permanently.
pub async fn acquire_image(
    fetcher: &dyn ImageFetcher,
    sources: &[ImageSource],
    cache_buster: &str,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<AcquiredImage, BotError> {
    let fetched = first_success(sources, policy, sleeper, |source: &ImageSource| {
        let url = source.resolve(cache_buster);
        async move {
            let url = url?;
            let bytes = fetcher.fetch(&url).await?;
            Ok(AcquiredImage {
                bytes,
                url: url.to_string(),
            })
        }
    })
    .await?;

    info!(
        "Image fetched from source #{} ({}, {} bytes)",
        fetched.source_index + 1,
        fetched.value.url,
        fetched.value.bytes.len()
    );
    Ok(fetched.value)
}
