use tracing::{error, info};

use crate::content::{ContentGenerator, FALLBACK_TEXT};
use crate::core::models::{ContentItem, GenerationParams};
use crate::resilience::{RetryPolicy, Sleeper, retry};

/// Result of the generation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub item: ContentItem,
    /// True when the generator gave up and [`FALLBACK_TEXT`] was used.
    pub used_fallback: bool,
}

/// Run the generator under `policy`. Exhaustion or a permanent failure
/// degrades to [`FALLBACK_TEXT`]; this stage never fails the run.
pub async fn generate_content(
    generator: &dyn ContentGenerator,
    params: &GenerationParams,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Generated {
    match retry(policy, sleeper, move || generator.generate(params)).await {
        Ok(item) => {
            info!(
                "Generator {} produced {} chars (image: {})",
                generator.name(),
                item.text.chars().count(),
                item.image.is_some()
            );
            Generated {
                item,
                used_fallback: false,
            }
        }
        Err(e) => {
            error!(
                "Generator {} failed, using fallback text: {}",
                generator.name(),
                e
            );
            Generated {
                item: ContentItem::text(FALLBACK_TEXT),
                used_fallback: true,
            }
        }
    }
}
