//! Ordered fallback across alternative sources for one logical operation.

use std::future::Future;
use tracing::warn;

use super::retry::{RetryPolicy, Sleeper, retry};
use crate::errors::BotError;

/// Value produced by a source, with the position of the source that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    pub source_index: usize,
}

/// Try `sources` top to bottom, each under its own `policy` budget, and
/// return the first success. A source is only attempted once every source
/// ahead of it has failed.
///
/// # Errors
///
/// Returns [`BotError::SourcesExhausted`] carrying the last source's failure
/// when nothing succeeds.
pub async fn first_success<S, F, Fut, T>(
    sources: &[S],
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut fetch: F,
) -> Result<Fetched<T>, BotError>
where
    S: std::fmt::Display,
    F: FnMut(&S) -> Fut,
    Fut: Future<Output = Result<T, BotError>>,
{
    let mut last = None;

    for (index, source) in sources.iter().enumerate() {
        match retry(policy, sleeper, || fetch(source)).await {
            Ok(value) => {
                return Ok(Fetched {
                    value,
                    source_index: index,
                });
            }
            Err(e) => {
                warn!(source = %source, error = %e, "source failed, moving to the next one");
                last = Some(Box::new(e));
            }
        }
    }

    Err(BotError::SourcesExhausted {
        sources: sources.len(),
        last,
    })
}
