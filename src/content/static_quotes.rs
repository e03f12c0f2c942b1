use async_trait::async_trait;
use rand::seq::SliceRandom;

use super::ContentGenerator;
use crate::core::models::{ContentItem, GenerationParams};
use crate::errors::BotError;
use crate::utils::text::truncate_chars;

pub const STUDY_QUOTES: [&str; 10] = [
    "Consistency beats intensity. One focused hour daily changes everything.",
    "Today’s revision is tomorrow’s confidence.",
    "Small steps daily create massive results. Start now.",
    "Focus on the next question, not the whole syllabus.",
    "No zero days. Even 20 minutes counts.",
    "Calm mind, clear plan, ruthless execution.",
    "Discipline is doing it even when motivation is missing.",
    "Win the morning: study first, excuses later.",
    "Your future score depends on today’s effort.",
    "Practice today so exam day feels familiar.",
];

/// Picks a random line from a fixed list. Never fails.
#[derive(Debug, Clone)]
pub struct StaticQuotes {
    quotes: Vec<String>,
}

impl Default for StaticQuotes {
    fn default() -> Self {
        Self::new(STUDY_QUOTES.iter().map(ToString::to_string).collect())
    }
}

impl StaticQuotes {
    #[must_use]
    pub fn new(quotes: Vec<String>) -> Self {
        Self { quotes }
    }
}

#[async_trait]
impl ContentGenerator for StaticQuotes {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn generate(&self, params: &GenerationParams) -> Result<ContentItem, BotError> {
        let quote = self
            .quotes
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| BotError::Config("static quote list is empty".to_string()))?;
        Ok(ContentItem::text(truncate_chars(quote, params.max_chars)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picks_from_list() {
        let item = StaticQuotes::default()
            .generate(&GenerationParams::default())
            .await
            .unwrap();
        assert!(STUDY_QUOTES.contains(&item.text.as_str()));
        assert!(item.image.is_none());
    }

    #[tokio::test]
    async fn test_empty_list_is_permanent_error() {
        let err = StaticQuotes::new(Vec::new())
            .generate(&GenerationParams::default())
            .await
            .unwrap_err();
        assert!(!err.is_transient());
    }
}
