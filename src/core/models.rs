use uuid::Uuid;

/// Default topic handed to generators.
pub const DEFAULT_THEME: &str =
    "focused study and exam preparation for JEE and board exam students";

/// One run's content: a short text and, optionally, an image to go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub text: String,
    pub image: Option<Vec<u8>>,
}

impl ContentItem {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub theme: String,
    pub max_chars: usize,
    /// Ask the generator for an image derived from the text.
    pub with_image: bool,
    pub image_size: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            max_chars: 200,
            with_image: false,
            image_size: "1024x1024".to_string(),
        }
    }
}

/// Where the delivered image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    Generated,
    Fetched(String),
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Photo,
    Text,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: Uuid,
    pub text: String,
    pub used_fallback_text: bool,
    pub image: ImageOrigin,
    pub outcome: DeliveryOutcome,
}
