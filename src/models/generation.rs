use crate::error::{Result, StudioError};
use crate::prompt;
use serde::Serialize;

/// A validated generation request, immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub count: u32,
    #[serde(skip_serializing)]
    pub image: Vec<u8>,
    pub filename: String,
    pub mime: String,
}

impl GenerationRequest {
    /// Build a request from raw form state. The prompt is normalized with the
    /// face-preservation suffix; blank prompts, missing image bytes and an
    /// out-of-range count are rejected before any network call.
    pub fn new(
        prompt: &str,
        count: u32,
        image: Vec<u8>,
        filename: impl Into<String>,
        mime: impl Into<String>,
        max_count: u32,
    ) -> Result<Self> {
        let prompt = prompt::normalize(prompt);
        if prompt.is_empty() {
            return Err(StudioError::ValidationError(
                "Please enter a prompt before generating a hairstyle".into(),
            ));
        }
        if image.is_empty() {
            return Err(StudioError::ValidationError(
                "Please upload or capture an image first".into(),
            ));
        }
        if count == 0 || count > max_count {
            return Err(StudioError::ValidationError(format!(
                "Hairstyle count must be between 1 and {}",
                max_count
            )));
        }

        Ok(Self {
            prompt,
            count,
            image,
            filename: filename.into(),
            mime: mime.into(),
        })
    }
}

/// One generated image paired with its ordering index.
#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    pub index: i64,
    #[serde(skip_serializing)]
    pub image: Vec<u8>,
}
