//! Image-to-text: read ingredient names off a photo.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::image::{validate_image, ImageError};
use crate::llm::{LlmError, VisionProvider};
use crate::prompts::image_to_text::IMAGE_TO_TEXT_PROMPT_NAME;
use crate::prompts::render_image_to_text_prompt;

/// Prefix of the text returned when extraction fails.
pub const OCR_ERROR_PREFIX: &str = "OCR failed: ";

#[derive(Error, Debug)]
enum OcrError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// True when `text` is the failure string from [`ImageToText::extract_ingredients`].
pub fn is_ocr_error(text: &str) -> bool {
    text.starts_with(OCR_ERROR_PREFIX)
}

#[derive(Debug, Clone)]
pub struct ImageToText {
    provider: Arc<dyn VisionProvider>,
}

impl ImageToText {
    pub fn new(provider: Arc<dyn VisionProvider>) -> Self {
        Self { provider }
    }

    /// Detected text lines joined with ", ".
    ///
    /// Never fails: any error comes back as `"OCR failed: <cause>"`.
    pub async fn extract_ingredients(&self, image: &[u8]) -> String {
        match self.extract(image).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Image-to-text failed: {}", e);
                format!("{}{}", OCR_ERROR_PREFIX, e)
            }
        }
    }

    async fn extract(&self, image: &[u8]) -> Result<String, OcrError> {
        let mime_type = validate_image(image)?;
        let prompt = render_image_to_text_prompt();
        let reply = self
            .provider
            .complete_with_image(&prompt, image, &mime_type)
            .await?;
        debug!(prompt = IMAGE_TO_TEXT_PROMPT_NAME, reply = %reply, "Image-to-text reply");
        Ok(join_lines(&reply))
    }
}

fn join_lines(reply: &str) -> String {
    reply
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c == '-' || c == '*' || c == '•')
                .trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
