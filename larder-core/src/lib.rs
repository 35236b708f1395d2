//! Core of the larder recipe generator.
//!
//! A request flows through a fixed pipeline of stages (see [`pipeline`]); each
//! stage renders a prompt from [`prompts`], calls an [`llm::LlmProvider`], and
//! reads the free-text reply with the matching parser in [`parse`].

pub mod config;
pub mod error;
pub mod feedback;
pub mod image;
pub mod llm;
pub mod ocr;
pub mod parse;
pub mod pipeline;
pub mod prompts;

pub use config::{ConfigError, FeedbackConfig, LlmConfig, ProviderKind};
pub use error::{PipelineError, StageError};
pub use feedback::{
    CsvFeedbackStore, FeedbackCategory, FeedbackError, FeedbackLogger, FeedbackRecord,
    FeedbackStats, FeedbackStore,
};
pub use image::{validate_image, ImageError, MAX_FILE_SIZE};
pub use llm::{
    create_provider, create_vision_provider, CachingProvider, FakeProvider, GeminiProvider,
    LlmError, LlmProvider, VisionProvider,
};
pub use ocr::{is_ocr_error, ImageToText, OCR_ERROR_PREFIX};
pub use pipeline::{
    GenerateResponse, PipelineState, RecipePipeline, RecipeRequest, StageMetadata, StageName,
};
