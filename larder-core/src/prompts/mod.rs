//! Prompt templates, one per stage.
//!
//! Each template names the reply markers its parser in [`crate::parse`] reads.
//! List arguments are comma-joined before substitution.

pub mod alternate;
pub mod estimate_time;
pub mod filter;
pub mod generate;
pub mod health_tips;
pub mod image_to_text;
pub mod validate;

pub use alternate::render_alternate_prompt;
pub use estimate_time::render_estimate_time_prompt;
pub use filter::render_filter_prompt;
pub use generate::render_generate_prompt;
pub use health_tips::render_health_tips_prompt;
pub use image_to_text::render_image_to_text_prompt;
pub use validate::render_validate_prompt;

/// Join list values the way every template expects them.
pub(crate) fn join(items: &[String]) -> String {
    items.join(", ")
}
