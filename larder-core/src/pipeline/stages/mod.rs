//! The seven stage implementations.

mod alternate;
mod estimate_time;
mod feedback;
mod filter;
mod generate;
mod health_tips;
mod validate;

pub use alternate::AlternateStage;
pub use estimate_time::EstimateTimeStage;
pub use feedback::FeedbackStage;
pub use filter::FilterStage;
pub use generate::GenerateStage;
pub use health_tips::HealthTipsStage;
pub use validate::ValidateStage;
