//! Parsers for the model's free-text replies.
//!
//! Every function here is pure and infallible: a missing or malformed field
//! degrades to that field's documented default while the rest of the reply
//! is still read.

pub mod alternate;
pub mod fields;
pub mod filter;
pub mod health;
pub mod recipe;
pub mod time;
pub mod validation;

pub use alternate::{parse_alternate_reply, AlternateReply};
pub use fields::{bracketed_list, bulleted_items, Bullet, MarkerSet};
pub use filter::{parse_filter_reply, FilterReply};
pub use health::{parse_health_reply, HealthReply};
pub use recipe::{missed_ingredients, parse_recipe_reply, RecipeReply};
pub use time::parse_minutes;
pub use validation::{parse_validation_reply, ValidationReply};
