//! Input validation prompt.

pub const VALIDATE_PROMPT_NAME: &str = "validate_inputs";

pub fn render_validate_prompt(
    ingredients: &str,
    dietary_preferences: &[String],
    max_time: u32,
) -> String {
    format!(
        r#"You are the input validator for a recipe generator. Clean up what the user typed before anything else happens.

Ingredients as typed: {ingredients}
Dietary preferences: {dietary_preferences}
Time available: {max_time} minutes

Tasks:
1. Standardize the ingredient names: fix spelling, remove duplicates, use singular common names.
2. Drop anything that is not a food item.
3. Keep only dietary preferences that are real dietary restrictions.

Reply in exactly this format:
CLEANED_INGREDIENTS: [ingredient, ingredient, ...]
VALID_PREFERENCES: [preference, ...]
ISSUES: <problems you found, or None>"#,
        ingredients = ingredients,
        dietary_preferences = super::join(dietary_preferences),
        max_time = max_time
    )
}
