//! Dietary filter prompt.

pub const FILTER_PROMPT_NAME: &str = "filter_ingredients";

pub fn render_filter_prompt(ingredients: &[String], dietary_preferences: &[String]) -> String {
    format!(
        r#"You are a dietary restriction specialist. Check each ingredient against the diner's restrictions.

Ingredients: {ingredients}
Dietary restrictions: {dietary_preferences}

Tasks:
1. Remove every ingredient that violates a restriction.
2. Suggest a substitute for each removed ingredient.
3. Make sure what remains can still make a complete dish.

Reply in exactly this format:
FILTERED_INGREDIENTS: [ingredients that are allowed]
REMOVED_INGREDIENTS: [removed ingredients, each with the reason]
SUGGESTED_ALTERNATIVES: [substitutes for the removed ingredients]"#,
        ingredients = super::join(ingredients),
        dietary_preferences = super::join(dietary_preferences)
    )
}
