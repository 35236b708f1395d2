//! Health tips prompt.

pub const HEALTH_TIPS_PROMPT_NAME: &str = "health_tips";

pub fn render_health_tips_prompt(
    recipe_name: &str,
    ingredients: &[String],
    dietary_preferences: &[String],
) -> String {
    format!(
        r#"You are a nutrition expert reviewing a home-cooked recipe.

Recipe: {recipe_name}
Ingredients: {ingredients}
Dietary preferences: {dietary_preferences}

Cover the main nutritional benefits, practical health tips for these ingredients, ways to make the dish healthier, and any nutritional warnings.

Reply in exactly this format:
NUTRITIONAL_BENEFITS: <key benefits>
HEALTH_TIPS: <practical tips>
HEALTHIER_SUGGESTIONS: <ways to make it healthier>
WARNINGS: <warnings on one line, or None>"#,
        recipe_name = recipe_name,
        ingredients = super::join(ingredients),
        dietary_preferences = super::join(dietary_preferences)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::health::{HEALTHIER_SUGGESTIONS, HEALTH_TIPS, NUTRITIONAL_BENEFITS, WARNINGS};

    #[test]
    fn test_render_prompt() {
        let prompt = render_health_tips_prompt("Lentil Soup", &["lentils".to_string()], &[]);
        assert!(prompt.contains("Recipe: Lentil Soup"));
        assert!(prompt.contains("Ingredients: lentils"));
        for marker in [NUTRITIONAL_BENEFITS, HEALTH_TIPS, HEALTHIER_SUGGESTIONS, WARNINGS] {
            assert!(prompt.contains(&format!("{}:", marker)));
        }
    }
}
