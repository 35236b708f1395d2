//! Alternate recipe prompt.

pub const ALTERNATE_PROMPT_NAME: &str = "alternate_recipe";

pub fn render_alternate_prompt(
    original_recipe: &str,
    ingredients: &[String],
    dietary_preferences: &[String],
) -> String {
    format!(
        r#"You are a creative chef. Invent a different dish from the same pantry: change the cooking method or the cuisine, not the ingredients. Come up with something new every time you are asked.

Original recipe: {original_recipe}
Available ingredients: {ingredients}
Dietary preferences: {dietary_preferences}

Rules:
1. Use only the available ingredients.
2. Use a different cooking method or cuisine than the original.
3. Give it a distinct flavor profile.
4. Respect the dietary preferences.

Reply in exactly this format:
ALTERNATE_RECIPE_NAME: <name>
CUISINE_STYLE: <cuisine or cooking method>
INGREDIENTS_NEEDED:
- <ingredient with quantity>
INSTRUCTIONS:
1. <step>
DIFFICULTY: <Easy, Medium or Hard>
SERVINGS: <number>
FLAVOR_PROFILE: <how it tastes compared to the original>"#,
        original_recipe = original_recipe,
        ingredients = super::join(ingredients),
        dietary_preferences = super::join(dietary_preferences)
    )
}
