//! Recipe generation prompt.

pub const GENERATE_PROMPT_NAME: &str = "generate_recipe";

pub fn render_generate_prompt(
    ingredients: &[String],
    dietary_preferences: &[String],
    max_time: u32,
) -> String {
    format!(
        r#"You are a professional chef writing a recipe from what is in the pantry.

Use only these ingredients: {ingredients}
You may add at most two basic cooking essentials such as oil, salt or pepper. Do not add any other vegetables, dairy or proteins. List the essentials you used under ADDITIONAL INGREDIENTS NEEDED.

Dietary preferences: {dietary_preferences}
Maximum cooking time: {max_time} minutes

Write a catchy title, the ingredient list with quantities, and numbered steps that fit within the time limit.

Reply in exactly this format:

TITLE: <recipe title>

INGREDIENTS:
- <ingredient with quantity>
- <ingredient with quantity>

INSTRUCTIONS:
1. <step>
2. <step>

ADDITIONAL INGREDIENTS NEEDED: [essentials used beyond the listed ingredients]"#,
        ingredients = super::join(ingredients),
        dietary_preferences = super::join(dietary_preferences),
        max_time = max_time
    )
}
