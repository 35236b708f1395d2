//! Prompt for reading ingredients off a photo.

pub const IMAGE_TO_TEXT_PROMPT_NAME: &str = "image_to_text";

pub fn render_image_to_text_prompt() -> String {
    r#"Read this photo of ingredients, a shopping list or a pantry shelf.

List every food item you can identify, one per line, exactly as it appears or by its common name. Do not add quantities, commentary or items you cannot see. If you cannot find any food items, reply with an empty message."#
        .to_string()
}
