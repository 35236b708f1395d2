//! Plain-text rendering of a generated recipe.

use larder_core::PipelineState;

fn section(out: &mut String, heading: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    out.push_str(&format!("\n{}\n{}\n", heading, body.trim()));
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(n, i)| format!("{}. {}", n + 1, i))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_text(state: &PipelineState) -> String {
    let mut out = String::new();

    if let Some(recipe) = &state.recipe {
        out.push_str(&format!("# {}\n", recipe.reply.title));
        match state.estimated_cook_time() {
            Some(minutes) => out.push_str(&format!("Ready in about {} minutes\n", minutes)),
            None => out.push_str("Cooking time unknown\n"),
        }
        section(&mut out, "Ingredients", &bullets(&recipe.reply.ingredients));
        section(
            &mut out,
            "You still need",
            &bullets(&recipe.missed_ingredients),
        );
        section(&mut out, "Instructions", &numbered(&recipe.reply.instructions));
    }

    if let Some(filtering) = &state.filtering {
        section(
            &mut out,
            "Removed for your diet",
            &bullets(&filtering.removed_ingredients),
        );
        section(
            &mut out,
            "Try instead",
            &bullets(&filtering.suggested_alternatives),
        );
    }

    if let Some(health) = &state.health {
        section(&mut out, "Nutritional benefits", &health.nutritional_benefits);
        section(&mut out, "Health tips", &health.health_tips);
        section(&mut out, "Healthier suggestions", &health.healthier_suggestions);
        section(&mut out, "Warnings", &health.warnings);
    }

    if let Some(alternate) = &state.alternate {
        out.push_str(&format!(
            "\n## Alternate: {} ({}, {}, serves {})\n",
            alternate.name, alternate.cuisine_style, alternate.difficulty, alternate.servings
        ));
        section(&mut out, "Flavor", &alternate.flavor_profile);
        section(&mut out, "Ingredients", &bullets(&alternate.ingredients));
        section(&mut out, "Instructions", &numbered(&alternate.instructions));
    }

    if state.feedback_logged() {
        out.push_str("\nFeedback logged\n");
    }
    out
}
