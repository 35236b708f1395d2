//! Cooking time estimation prompt.

pub const ESTIMATE_TIME_PROMPT_NAME: &str = "estimate_time";

/// Instructions are renumbered from 1, one per line.
pub fn render_estimate_time_prompt(instructions: &[String]) -> String {
    let steps = instructions
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a cooking time expert. Estimate how long these steps take in total, preparation included.

{steps}

Answer on one line in this format:
Estimated total cooking time: <number> minutes"#,
        steps = steps
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt_numbers_steps() {
        let prompt = render_estimate_time_prompt(&["Boil water.".to_string(), "Add pasta.".to_string()]);
        assert!(prompt.contains("1. Boil water.\n2. Add pasta."));
        assert!(prompt.contains("<number> minutes"));
    }
}
