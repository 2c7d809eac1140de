//! Prompt template for Explain10 generation calls.
//!
//! The prompt is a fixed instruction block. The topic is interpolated as-is;
//! the model, not this module, is trusted to honor the JSON-only instruction.

use explain10_core::{Level, Style};

/// The explain prompt. Placeholders: `{level}`, `{style}`, `{topic}`.
pub const EXPLAIN_PROMPT: &str = r#"You are Explain10, an expert at simplifying complex topics.
Audience level: {level}.
Output style preference: {style}.
Topic: {topic}.
Return ONLY valid JSON with this exact shape:
{"simpleExplanation":"...","analogy":"...","realWorldExample":"...","curiousQuestions":["...","...","..."]}
Keep each section concise and high-readability."#;

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value. Unknown placeholders are
/// left untouched. Substitution is single-pass per key in `vars` order, so a
/// value that itself contains `{key}` text for a *later* key is expanded too;
/// put user-controlled values last.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Build the instruction sent to the generation model.
///
/// Pure and deterministic. Any topic string is accepted; length validation
/// happens before this is called.
#[must_use]
pub fn build_prompt(topic: &str, level: Level, style: Style) -> String {
    render_template(
        EXPLAIN_PROMPT,
        &[
            ("level", level.as_str()),
            ("style", style.as_str()),
            ("topic", topic),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Hello {name}, you are a {role}.",
            &[("name", "Ada"), ("role", "engineer")],
        );
        assert_eq!(rendered, "Hello Ada, you are a engineer.");
    }

    #[test]
    fn template_handles_missing_vars() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Ada")]);
        assert_eq!(rendered, "Hello Ada, {unknown}.");
    }

    #[test]
    fn prompt_has_fixed_structure() {
        let prompt = build_prompt("black holes", Level::Teen, Style::StepByStep);
        let lines: Vec<&str> = prompt.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "You are Explain10, an expert at simplifying complex topics.");
        assert_eq!(lines[1], "Audience level: Teen.");
        assert_eq!(lines[2], "Output style preference: Step-by-step.");
        assert_eq!(lines[3], "Topic: black holes.");
        assert_eq!(lines[4], "Return ONLY valid JSON with this exact shape:");
        assert!(lines[5].ends_with(r#""curiousQuestions":["...","...","..."]}"#));
        assert_eq!(lines[6], "Keep each section concise and high-readability.");
    }

    #[test]
    fn topic_is_interpolated_verbatim() {
        let prompt = build_prompt(r#"quotes " and {braces}"#, Level::Kid, Style::Simple);
        assert!(prompt.contains(r#"Topic: quotes " and {braces}."#));
    }

    #[test]
    fn topic_cannot_inject_level_placeholder() {
        let prompt = build_prompt("{level}", Level::Expert, Style::Simple);
        assert!(prompt.contains("Topic: {level}."));
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            build_prompt("APIs", Level::Kid, Style::Analogy),
            build_prompt("APIs", Level::Kid, Style::Analogy)
        );
    }
}
