//! Local canned explanation.
//!
//! A template-based explanation that needs no upstream call. It is
//! deliberately generic: the topic is slotted into fixed sentences whose tone
//! follows the [`Level`] and whose analogy phrasing follows the [`Style`].

use tracing::debug;

use crate::types::{ExplainRequest, ExplainResult, Level, Style};

/// Phrasing that varies with the output style.
struct StyleTemplate {
    analogy_prefix: &'static str,
    question_prompt: &'static str,
}

fn style_template(style: Style) -> StyleTemplate {
    match style {
        Style::Simple => StyleTemplate {
            analogy_prefix: "Think of it like",
            question_prompt: "Want to learn even more?",
        },
        Style::Analogy => StyleTemplate {
            analogy_prefix: "Imagine",
            question_prompt: "If this analogy makes sense, ask:",
        },
        Style::StepByStep => StyleTemplate {
            analogy_prefix: "A step-by-step way to picture it is",
            question_prompt: "To go step-by-step, you could ask:",
        },
    }
}

fn tone(level: Level) -> &'static str {
    match level {
        Level::Kid => "super simple with playful words",
        Level::Teen => "simple, friendly, and practical",
        Level::Expert => "clear but with more technical precision",
    }
}

/// Build the canned explanation for a request.
#[must_use]
pub fn local_explanation(request: &ExplainRequest) -> ExplainResult {
    let topic = request.topic.as_str();
    let tone = tone(request.level);
    let template = style_template(request.style);

    debug!(topic, level = %request.level, style = %request.style, "Synthesizing local explanation");

    ExplainResult {
        simple_explanation: format!(
            "{topic} works in a way that's {tone}. The big idea is that smaller parts work \
             together to create a useful result. Once you understand the core job each part \
             does, the whole thing becomes much easier to follow."
        ),
        analogy: format!(
            "{} a team delivering pizzas: one person takes orders, one cooks, one drives. \
             {topic} is similar because different parts each have a role, and the final \
             outcome only works when they coordinate.",
            template.analogy_prefix
        ),
        real_world_example: format!(
            "In real life, {topic} shows up when apps or systems need to handle many steps \
             quickly and clearly, like booking a ride, tracking a package, or streaming a \
             video without pauses."
        ),
        curious_questions: vec![
            format!("What is the most important part of {topic}?"),
            format!("What breaks if one part of {topic} fails?"),
            template.question_prompt.to_string(),
        ],
    }
}
