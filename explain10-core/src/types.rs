//! Core types for explain requests and results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GatewayError;

/// Minimum topic length (in characters, after trimming).
pub const MIN_TOPIC_CHARS: usize = 3;

/// Maximum number of follow-up questions returned to the caller.
pub const MAX_CURIOUS_QUESTIONS: usize = 5;

// ---------------------------------------------------------------------------
// Audience level
// ---------------------------------------------------------------------------

/// Who the explanation is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    /// Young reader: playful, simple words.
    #[default]
    Kid,
    /// Teenager: friendly and practical.
    Teen,
    /// Specialist: clear, with technical precision.
    Expert,
}

impl Level {
    /// Wire spelling used in prompts and in the HTTP API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kid => "Kid",
            Self::Teen => "Teen",
            Self::Expert => "Expert",
        }
    }

    /// All levels, simplest first.
    #[must_use]
    pub fn all() -> &'static [Level] {
        &[Self::Kid, Self::Teen, Self::Expert]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kid" => Ok(Self::Kid),
            "Teen" => Ok(Self::Teen),
            "Expert" => Ok(Self::Expert),
            other => Err(GatewayError::invalid_input(format!(
                "Unknown level '{other}'. Expected one of: Kid, Teen, Expert."
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Output style
// ---------------------------------------------------------------------------

/// Preferred presentation style of the explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Plain, short sentences.
    #[default]
    Simple,
    /// Lead with an analogy.
    Analogy,
    /// Walk through the idea one step at a time.
    StepByStep,
}

impl Style {
    /// Wire spelling used in prompts and in the HTTP API.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Analogy => "Analogy",
            Self::StepByStep => "Step-by-step",
        }
    }

    /// All styles.
    #[must_use]
    pub fn all() -> &'static [Style] {
        &[Self::Simple, Self::Analogy, Self::StepByStep]
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Simple" => Ok(Self::Simple),
            "Analogy" => Ok(Self::Analogy),
            "Step-by-step" => Ok(Self::StepByStep),
            other => Err(GatewayError::invalid_input(format!(
                "Unknown style '{other}'. Expected one of: Simple, Analogy, Step-by-step."
            ))),
        }
    }
}

// Serialize both enums with their wire spelling rather than the variant name.
macro_rules! wire_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_serde!(Level);
wire_serde!(Style);

// ---------------------------------------------------------------------------
// Request / Result
// ---------------------------------------------------------------------------

/// A validated request to explain a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainRequest {
    /// The topic, already trimmed.
    pub topic: String,
    /// Audience level.
    pub level: Level,
    /// Output style.
    pub style: Style,
}

impl ExplainRequest {
    /// Build a request, trimming the topic and rejecting topics that are too short.
    ///
    /// # Errors
    /// Returns an `invalid_input` error if the trimmed topic has fewer than
    /// [`MIN_TOPIC_CHARS`] characters.
    pub fn new(topic: &str, level: Level, style: Style) -> Result<Self, GatewayError> {
        let request = Self {
            topic: topic.trim().to_string(),
            level,
            style,
        };
        request.validate()?;
        Ok(request)
    }

    /// Check the topic-length invariant.
    ///
    /// # Errors
    /// Returns an `invalid_input` error if the trimmed topic is too short.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.topic.trim().chars().count() < MIN_TOPIC_CHARS {
            return Err(GatewayError::invalid_input(
                "Please enter a topic with at least 3 characters.",
            ));
        }
        Ok(())
    }
}

/// The four-section explanation returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResult {
    /// Plain-language explanation.
    #[serde(default)]
    pub simple_explanation: String,
    /// An everyday analogy.
    #[serde(default)]
    pub analogy: String,
    /// Where the topic shows up in real life.
    #[serde(default)]
    pub real_world_example: String,
    /// Follow-up questions, at most [`MAX_CURIOUS_QUESTIONS`].
    #[serde(default)]
    pub curious_questions: Vec<String>,
}

impl ExplainResult {
    /// Whether every section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simple_explanation.is_empty()
            && self.analogy.is_empty()
            && self.real_world_example.is_empty()
            && self.curious_questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn request_trims_topic() {
        let req = ExplainRequest::new("   blockchain  ", Level::Teen, Style::Analogy)
            .expect("valid topic");
        assert_eq!(req.topic, "blockchain");
    }

    #[test]
    fn short_topic_is_invalid_input() {
        let err = ExplainRequest::new("  ab ", Level::Kid, Style::Simple).expect_err("too short");
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.status, 400);
    }

    #[test]
    fn topic_length_counts_characters_not_bytes() {
        // Two characters, six bytes.
        assert!(ExplainRequest::new("日本", Level::Kid, Style::Simple).is_err());
        assert!(ExplainRequest::new("日本語", Level::Kid, Style::Simple).is_ok());
    }

    #[test]
    fn level_and_style_parse_wire_spelling() {
        for level in Level::all() {
            assert_eq!(level.as_str().parse::<Level>().expect("parse"), *level);
        }
        assert_eq!("Step-by-step".parse::<Style>().expect("parse"), Style::StepByStep);
        assert!("StepByStep".parse::<Style>().is_err());
        assert!("kid".parse::<Level>().is_err());
    }

    #[test]
    fn defaults_are_kid_and_simple() {
        assert_eq!(Level::default(), Level::Kid);
        assert_eq!(Style::default(), Style::Simple);
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = ExplainResult {
            simple_explanation: "a".into(),
            analogy: "b".into(),
            real_world_example: "c".into(),
            curious_questions: vec!["d?".into()],
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["simpleExplanation"], "a");
        assert_eq!(json["realWorldExample"], "c");
        assert_eq!(json["curiousQuestions"][0], "d?");
    }

    #[test]
    fn style_deserializes_from_wire_string() {
        let style: Style = serde_json::from_str("\"Step-by-step\"").expect("deserialize");
        assert_eq!(style, Style::StepByStep);
        assert!(serde_json::from_str::<Style>("\"Fancy\"").is_err());
    }
}
