//! Property-based tests for response extraction and candidate resolution.
//!
//! Whatever the upstream says, extraction must either yield a well-formed
//! result or nothing; it must never panic or exceed the question cap.

use proptest::prelude::*;
use serde_json::json;

use explain10_core::MAX_CURIOUS_QUESTIONS;
use explain10_llm::candidates::resolve_candidates;
use explain10_llm::extract::{extract_result, parse_lenient};

// ---------------------------------------------------------------------------
// Property: arbitrary text never panics
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn arbitrary_text_never_panics(text in ".{0,300}") {
        if let Some(result) = extract_result(&text) {
            prop_assert!(result.curious_questions.len() <= MAX_CURIOUS_QUESTIONS);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: a valid object survives any prose wrapping without braces
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn object_recovered_from_brace_free_prose(
        before in "[a-zA-Z0-9 .,!?\n]{0,40}",
        after in "[a-zA-Z0-9 .,!?\n]{0,40}",
        analogy in "[a-zA-Z ]{0,30}",
    ) {
        let payload = json!({ "analogy": analogy.clone() }).to_string();
        let text = format!("{before}{payload}{after}");
        let result = extract_result(&text).expect("embedded object parses");
        prop_assert_eq!(result.analogy, analogy);
    }
}

// ---------------------------------------------------------------------------
// Property: question cap holds for any list length
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn question_cap_holds(questions in prop::collection::vec("[a-z?]{1,12}", 0..20)) {
        let payload = json!({ "curiousQuestions": questions.clone() }).to_string();
        let result = extract_result(&payload).expect("object");
        prop_assert_eq!(result.curious_questions.len(), questions.len().min(MAX_CURIOUS_QUESTIONS));
        prop_assert_eq!(&result.curious_questions[..], &questions[..result.curious_questions.len()]);
    }
}

// ---------------------------------------------------------------------------
// Property: strict JSON wins over span recovery
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn scalar_json_is_parsed_strictly(n in any::<i64>()) {
        let value = parse_lenient(&n.to_string()).expect("number is valid JSON");
        prop_assert_eq!(value, json!(n));
        prop_assert!(extract_result(&n.to_string()).is_none());
    }
}

// ---------------------------------------------------------------------------
// Property: candidate lists are duplicate-free and keep the preferred model first
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn candidates_unique_with_preferred_first(
        preferred in proptest::option::of("[a-z0-9.-]{1,12}"),
        defaults in prop::collection::vec("[a-z0-9.-]{1,12}", 0..6),
    ) {
        let list = resolve_candidates(preferred.as_deref(), &defaults, true);

        let mut seen = std::collections::HashSet::new();
        for model in &list {
            prop_assert!(seen.insert(model.clone()), "duplicate candidate {}", model);
        }
        if let Some(p) = &preferred {
            prop_assert_eq!(&list[0], p);
        }
        for d in &defaults {
            prop_assert!(list.contains(d));
        }

        let single = resolve_candidates(preferred.as_deref(), &defaults, false);
        prop_assert!(single.len() <= 1);
    }
}
