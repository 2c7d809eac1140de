//! Candidate model resolution.

/// Ordered list of models to try.
///
/// A trimmed, non-empty `preferred` model comes first; `defaults` follow in
/// order with duplicates (and blanks) removed. Providers without model
/// fallback get a single candidate.
#[must_use]
pub fn resolve_candidates(
    preferred: Option<&str>,
    defaults: &[String],
    supports_fallback: bool,
) -> Vec<String> {
    let preferred = preferred.map(str::trim).filter(|m| !m.is_empty());

    let mut candidates: Vec<String> = Vec::with_capacity(defaults.len() + 1);
    for model in preferred
        .into_iter()
        .chain(defaults.iter().map(|m| m.trim()))
    {
        if !model.is_empty() && !candidates.iter().any(|c| c == model) {
            candidates.push(model.to_string());
        }
    }

    if !supports_fallback {
        candidates.truncate(1);
    }
    candidates
}
