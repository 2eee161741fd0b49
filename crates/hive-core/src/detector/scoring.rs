//! Confidence scoring for template matches.
//!
//! The score grows with group completeness, is reduced for generic
//! (keyword-less) matches and for fields that look truncated or malformed,
//! and is a pure function of its inputs.

use crate::templates::TemplatePattern;

/// Multiplier applied when the match does not start with the pattern's keyword.
pub const GENERIC_MATCH_FACTOR: f64 = 0.8;

/// Penalty per unit share of malformed groups.
pub const MALFORMED_PENALTY: f64 = 0.2;

/// Score a match of `pattern` in `[0, 1]`, rounded to three decimals.
pub fn score_match(pattern: &TemplatePattern, full_match: &str, groups: &[String]) -> f64 {
    let expected = pattern.group_count();

    let (completeness, malformed) = if expected == 0 {
        (1.0, 0.0)
    } else {
        let present = groups.iter().filter(|g| !g.is_empty()).count();
        let malformed = groups.iter().filter(|g| is_malformed(g)).count();
        (
            present as f64 / expected as f64,
            malformed as f64 / expected as f64,
        )
    };

    let specificity = match &pattern.keyword {
        Some(keyword) if full_match.starts_with(keyword.as_str()) => 1.0,
        _ => GENERIC_MATCH_FACTOR,
    };

    let base = 0.5 + 0.5 * completeness;
    let score = (base * specificity - MALFORMED_PENALTY * malformed).clamp(0.0, 1.0);
    (score * 1000.0).round() / 1000.0
}

/// A captured field that looks cut off or carries stray whitespace.
fn is_malformed(field: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    field.ends_with("...") || field.ends_with('…') || field.trim() != field
}
