//! Turning grounded answers into verdict fields
//!
//! Three tiers, tried in order:
//!
//! 1. [`ParseOutcome::Parsed`]: the structuring oracle returned a JSON object
//! 2. [`ParseOutcome::Heuristic`]: keywords in the grounded prose
//! 3. [`ParseOutcome::Unparseable`]: the structuring answer held nothing usable;
//!    the caller moves on to the heuristic tier

use crate::urls::merge_urls;
use sensecheck_domain::{Confidence, GroundedStatus, VerdictProvenance};
use serde_json::{Map, Value};

/// Reasoning used when the structuring oracle omits it
pub const DEFAULT_REASONING: &str = "Unable to process verification results";

/// Verdict fields recovered from an answer
#[derive(Debug, Clone, PartialEq)]
pub struct VerdictFields {
    /// Outcome
    pub status: GroundedStatus,
    /// Explanation
    pub reasoning: String,
    /// Sources named by the answer itself
    pub sources: Vec<String>,
    /// 1-10
    pub confidence: Confidence,
}

/// Result of interpreting an oracle answer
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Structured JSON was found
    Parsed(VerdictFields),
    /// Fields derived from keywords
    Heuristic(VerdictFields),
    /// Nothing usable
    Unparseable,
}

impl ParseOutcome {
    /// Parse tier that produced the fields, if any
    pub fn provenance(&self) -> Option<VerdictProvenance> {
        match self {
            ParseOutcome::Parsed(_) => Some(VerdictProvenance::Structured),
            ParseOutcome::Heuristic(_) => Some(VerdictProvenance::Heuristic),
            ParseOutcome::Unparseable => None,
        }
    }

    /// The recovered fields, if any
    pub fn fields(&self) -> Option<&VerdictFields> {
        match self {
            ParseOutcome::Parsed(fields) | ParseOutcome::Heuristic(fields) => Some(fields),
            ParseOutcome::Unparseable => None,
        }
    }
}

/// Substring from the first `{` to the last `}`, inclusive
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Tier 1: read the structuring oracle's JSON
///
/// Missing or unrecognized fields take defaults: status
/// `cannot_find_answer`, confidence 5, reasoning [`DEFAULT_REASONING`].
pub fn parse_structured(answer: &str) -> ParseOutcome {
    let Some(json_str) = extract_json_object(answer) else {
        return ParseOutcome::Unparseable;
    };
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(json_str) else {
        return ParseOutcome::Unparseable;
    };

    let status = non_empty_str(&obj, "status")
        .and_then(GroundedStatus::parse)
        .unwrap_or(GroundedStatus::CannotFindAnswer);

    let reasoning = non_empty_str(&obj, "reasoning")
        .unwrap_or(DEFAULT_REASONING)
        .to_string();

    let sources = obj
        .get("sources")
        .and_then(Value::as_array)
        .map(|items| merge_urls(items.iter().filter_map(Value::as_str)))
        .unwrap_or_default();

    let confidence = obj
        .get("confidence")
        .and_then(as_number)
        .map(Confidence::rating)
        .unwrap_or(Confidence::NEUTRAL);

    ParseOutcome::Parsed(VerdictFields {
        status,
        reasoning,
        sources,
        confidence,
    })
}

/// Keyword classification of free prose, first match wins
///
/// # Examples
///
/// ```
/// use sensecheck_domain::GroundedStatus;
/// use sensecheck_verifier::classify_keywords;
///
/// assert_eq!(classify_keywords("The figure is accurate."), GroundedStatus::VerifiedTrue);
/// assert_eq!(classify_keywords("Results are mixed."), GroundedStatus::PartiallyTrue);
/// ```
pub fn classify_keywords(prose: &str) -> GroundedStatus {
    let lower = prose.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    // Verdict words match whole words only, so "incorrect" never reads as "correct"
    let has_word = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));
    let has_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if has_word(&["true", "accurate", "correct"]) {
        GroundedStatus::VerifiedTrue
    } else if has_word(&["false", "inaccurate", "incorrect"]) {
        GroundedStatus::VerifiedFalse
    } else if has_any(&["partial", "mixed"]) {
        GroundedStatus::PartiallyTrue
    } else if has_any(&["context", "depends"]) {
        GroundedStatus::NeedsContext
    } else {
        GroundedStatus::CannotFindAnswer
    }
}

/// Tier 2 fields derived from the grounded prose
///
/// Confidence is fixed at 5; reasoning is the first `excerpt_chars`
/// characters followed by `...`. Sources are filled in by the caller.
pub fn heuristic_fields(answer: &str, excerpt_chars: usize) -> VerdictFields {
    let excerpt: String = answer.chars().take(excerpt_chars).collect();
    VerdictFields {
        status: classify_keywords(answer),
        reasoning: format!("{}...", excerpt),
        sources: Vec::new(),
        confidence: Confidence::NEUTRAL,
    }
}

/// Tier 2: derive fields from the grounded prose
pub fn parse_heuristic(answer: &str, excerpt_chars: usize) -> ParseOutcome {
    ParseOutcome::Heuristic(heuristic_fields(answer, excerpt_chars))
}
