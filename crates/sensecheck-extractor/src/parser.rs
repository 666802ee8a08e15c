//! Parse LLM output into claim candidates

use crate::error::ExtractorError;
use crate::types::ClaimCandidate;
use sensecheck_domain::{Claim, ClaimCategory, Confidence, TextRange};
use serde_json::Value;
use tracing::warn;

/// Maximum number of claims an extraction yields
pub const MAX_CLAIMS: usize = 10;

/// Parsed oracle answer
#[derive(Debug)]
pub(crate) struct ParsedResponse {
    pub candidates: Vec<ClaimCandidate>,
    pub items_returned: usize,
}

/// Parse the LLM answer into claim candidates
///
/// The answer may carry prose or code fences around the array; everything
/// from the first `[` to the last `]` is taken as the array. Malformed items
/// are skipped with a warning.
pub(crate) fn parse_llm_response(response: &str) -> Result<ParsedResponse, ExtractorError> {
    let json_str = extract_json_array(response).ok_or_else(|| {
        ExtractorError::ExtractionFailure("No JSON array found in response".to_string())
    })?;

    let json: Value = serde_json::from_str(json_str)?;

    let items = json
        .as_array()
        .ok_or_else(|| ExtractorError::ExtractionFailure("Expected JSON array".to_string()))?;

    let mut candidates = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match parse_claim_json(item) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => warn!("Skipping claim {}: {}", idx, e),
        }
    }

    Ok(ParsedResponse {
        candidates,
        items_returned: items.len(),
    })
}

/// Substring from the first `[` to the last `]`, inclusive
fn extract_json_array(response: &str) -> Option<&str> {
    let start = response.find('[')?;
    let end = response.rfind(']')?;
    (start < end).then(|| &response[start..=end])
}

/// Accept numbers and numeric strings
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a single claim from JSON
fn parse_claim_json(json: &Value) -> Result<ClaimCandidate, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Claim is not a JSON object".to_string())?;

    let text = obj
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing or empty 'text'".to_string())?
        .to_string();

    let range = match obj.get("range") {
        None | Some(Value::Null) => None,
        Some(Value::Array(bounds)) if bounds.len() == 2 => {
            match (as_number(&bounds[0]), as_number(&bounds[1])) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => return Err("Non-numeric 'range' bounds".to_string()),
            }
        }
        Some(_) => return Err("'range' must be a two-element array".to_string()),
    };

    Ok(ClaimCandidate {
        text,
        category: obj.get("category").and_then(|v| v.as_str()).map(str::to_string),
        confidence: obj.get("confidence").and_then(as_number),
        importance: obj.get("importance").and_then(as_number),
        range,
    })
}

/// Keep at most [`MAX_CLAIMS`] candidates, preferring higher importance
///
/// The sort is stable, so equally important claims keep oracle order. Lists
/// already within the limit are returned untouched.
pub(crate) fn enforce_claim_limit(mut candidates: Vec<ClaimCandidate>) -> Vec<ClaimCandidate> {
    if candidates.len() > MAX_CLAIMS {
        candidates.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        candidates.truncate(MAX_CLAIMS);
    }
    candidates
}

/// Turn a candidate into a domain claim anchored to a memo of `memo_chars` characters
pub(crate) fn candidate_to_claim(candidate: ClaimCandidate, memo_chars: usize) -> Claim {
    let to_offset = |v: f64| -> usize {
        if v.is_finite() && v > 0.0 {
            v as usize
        } else {
            0
        }
    };

    let range = candidate
        .range
        .map(|(start, end)| TextRange::new(to_offset(start), to_offset(end)))
        .unwrap_or_default()
        .clamp_to(memo_chars);

    let category = candidate
        .category
        .as_deref()
        .and_then(ClaimCategory::parse)
        .unwrap_or(ClaimCategory::Other);

    let importance = candidate.rank();
    let mut claim = Claim::new(candidate.text, category, range);
    claim.confidence = candidate
        .confidence
        .map(Confidence::rating)
        .unwrap_or(Confidence::NEUTRAL);
    claim.importance = Confidence::rating(importance);
    claim
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the limit yields exactly MAX_CLAIMS when enough are supplied, else all
        #[test]
        fn test_claim_limit_bound(importances in proptest::collection::vec(proptest::option::of(0.0f64..12.0), 0..40)) {
            let supplied = importances.len();
            let candidates: Vec<_> = importances
                .into_iter()
                .enumerate()
                .map(|(i, importance)| ClaimCandidate {
                    text: format!("claim {}", i),
                    category: None,
                    confidence: None,
                    importance,
                    range: None,
                })
                .collect();

            let kept = enforce_claim_limit(candidates.clone());
            prop_assert_eq!(kept.len(), supplied.min(MAX_CLAIMS));

            if supplied > MAX_CLAIMS {
                let floor = kept.iter().map(ClaimCandidate::rank).fold(f64::INFINITY, f64::min);
                let dropped_above_floor = candidates
                    .iter()
                    .filter(|c| !kept.contains(c))
                    .any(|c| c.rank() > floor);
                prop_assert!(!dropped_above_floor);
            }
        }

        /// Property: converted claims always have ranges inside the memo
        #[test]
        fn test_converted_range_in_bounds(start in -50.0f64..500.0, end in -50.0f64..500.0, len in 0usize..300) {
            let claim = candidate_to_claim(
                ClaimCandidate {
                    text: "x".to_string(),
                    category: None,
                    confidence: None,
                    importance: None,
                    range: Some((start, end)),
                },
                len,
            );
            prop_assert!(claim.range.start <= claim.range.end);
            prop_assert!(claim.range.end <= len);
        }
    }
}
