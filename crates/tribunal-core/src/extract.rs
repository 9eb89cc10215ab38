//! Pulls tagged JSON score blocks out of a judge's free-text critique.
//!
//! The grammar is deliberately narrow: `<resultsN>` ... a ```json fenced
//! object ... `</resultsN>`, matched non-greedily so one block can never
//! swallow the tags of the next. Anything that does not match yields `None`;
//! extraction failures are data loss to be logged upstream, never errors.

use regex::Regex;
use tracing::warn;

/// A raw score block exactly as the judge emitted it: criterion name to
/// arbitrary JSON value. Validation and coercion happen in `scoring`.
pub type RawScoreBlock = serde_json::Map<String, serde_json::Value>;

/// Extract the score block for one slot (1-based) from a judge response.
///
/// Returns `None` when the tag pair for that slot is absent or the enclosed
/// text is not a JSON object. Multiple slots in one response are matched
/// independently by their own tag pairs.
pub fn extract_score_block(response_text: &str, slot: usize) -> Option<RawScoreBlock> {
    let tag = format!("results{slot}");
    let pattern = format!(r"(?s)<{tag}>\s*```json\s*(\{{.*?\}})\s*```\s*</{tag}>");
    // The pattern is built from a fixed template and a digit; it cannot fail
    // to compile for any slot number.
    let re = Regex::new(&pattern).ok()?;

    let captures = re.captures(response_text)?;
    let json_text = captures.get(1)?.as_str().trim();

    match serde_json::from_str::<serde_json::Value>(json_text) {
        Ok(serde_json::Value::Object(map)) => Some(map),
        Ok(other) => {
            warn!(slot, value_type = %json_kind(&other), "score block is not a JSON object");
            None
        }
        Err(e) => {
            warn!(slot, error = %e, "failed to parse JSON inside score block");
            None
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
