//! Turning model output into extraction records.

use imgextract_core::{ExtractionRecord, FieldList};
use serde_json::Value;
use tracing::debug;

/// Remove a surrounding Markdown code fence (```` ```json ```` or ```` ``` ````).
pub fn strip_code_fences(content: &str) -> &str {
    let mut s = content.trim();
    if let Some(rest) = s.strip_prefix("```") {
        s = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = s.strip_suffix("```") {
        s = rest;
    }
    s.trim()
}

/// Parse a response into records tagged with `filename`.
///
/// The payload must be a JSON array of objects. Requested keys that are
/// absent or `null` become empty values; keys outside `fields` are ignored.
/// Records keep the order the model returned them in.
pub fn parse_records(
    content: &str,
    filename: &str,
    fields: &FieldList,
) -> Result<Vec<ExtractionRecord>, String> {
    let value: Value =
        serde_json::from_str(strip_code_fences(content)).map_err(|e| format!("invalid JSON: {e}"))?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(format!("expected a JSON array, got {}", kind_of(&other))),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let Value::Object(map) = item else {
                return Err(format!("item {i} is {}, expected an object", kind_of(item)));
            };
            let ignored = map
                .keys()
                .filter(|k| !fields.names().iter().any(|n| n == *k))
                .count();
            if ignored > 0 {
                debug!(file = filename, item = i, ignored, "Ignoring unrequested keys");
            }
            Ok(fields.requested().fold(ExtractionRecord::new(filename), |record, field| {
                record.with_value(field, map.get(field).and_then(cell_text))
            }))
        })
        .collect()
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
