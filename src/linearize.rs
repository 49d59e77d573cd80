//! Linearization of structured extraction payloads into flat text.
//!
//! Extraction output is an arbitrary JSON-like tree. Before chunking it is
//! flattened depth-first into ordered `path: value` lines: map keys are joined
//! with `.`, sequence elements get a bracketed index, and nulls vanish. The
//! crate enables `serde_json`'s `preserve_order` feature so map entries are
//! emitted in the order the payload was written, making the output
//! reproducible for identical input.

use serde_json::Value;

/// Flatten a JSON-like value into newline-joined `path: value` lines.
///
/// Total over any value; never fails. Nulls at any depth contribute nothing,
/// and a bare top-level scalar is serialized directly with no path prefix.
///
/// ```
/// use serde_json::json;
///
/// let payload = json!({"patient": {"name": "Jane Doe"}, "notes": null});
/// assert_eq!(docvec::linearize(&payload), "patient.name: Jane Doe");
/// ```
pub fn linearize(value: &Value) -> String {
    linearize_from(value, "")
}

/// Flatten a JSON-like value with an explicit starting path prefix.
pub fn linearize_from(value: &Value, prefix: &str) -> String {
    let mut lines = Vec::new();
    collect(prefix, value, &mut lines);
    lines.join("\n")
}

fn collect(path: &str, value: &Value, lines: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let child_path =
                    if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                collect(&child_path, child, lines);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect(&format!("{path}[{index}]"), child, lines);
            }
        }
        scalar => {
            let text = scalar_text(scalar);
            if path.is_empty() {
                lines.push(text);
            } else {
                lines.push(format!("{path}: {text}"));
            }
        }
    }
}

/// Textual representation of a scalar. Strings are emitted without quotes.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
