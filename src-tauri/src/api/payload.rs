//! Turning backend error bodies into one display string.
//!
//! The backend answers failures either with `{"error": "..."}` or with a
//! serializer error map such as `{"username": ["already exists"]}`.

use serde_json::Value;

const MESSAGE_KEYS: [&str; 3] = ["error", "message", "detail"];

/// Flatten an error body into text, or return `fallback` if nothing usable is in it.
pub fn error_message(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => flatten(&value).unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.trim().to_string()),
        Value::Array(items) => non_empty(join_messages(items)),
        Value::Object(map) => {
            for key in MESSAGE_KEYS {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.trim().is_empty() {
                        return Some(s.trim().to_string());
                    }
                }
            }

            let parts: Vec<String> = map
                .iter()
                .filter_map(|(field, messages)| {
                    let text = match messages {
                        Value::Array(items) => join_messages(items),
                        other => flatten(other).unwrap_or_default(),
                    };
                    if text.is_empty() {
                        None
                    } else if field == "non_field_errors" {
                        Some(text)
                    } else {
                        Some(format!("{}: {}", field, text))
                    }
                })
                .collect();
            non_empty(parts.join("; "))
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) | Value::Null => None,
    }
}

fn join_messages(items: &[Value]) -> String {
    items
        .iter()
        .filter_map(flatten)
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
