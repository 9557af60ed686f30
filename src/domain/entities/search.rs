use serde_json::Value;

/// Result of a single call to the search API
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// HTTP 200 with a parsed body; the list is empty when `results` is absent
    Results(Vec<Value>),
    /// The API answered with a non-200 status
    Upstream { status: u16, body: String },
    /// The call never produced a usable response
    Failed(String),
}

impl SearchOutcome {
    /// Extract the result list from a successful response body
    pub fn from_body(body: &Value) -> Self {
        let results = body
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        SearchOutcome::Results(results)
    }
}

/// One displayable entry of a search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub text: String,
}

impl SearchResultItem {
    /// Uses the item's `text` field when it is a non-empty string. Anything
    /// else is rendered deterministically: bare strings as-is, every other
    /// value as compact JSON with sorted keys.
    pub fn from_value(value: &Value) -> Self {
        let text = match value {
            Value::String(s) => s.clone(),
            other => match other.get("text").and_then(Value::as_str) {
                Some(text) if !text.is_empty() => text.to_string(),
                _ => other.to_string(),
            },
        };
        Self { text }
    }
}
