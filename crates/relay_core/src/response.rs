//! crates/relay_core/src/response.rs
//!
//! The uniform JSON envelope returned by every successful API call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub message: String,
    pub data: Value,
}

/// Wraps a message and optional payload. A missing payload serialises as `null`.
pub fn build_response(message: impl Into<String>, data: Option<Value>) -> ResponseEnvelope {
    ResponseEnvelope {
        message: message.into(),
        data: data.unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_and_data_are_carried_verbatim() {
        let data = json!({"file_content": "abc", "nested": {"n": [1, 2, 3]}});
        let envelope = build_response("X", Some(data.clone()));

        assert_eq!(envelope.message, "X");
        assert_eq!(envelope.data, data);
    }

    #[test]
    fn absent_data_serialises_as_null() {
        let envelope = build_response("Request received", None);
        let as_json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(as_json, json!({"message": "Request received", "data": null}));
    }
}
