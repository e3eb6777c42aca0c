use serde::{Deserialize, Serialize};

/// Failure body returned by the promotions service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Pulls a string `message` out of an arbitrary JSON body.
    pub fn from_value(body: &serde_json::Value) -> Option<Self> {
        body.get("message")
            .and_then(serde_json::Value::as_str)
            .map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_message_field() {
        let body = json!({"message": "Promotion with id '9' was not found.", "status": 404});
        assert_eq!(
            ApiErrorBody::from_value(&body),
            Some(ApiErrorBody::new("Promotion with id '9' was not found."))
        );
    }

    #[test]
    fn rejects_bodies_without_string_message() {
        assert_eq!(ApiErrorBody::from_value(&json!({"error": "boom"})), None);
        assert_eq!(ApiErrorBody::from_value(&json!({"message": 5})), None);
        assert_eq!(ApiErrorBody::from_value(&json!("plain text")), None);
    }
}
