//! Status check resource models
//!
//! The backend owns these records; the runner only creates one per run
//! and looks for it in the listing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /status`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

impl StatusCheckCreate {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
        }
    }
}

/// A status check record as returned by the backend
///
/// Only `id` is required. Everything else, `client_name` included, is kept
/// as raw JSON so a record with an odd or missing name still matches by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    /// Server-assigned identifier, compared verbatim
    pub id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatusCheck {
    /// Whether this record carries the given id
    pub fn has_id(&self, id: &Value) -> bool {
        &self.id == id
    }

    pub fn client_name(&self) -> Option<&str> {
        self.extra.get("client_name").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body() {
        let body = serde_json::to_value(StatusCheckCreate::new("test_client_x")).unwrap();
        assert_eq!(body, json!({"client_name": "test_client_x"}));
    }

    #[test]
    fn test_status_check_keeps_extra_fields() {
        let check: StatusCheck = serde_json::from_value(json!({
            "id": "abc123",
            "client_name": "test_client_x",
            "timestamp": "2024-01-01T00:00:00"
        }))
        .unwrap();

        assert!(check.has_id(&json!("abc123")));
        assert!(!check.has_id(&json!("abc124")));
        assert_eq!(check.client_name(), Some("test_client_x"));
        assert_eq!(check.extra.get("timestamp"), Some(&json!("2024-01-01T00:00:00")));
    }

    #[test]
    fn test_only_id_is_required() {
        for record in [
            json!({"id": "abc123"}),
            json!({"id": "abc123", "client_name": null}),
            json!({"id": "abc123", "client_name": 5}),
        ] {
            let check: StatusCheck = serde_json::from_value(record).unwrap();
            assert!(check.has_id(&json!("abc123")));
            assert_eq!(check.client_name(), None);
        }

        assert!(serde_json::from_value::<StatusCheck>(json!({"client_name": "c"})).is_err());
    }

    #[test]
    fn test_numeric_id_is_opaque() {
        let check: StatusCheck =
            serde_json::from_value(json!({"id": 42, "client_name": "c"})).unwrap();
        assert!(check.has_id(&json!(42)));
        assert!(!check.has_id(&json!("42")));
    }
}
