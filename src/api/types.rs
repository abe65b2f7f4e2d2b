//! Wire types for the invoicing backend.

use serde::{Deserialize, Serialize};

use crate::models::CurrentUser;

/// Error body returned with non-2xx responses: `{"detail": "..."}`.
///
/// `detail` is usually a string; validation failures carry a list of
/// objects instead, which is kept as raw JSON text.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Extract a user-facing detail message from a raw response body.
    pub fn detail_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            serde_json::Value::String(_) | serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Body returned by create/update/delete on success. Every field is optional;
/// an empty or non-JSON body decodes to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
}

impl MutationReceipt {
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: CurrentUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            ErrorBody::detail_from(r#"{"detail":"Not found"}"#).as_deref(),
            Some("Not found")
        );
    }

    #[test]
    fn test_detail_missing_or_unparsable() {
        assert_eq!(ErrorBody::detail_from(r#"{"error":"x"}"#), None);
        assert_eq!(ErrorBody::detail_from("<html>502</html>"), None);
        assert_eq!(ErrorBody::detail_from(""), None);
        assert_eq!(ErrorBody::detail_from(r#"{"detail":""}"#), None);
    }

    #[test]
    fn test_detail_list_kept_as_json() {
        let body = r#"{"detail":[{"loc":["body","company_name"],"msg":"field required"}]}"#;
        let detail = ErrorBody::detail_from(body).unwrap();
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_receipt_lenient() {
        let receipt = MutationReceipt::from_body(
            r#"{"message":"Company profile created successfully","profile_id":"p-9"}"#,
        );
        assert_eq!(receipt.profile_id.as_deref(), Some("p-9"));
        assert_eq!(MutationReceipt::from_body(""), MutationReceipt::default());
        assert_eq!(MutationReceipt::from_body("null"), MutationReceipt::default());
    }
}
