//! Page and record types for list responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CseError, CseResult};

/// One record returned by a list or detail call.
///
/// Fields common across resources are typed; everything else the server
/// sends is preserved untouched in `extra`. The client never interprets
/// record contents beyond pagination metadata; domain interpretation is
/// the caller's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    /// Resource identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the resource is enabled (rules, sources, …).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Severity label (insights, signals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Creation timestamp, as reported by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// Resource-specific fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Look up a string field in the vendor-specific payload.
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    /// Look up a string field nested one level down, e.g. the display name
    /// under an insight's `status` object.
    pub fn extra_nested_str(&self, outer: &str, inner: &str) -> Option<&str> {
        self.extra
            .get(outer)
            .and_then(|v| v.get(inner))
            .and_then(Value::as_str)
    }
}

/// One response from a token-paginated list endpoint.
///
/// A missing `next_page_token` marks the final page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenPage {
    /// Records in server-returned order.
    #[serde(rename = "objects")]
    pub records: Vec<Record>,
    /// Continuation token for the next page, absent on the last one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// One response from an offset-paginated list endpoint.
///
/// The server signals completion through `has_next_page`, never through a
/// token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OffsetPage {
    /// Records in server-returned order.
    #[serde(rename = "objects")]
    pub records: Vec<Record>,
    /// Whether the server has another window after this one.
    pub has_next_page: bool,
    /// Total matching records, when the server reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// The `data` envelope every CSE response nests its payload under.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Unwrap the `data` envelope and deserialize the payload.
pub(crate) fn parse_envelope<T: DeserializeOwned>(value: Value, context: &str) -> CseResult<T> {
    serde_json::from_value::<Envelope<T>>(value)
        .map(|envelope| envelope.data)
        .map_err(|e| CseError::Data(format!("unexpected response shape for {context}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_typed_and_extra_fields() {
        let record: Record = serde_json::from_value(json!({
            "id": "INSIGHT-42",
            "name": "Lateral Movement",
            "severity": "HIGH",
            "created": "2024-03-01T10:00:00Z",
            "status": { "name": "in-progress", "displayName": "In Progress" },
            "confidence": 0.87
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("INSIGHT-42"));
        assert_eq!(record.severity.as_deref(), Some("HIGH"));
        assert_eq!(
            record.extra_nested_str("status", "displayName"),
            Some("In Progress")
        );
        assert_eq!(record.extra.get("confidence"), Some(&json!(0.87)));
    }

    #[test]
    fn test_token_page_envelope() {
        let page: TokenPage = parse_envelope(
            json!({
                "data": {
                    "objects": [{"id": "a"}, {"id": "b"}],
                    "nextPageToken": "tok"
                }
            }),
            "/insights/all",
        )
        .unwrap();

        assert_eq!(page.records.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_token_page_final_page() {
        let page: TokenPage = parse_envelope(
            json!({"data": {"objects": [], "nextPageToken": null}}),
            "/tag-schemas",
        )
        .unwrap();
        assert!(page.records.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_offset_page_envelope() {
        let page: OffsetPage = parse_envelope(
            json!({
                "data": {
                    "objects": [{"id": "a"}],
                    "total": 57,
                    "hasNextPage": true
                }
            }),
            "/insights",
        )
        .unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(page.has_next_page);
        assert_eq!(page.total, Some(57));
    }

    #[test]
    fn test_missing_envelope_is_data_error() {
        let err =
            parse_envelope::<TokenPage>(json!({"objects": []}), "/match-lists").unwrap_err();
        assert!(matches!(err, CseError::Data(_)));
    }
}
