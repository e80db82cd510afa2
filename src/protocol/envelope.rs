//! Received multipart responses.
//!
//! A [`ResponseEnvelope`] maps multipart part names to their text content.
//! IDS responses carry at least a `header` part; most also carry a
//! `payload` part.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

use super::kind::MessageKind;

// ============================================================================
// Constants
// ============================================================================

/// Name of the multipart part holding the message header.
pub const HEADER_PART: &str = "header";

/// Name of the multipart part holding the payload.
pub const PAYLOAD_PART: &str = "payload";

// ============================================================================
// ResponseEnvelope
// ============================================================================

/// A received multipart response, keyed by part name.
///
/// Serializes as a flat JSON object (`{"header": "...", "payload": "..."}`),
/// which is the form handed back to callers when a response is passed
/// through unprocessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseEnvelope {
    parts: FxHashMap<String, String>,
}

impl ResponseEnvelope {
    /// Creates an empty envelope.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a part, replacing any previous part with the same name.
    #[inline]
    #[must_use]
    pub fn with_part(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    /// Inserts a part, replacing any previous part with the same name.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.parts.insert(name.into(), content.into());
    }

    /// Returns the content of a part.
    #[inline]
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&str> {
        self.parts.get(name).map(String::as_str)
    }

    /// Returns the raw header part.
    #[inline]
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        self.part(HEADER_PART)
    }

    /// Returns the raw payload part.
    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.part(PAYLOAD_PART)
    }

    /// Returns the number of parts.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the envelope has no parts.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Parses the header part as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if there is no header part or it
    /// is not a JSON object.
    pub fn header_json(&self) -> Result<Value> {
        let header = self
            .header()
            .ok_or_else(|| Error::invalid_response("Response has no header part"))?;

        let value: Value = serde_json::from_str(header)
            .map_err(|e| Error::invalid_response(format!("Header is not valid JSON: {e}")))?;

        if !value.is_object() {
            return Err(Error::invalid_response("Header is not a JSON object"));
        }

        Ok(value)
    }

    /// Reads the message kind from the header `@type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if the header is unreadable or has
    /// no string `@type`.
    pub fn message_kind(&self) -> Result<MessageKind> {
        let header = self.header_json()?;

        header
            .get("@type")
            .and_then(Value::as_str)
            .map(MessageKind::from_type_name)
            .ok_or_else(|| Error::invalid_response("Header has no message type (@type)"))
    }

    /// Returns the `ids:rejectionReason` of a rejection header, if present.
    ///
    /// The reason is usually a reference (`{"@id": "idsc:NOT_FOUND"}`); the
    /// referenced id is returned in that case.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<String> {
        let header = self.header_json().ok()?;
        let reason = header.get("ids:rejectionReason")?;

        match reason {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("@id").and_then(Value::as_str).map(str::to_owned),
            _ => None,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseEnvelope
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            parts: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// Payload Extraction
// ============================================================================

/// Extracts the payload string of a response.
///
/// # Errors
///
/// Returns [`Error::InvalidResponse`] if the response has no payload part.
pub fn extract_payload(envelope: &ResponseEnvelope) -> Result<String> {
    envelope
        .payload()
        .map(str::to_owned)
        .ok_or_else(|| Error::invalid_response("Response has no payload part"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_payload_accessors() {
        let envelope = ResponseEnvelope::new()
            .with_part(HEADER_PART, "{}")
            .with_part(PAYLOAD_PART, "data");

        assert_eq!(envelope.header(), Some("{}"));
        assert_eq!(envelope.payload(), Some("data"));
        assert_eq!(envelope.len(), 2);
        assert!(!envelope.is_empty());
    }

    #[test]
    fn test_message_kind() {
        let envelope = ResponseEnvelope::new()
            .with_part(HEADER_PART, r#"{"@type":"ids:DescriptionResponseMessage"}"#);
        assert_eq!(
            envelope.message_kind().expect("kind"),
            MessageKind::DescriptionResponse
        );
    }

    #[test]
    fn test_message_kind_missing_type() {
        let envelope = ResponseEnvelope::new().with_part(HEADER_PART, r#"{"@id":"x"}"#);
        let err = envelope.message_kind().unwrap_err();
        assert!(err.is_invalid_response());
    }

    #[test]
    fn test_header_json_rejects_non_object() {
        let envelope = ResponseEnvelope::new().with_part(HEADER_PART, "[1,2]");
        assert!(envelope.header_json().unwrap_err().is_invalid_response());

        let envelope = ResponseEnvelope::new().with_part(HEADER_PART, "not json");
        assert!(envelope.header_json().unwrap_err().is_invalid_response());
    }

    #[test]
    fn test_rejection_reason_reference() {
        let envelope = ResponseEnvelope::new().with_part(
            HEADER_PART,
            r#"{"@type":"ids:RejectionMessage","ids:rejectionReason":{"@id":"https://w3id.org/idsa/code/NOT_FOUND"}}"#,
        );
        assert_eq!(
            envelope.rejection_reason().as_deref(),
            Some("https://w3id.org/idsa/code/NOT_FOUND")
        );
    }

    #[test]
    fn test_rejection_reason_absent() {
        let envelope = ResponseEnvelope::new()
            .with_part(HEADER_PART, r#"{"@type":"ids:DescriptionResponseMessage"}"#);
        assert_eq!(envelope.rejection_reason(), None);
    }

    #[test]
    fn test_extract_payload_missing() {
        let envelope = ResponseEnvelope::new().with_part(HEADER_PART, "{}");
        assert!(extract_payload(&envelope).unwrap_err().is_invalid_response());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let envelope: ResponseEnvelope = [(HEADER_PART, "h"), (PAYLOAD_PART, "p")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(json["header"], "h");
        assert_eq!(json["payload"], "p");
    }
}
