//! Protocol message kinds.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Compact prefix used for IDS information model terms.
pub const IDS_PREFIX: &str = "ids:";

/// Full namespace of the IDS information model.
pub const IDS_NAMESPACE: &str = "https://w3id.org/idsa/core/";

// ============================================================================
// MessageKind
// ============================================================================

/// IDS message type carried in the `@type` of a message header.
///
/// Anything the connector does not act on is kept as [`MessageKind::Other`]
/// with its local name, so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// `ids:DescriptionRequestMessage`.
    DescriptionRequest,
    /// `ids:DescriptionResponseMessage`.
    DescriptionResponse,
    /// `ids:ArtifactRequestMessage`.
    ArtifactRequest,
    /// `ids:ArtifactResponseMessage`.
    ArtifactResponse,
    /// `ids:RejectionMessage`.
    Rejection,
    /// Any other message type, by local name.
    Other(String),
}

impl MessageKind {
    /// Parses a header `@type` value.
    ///
    /// Accepts the compact (`ids:X`), expanded (`https://w3id.org/idsa/core/X`)
    /// and bare (`X`) spellings.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        let local = local_name(type_name);

        match local {
            "DescriptionRequestMessage" => Self::DescriptionRequest,
            "DescriptionResponseMessage" => Self::DescriptionResponse,
            "ArtifactRequestMessage" => Self::ArtifactRequest,
            "ArtifactResponseMessage" => Self::ArtifactResponse,
            "RejectionMessage" => Self::Rejection,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the local name without namespace prefix.
    #[must_use]
    pub fn local_name(&self) -> &str {
        match self {
            Self::DescriptionRequest => "DescriptionRequestMessage",
            Self::DescriptionResponse => "DescriptionResponseMessage",
            Self::ArtifactRequest => "ArtifactRequestMessage",
            Self::ArtifactResponse => "ArtifactResponseMessage",
            Self::Rejection => "RejectionMessage",
            Self::Other(name) => name,
        }
    }

    /// Returns the compact `ids:` type name used in headers.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> String {
        format!("{IDS_PREFIX}{}", self.local_name())
    }

    /// Returns `true` for message kinds a peer sends in reply to a request.
    #[inline]
    #[must_use]
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            Self::DescriptionResponse | Self::ArtifactResponse | Self::Rejection
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{IDS_PREFIX}{}", self.local_name())
    }
}

/// Strips the IDS namespace or prefix from a term.
pub(crate) fn local_name(term: &str) -> &str {
    term.strip_prefix(IDS_NAMESPACE)
        .or_else(|| term.strip_prefix(IDS_PREFIX))
        .unwrap_or(term)
}

// ============================================================================
// Tests
// ============================================================================
