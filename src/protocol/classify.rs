//! Response classification.
//!
//! Checks that a received response is of the message kind the caller
//! asked for. A well-formed response of another kind is not an error: it
//! is reported as [`Classification::Unexpected`] so callers can decide
//! what to do with it (typically pass it through).

// ============================================================================
// Imports
// ============================================================================

use tracing::trace;

use crate::error::Result;

use super::envelope::ResponseEnvelope;
use super::kind::MessageKind;

// ============================================================================
// Classification
// ============================================================================

/// Result of comparing a response against the expected message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The response is of the expected kind.
    Expected,
    /// The response is well formed but of another kind.
    Unexpected {
        /// The kind the peer actually sent.
        actual: MessageKind,
    },
}

impl Classification {
    /// Returns `true` if the response matched the expected kind.
    #[inline]
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Expected)
    }
}

/// Classifies `envelope` against `expected`.
///
/// # Errors
///
/// Returns [`Error::InvalidResponse`](crate::Error::InvalidResponse) if the
/// response has no readable header or no message type.
pub fn classify(envelope: &ResponseEnvelope, expected: &MessageKind) -> Result<Classification> {
    let actual = envelope.message_kind()?;
    trace!(%expected, %actual, "Classifying response");

    if &actual == expected {
        Ok(Classification::Expected)
    } else {
        Ok(Classification::Unexpected { actual })
    }
}

// ============================================================================
// Tests
// ============================================================================
