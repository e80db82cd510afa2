//! Results of message exchanges.
//!
//! Every exchange ends in exactly one outcome or exactly one
//! [`ExchangeFailure`]. Library errors never leave an exchange unwrapped.
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Transport failed | [`ExchangeFailure::MessageSend`] |
//! | Peer answered with another message kind | `Passthrough` outcome |
//! | Response unreadable | [`ExchangeFailure::InvalidResponse`] |
//! | Anything unanticipated | [`ExchangeFailure::Internal`] |

// ============================================================================
// Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

use crate::error::Error;
use crate::protocol::{DescribedComponent, ResponseEnvelope};

// ============================================================================
// DescriptionOutcome
// ============================================================================

/// Successful result of a description exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DescriptionOutcome {
    /// The payload parsed as a known component.
    Component(DescribedComponent),
    /// The payload, verbatim.
    ///
    /// Returned when an element was requested, or when the payload is not
    /// a known component.
    Payload(String),
    /// The peer answered with another message kind; the whole response.
    Passthrough(ResponseEnvelope),
}

// ============================================================================
// ArtifactOutcome
// ============================================================================

/// Successful result of an artifact exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ArtifactOutcome {
    /// The artifact data, verbatim.
    Payload(String),
    /// The peer answered with another message kind; the whole response.
    Passthrough(ResponseEnvelope),
}

// ============================================================================
// ExchangeFailure
// ============================================================================

/// Failure of a message exchange.
#[derive(Debug, Error)]
pub enum ExchangeFailure {
    /// The message could not be delivered or was refused at transport level.
    #[error("Failed to send message: {0}")]
    MessageSend(#[source] Error),

    /// A response arrived but could not be processed.
    #[error("Received invalid response: {0}")]
    InvalidResponse(#[source] Error),

    /// Unanticipated failure while processing a response.
    #[error("Internal error: {0}")]
    Internal(#[source] Error),
}

impl ExchangeFailure {
    /// Classifies a failure that occurred after a response was received.
    #[must_use]
    pub(crate) fn from_processing(error: Error) -> Self {
        if error.is_invalid_response() {
            Self::InvalidResponse(error)
        } else {
            Self::Internal(error)
        }
    }

    /// Returns the underlying error.
    #[inline]
    #[must_use]
    pub fn error(&self) -> &Error {
        match self {
            Self::MessageSend(e) | Self::InvalidResponse(e) | Self::Internal(e) => e,
        }
    }

    /// Returns `true` if the peer refused our credentials.
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::MessageSend(e) if e.is_unauthorized())
    }
}

// ============================================================================
// Tests
// ============================================================================
