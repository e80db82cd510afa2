//! Error types for the dataspace connector.
//!
//! This module defines the library-level error type used by the protocol,
//! transport and connector layers. Failures that leave the exchange
//! coordinators are translated into
//! [`ExchangeFailure`](crate::connector::ExchangeFailure) first.
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Transport | [`Error::Connection`], [`Error::Unauthorized`], [`Error::PeerStatus`], [`Error::RequestTimeout`] |
//! | Protocol | [`Error::InvalidResponse`], [`Error::MessageBuild`] |
//! | Payload | [`Error::UnrecognizedComponent`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Http`], [`Error::Multipart`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use url::Url;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when connector configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The peer connector could not be reached.
    #[error("Connection to {recipient} failed: {message}")]
    Connection {
        /// Address of the peer.
        recipient: Url,
        /// Description of the connection error.
        message: String,
    },

    /// The peer refused the message because of missing or invalid credentials.
    #[error("Peer {recipient} rejected the request as unauthorized (HTTP {status})")]
    Unauthorized {
        /// Address of the peer.
        recipient: Url,
        /// HTTP status returned by the peer (401 or 403).
        status: u16,
    },

    /// The peer answered with a non-success HTTP status.
    #[error("Peer {recipient} answered with HTTP {status}")]
    PeerStatus {
        /// Address of the peer.
        recipient: Url,
        /// HTTP status returned by the peer.
        status: u16,
    },

    /// The peer did not answer in time.
    #[error("Request to {recipient} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// Address of the peer.
        recipient: Url,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// The outbound message could not be built or serialized.
    #[error("Failed to build message: {message}")]
    MessageBuild {
        /// Description of the build failure.
        message: String,
    },

    /// A response was received but cannot be processed.
    ///
    /// Covers missing multipart parts, unreadable headers, headers without
    /// a message type and payloads that claim a known type but are broken.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of the defect.
        message: String,
    },

    // ========================================================================
    // Payload Errors
    // ========================================================================
    /// The payload is neither a resource nor a connector description.
    #[error("Unrecognized component: {found}")]
    UnrecognizedComponent {
        /// What was found instead (type name or shape).
        found: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error not classified as a transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Multipart decoding error.
    #[error("Multipart error: {0}")]
    Multipart(#[from] multer::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(recipient: &Url, message: impl Into<String>) -> Self {
        Self::Connection {
            recipient: recipient.clone(),
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    #[inline]
    pub fn unauthorized(recipient: &Url, status: u16) -> Self {
        Self::Unauthorized {
            recipient: recipient.clone(),
            status,
        }
    }

    /// Creates a peer status error.
    #[inline]
    pub fn peer_status(recipient: &Url, status: u16) -> Self {
        Self::PeerStatus {
            recipient: recipient.clone(),
            status,
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(recipient: &Url, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            recipient: recipient.clone(),
            timeout_ms,
        }
    }

    /// Creates a message build error.
    #[inline]
    pub fn message_build(message: impl Into<String>) -> Self {
        Self::MessageBuild {
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[inline]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an unrecognized component error.
    #[inline]
    pub fn unrecognized_component(found: impl Into<String>) -> Self {
        Self::UnrecognizedComponent {
            found: found.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the message never produced a usable response.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::Unauthorized { .. }
                | Self::PeerStatus { .. }
                | Self::RequestTimeout { .. }
                | Self::MessageBuild { .. }
                | Self::Http(_)
        )
    }

    /// Returns `true` if the peer refused our credentials.
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if a response arrived but could not be processed.
    #[inline]
    #[must_use]
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Self::InvalidResponse { .. } | Self::Multipart(_))
    }

    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestTimeout { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
