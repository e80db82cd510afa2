//! Message transport layer.
//!
//! This module delivers request messages to peer connectors and returns
//! their multipart responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Connector      │      multipart/form-data     │  Peer           │
//! │                 │  ─────────────────────────►  │  Connector      │
//! │  HttpTransport  │   header (+ payload) parts   │                 │
//! │                 │  ◄─────────────────────────  │                 │
//! └─────────────────┘      multipart response      └─────────────────┘
//! ```
//!
//! Timeouts belong to the transport; callers never retry.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `http` | IDS multipart over HTTP(S) |

// ============================================================================
// Submodules
// ============================================================================

/// IDS multipart messages over HTTP(S).
pub mod http;

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;

use crate::error::Result;
use crate::identifiers::Recipient;
use crate::protocol::{RequestMessage, ResponseEnvelope};

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpTransport;

// ============================================================================
// MessageTransport
// ============================================================================

/// Sends a request message to a peer and returns its response.
///
/// Implementations own header construction, serialization, timeouts and
/// response decoding. Any failure to obtain a decoded response is an
/// error; classifying the response is left to the caller.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Sends `message` to `recipient`.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`](crate::Error::Connection) if the peer is unreachable
    /// - [`Error::Unauthorized`](crate::Error::Unauthorized) if the peer refuses our credentials
    /// - [`Error::PeerStatus`](crate::Error::PeerStatus) for other non-success statuses
    /// - [`Error::RequestTimeout`](crate::Error::RequestTimeout) if the peer does not answer in time
    /// - [`Error::InvalidResponse`](crate::Error::InvalidResponse) if the body cannot be decoded
    async fn send(
        &self,
        recipient: &Recipient,
        message: &RequestMessage,
    ) -> Result<ResponseEnvelope>;
}
