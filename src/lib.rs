//! Dataspace Connector - IDS message exchange with peer connectors.
//!
//! This library lets a local connector ask peer connectors of an IDS data
//! space for descriptions of themselves and their resources, and for the
//! data behind their artifacts.
//!
//! # Architecture
//!
//! The connector follows a request/response model:
//!
//! - **Local End**: Builds a JSON-LD message header, posts it as multipart
//! - **Remote End (peer)**: Answers with a multipart `header` + `payload`
//!
//! Key design principles:
//!
//! - Responses are classified by message kind before anything is extracted
//! - A well-formed response of an unexpected kind (e.g. a rejection) is
//!   handed back to the caller, not treated as an error
//! - Failures carry their category ([`ExchangeFailure`]) so the HTTP layer
//!   can pick a status code without inspecting messages
//!
//! # Quick Start
//!
//! ```no_run
//! use dataspace_connector::{Connector, DescriptionOutcome, Recipient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let connector = Connector::builder()
//!         .connector_id("https://connector.example")
//!         .build()?;
//!
//!     let peer: Recipient = "https://peer.example/api/ids/data".parse()?;
//!     match connector.request_description(&peer, None).await? {
//!         DescriptionOutcome::Component(component) => println!("{}", component.id()),
//!         other => println!("{other:?}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Inbound HTTP API |
//! | [`connector`] | Connector handle and exchanges |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe URI wrappers |
//! | [`protocol`] | IDS message types |
//! | [`transport`] | Outbound message transport |

// ============================================================================
// Modules
// ============================================================================

/// Inbound HTTP API.
///
/// Use [`api::router`] to mount the endpoints or [`api::serve`] to run them.
pub mod api;

/// Connector handle and the exchanges it performs.
///
/// Use [`Connector::builder()`] to create a configured connector.
pub mod connector;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for peers and elements.
pub mod identifiers;

/// IDS protocol message types.
///
/// Outbound headers, received envelopes and their classification.
pub mod protocol;

/// Outbound message transport.
///
/// [`transport::HttpTransport`] delivers messages over multipart HTTP.
pub mod transport;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

// Connector types
pub use connector::{
    ArtifactOutcome, Connector, ConnectorBuilder, ConnectorOptions, DescriptionOutcome,
    ExchangeFailure,
};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, MessageId, Recipient};

// Protocol types
pub use protocol::{
    Classification, ComponentDeserializer, DescribedComponent, MessageKind, RequestMessage,
    ResponseEnvelope,
};

// Transport types
pub use transport::{HttpTransport, MessageTransport};
