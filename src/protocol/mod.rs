//! IDS protocol message types.
//!
//! This module defines what travels between this connector and its peers,
//! and how received responses are interpreted.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `DescriptionRequestMessage` | Local → Peer | Ask for a self-description or element description |
//! | `DescriptionResponseMessage` | Peer → Local | Description payload |
//! | `ArtifactRequestMessage` | Local → Peer | Ask for artifact data |
//! | `ArtifactResponseMessage` | Peer → Local | Artifact data |
//! | `RejectionMessage` | Peer → Local | Request refused, with a reason |
//!
//! Messages are `multipart/form-data` bodies with a JSON-LD `header` part
//! and an optional `payload` part.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `kind` | Message kind tags |
//! | `message` | Outbound requests and headers |
//! | `envelope` | Received responses and payload extraction |
//! | `classify` | Response classification |
//! | `component` | Typed description payloads |
//! | `multipart` | Response body decoding |

// ============================================================================
// Submodules
// ============================================================================

/// Response classification against an expected kind.
pub mod classify;

/// Typed description payloads.
pub mod component;

/// Received responses and payload extraction.
pub mod envelope;

/// Message kind tags.
pub mod kind;

/// Outbound request messages and headers.
pub mod message;

/// Multipart response decoding.
pub mod multipart;

// ============================================================================
// Re-exports
// ============================================================================

pub use classify::{Classification, classify};
pub use component::{
    ComponentDeserializer, ConnectorDescription, DescribedComponent, JsonLdDeserializer,
    ResourceDescription,
};
pub use envelope::{HEADER_PART, PAYLOAD_PART, ResponseEnvelope, extract_payload};
pub use kind::MessageKind;
pub use message::{DEFAULT_MODEL_VERSION, Issuer, MessageHeader, RequestMessage};
