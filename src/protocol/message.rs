//! Outbound request messages and their JSON-LD headers.
//!
//! Every IDS message travels as a multipart body whose `header` part is a
//! JSON-LD object describing the message:
//!
//! ```json
//! {
//!   "@context": { "ids": "https://w3id.org/idsa/core/" },
//!   "@type": "ids:DescriptionRequestMessage",
//!   "@id": "https://w3id.org/idsa/autogen/descriptionRequestMessage/<uuid>",
//!   "ids:modelVersion": "4.0.0",
//!   "ids:issued": { "@value": "2026-10-17T09:00:00Z", "@type": "xsd:dateTimeStamp" },
//!   "ids:issuerConnector": { "@id": "https://connector.example" },
//!   "ids:senderAgent": { "@id": "https://connector.example" },
//!   "ids:recipientConnector": [ { "@id": "https://peer.example/ids" } ],
//!   "ids:securityToken": { "@type": "ids:DynamicAttributeToken", ... },
//!   "ids:requestedElement": { "@id": "urn:x:1" }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::{ElementId, MessageId, Recipient};

use super::kind::{IDS_NAMESPACE, MessageKind};

// ============================================================================
// Constants
// ============================================================================

/// Base URI for generated message and token identifiers.
pub const AUTOGEN_BASE: &str = "https://w3id.org/idsa/autogen/";

/// Information model version announced in outbound headers.
pub const DEFAULT_MODEL_VERSION: &str = "4.0.0";

/// Datatype of the `ids:issued` literal.
const DATE_TIME_STAMP: &str = "http://www.w3.org/2001/XMLSchema#dateTimeStamp";

/// Token format of the dynamic attribute token.
const TOKEN_FORMAT_JWT: &str = "https://w3id.org/idsa/code/JWT";

// ============================================================================
// RequestMessage
// ============================================================================

/// A request this connector can send to a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMessage {
    /// Asks a peer to describe itself, or one of its elements.
    Description {
        /// Element to describe; `None` asks for the self-description.
        requested_element: Option<ElementId>,
    },

    /// Asks a peer for the data behind an artifact.
    Artifact {
        /// The artifact whose data is requested.
        requested_artifact: ElementId,
    },
}

impl RequestMessage {
    /// Creates a description request.
    #[inline]
    #[must_use]
    pub fn description(requested_element: Option<ElementId>) -> Self {
        Self::Description { requested_element }
    }

    /// Creates an artifact request.
    #[inline]
    #[must_use]
    pub fn artifact(requested_artifact: ElementId) -> Self {
        Self::Artifact { requested_artifact }
    }

    /// Returns the message kind sent on the wire.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Description { .. } => MessageKind::DescriptionRequest,
            Self::Artifact { .. } => MessageKind::ArtifactRequest,
        }
    }

    /// Returns the message kind a well-behaved peer answers with.
    #[must_use]
    pub fn expected_response(&self) -> MessageKind {
        match self {
            Self::Description { .. } => MessageKind::DescriptionResponse,
            Self::Artifact { .. } => MessageKind::ArtifactResponse,
        }
    }
}

// ============================================================================
// Issuer
// ============================================================================

/// Identity of the local connector as stated in outbound headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    /// The issuing connector.
    pub connector: Url,
    /// The agent on whose behalf the message is sent.
    pub sender_agent: Url,
    /// Information model version.
    pub model_version: String,
    /// Dynamic attribute token value, if one is configured.
    pub security_token: Option<String>,
}

impl Issuer {
    /// Creates an issuer that acts as its own sender agent.
    #[must_use]
    pub fn new(connector: Url) -> Self {
        Self {
            sender_agent: connector.clone(),
            connector,
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            security_token: None,
        }
    }
}

// ============================================================================
// MessageHeader
// ============================================================================

/// JSON-LD header of an outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageHeader {
    #[serde(rename = "@context")]
    context: Context,

    #[serde(rename = "@type")]
    type_name: String,

    #[serde(rename = "@id")]
    id: String,

    #[serde(rename = "ids:modelVersion")]
    model_version: String,

    #[serde(rename = "ids:issued")]
    issued: TypedLiteral,

    #[serde(rename = "ids:issuerConnector")]
    issuer_connector: IdRef,

    #[serde(rename = "ids:senderAgent")]
    sender_agent: IdRef,

    #[serde(rename = "ids:recipientConnector")]
    recipient_connector: Vec<IdRef>,

    #[serde(rename = "ids:securityToken", skip_serializing_if = "Option::is_none")]
    security_token: Option<SecurityToken>,

    #[serde(rename = "ids:requestedElement", skip_serializing_if = "Option::is_none")]
    requested_element: Option<IdRef>,

    #[serde(rename = "ids:requestedArtifact", skip_serializing_if = "Option::is_none")]
    requested_artifact: Option<IdRef>,
}

#[derive(Debug, Clone, Serialize)]
struct Context {
    ids: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct IdRef {
    #[serde(rename = "@id")]
    id: String,
}

impl IdRef {
    fn new(id: impl ToString) -> Self {
        Self { id: id.to_string() }
    }
}

#[derive(Debug, Clone, Serialize)]
struct TypedLiteral {
    #[serde(rename = "@value")]
    value: String,
    #[serde(rename = "@type")]
    datatype: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct SecurityToken {
    #[serde(rename = "@type")]
    type_name: &'static str,
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "ids:tokenFormat")]
    token_format: IdRef,
    #[serde(rename = "ids:tokenValue")]
    token_value: String,
}

impl MessageHeader {
    /// Builds the header for `message` addressed to `recipient`.
    #[must_use]
    pub fn build(message: &RequestMessage, issuer: &Issuer, recipient: &Recipient) -> Self {
        Self::build_at(message, issuer, recipient, MessageId::generate(), Utc::now())
    }

    /// Builds the header with an explicit id and issue time.
    #[must_use]
    pub fn build_at(
        message: &RequestMessage,
        issuer: &Issuer,
        recipient: &Recipient,
        message_id: MessageId,
        issued: DateTime<Utc>,
    ) -> Self {
        let kind = message.kind();

        let (requested_element, requested_artifact) = match message {
            RequestMessage::Description { requested_element } => {
                (requested_element.as_ref().map(IdRef::new), None)
            }
            RequestMessage::Artifact { requested_artifact } => {
                (None, Some(IdRef::new(requested_artifact)))
            }
        };

        let security_token = issuer.security_token.as_ref().map(|token| SecurityToken {
            type_name: "ids:DynamicAttributeToken",
            id: autogen_id("dynamicAttributeToken", &MessageId::generate()),
            token_format: IdRef::new(TOKEN_FORMAT_JWT),
            token_value: token.clone(),
        });

        Self {
            context: Context {
                ids: IDS_NAMESPACE,
            },
            type_name: kind.type_name(),
            id: autogen_id(&lower_camel(kind.local_name()), &message_id),
            model_version: issuer.model_version.clone(),
            issued: TypedLiteral {
                value: issued.to_rfc3339_opts(SecondsFormat::Millis, true),
                datatype: DATE_TIME_STAMP,
            },
            issuer_connector: IdRef::new(&issuer.connector),
            sender_agent: IdRef::new(&issuer.sender_agent),
            recipient_connector: vec![IdRef::new(recipient)],
            security_token,
            requested_element,
            requested_artifact,
        }
    }

    /// Returns the generated message `@id`.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Serializes the header for the `header` multipart part.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MessageBuild`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::message_build(e.to_string()))
    }
}

fn autogen_id(kind: &str, id: &MessageId) -> String {
    format!("{AUTOGEN_BASE}{kind}/{id}")
}

/// `DescriptionRequestMessage` -> `descriptionRequestMessage`.
fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================
