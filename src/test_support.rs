//! Test doubles shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::connector::Connector;
use crate::error::{Error, Result};
use crate::identifiers::Recipient;
use crate::protocol::{
    ComponentDeserializer, DescribedComponent, HEADER_PART, PAYLOAD_PART, RequestMessage,
    ResponseEnvelope,
};
use crate::transport::MessageTransport;

type Handler = dyn Fn(&Recipient, &RequestMessage) -> Result<ResponseEnvelope> + Send + Sync;

/// Transport that answers every message with a closure.
pub(crate) struct FnTransport {
    handler: Box<Handler>,
    calls: AtomicUsize,
    last_message: Mutex<Option<RequestMessage>>,
}

impl FnTransport {
    pub(crate) fn new(
        handler: impl Fn(&Recipient, &RequestMessage) -> Result<ResponseEnvelope>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        }
    }

    /// Answers every message with a copy of `envelope`.
    pub(crate) fn responding(envelope: ResponseEnvelope) -> Self {
        Self::new(move |_, _| Ok(envelope.clone()))
    }

    /// Fails every message as if the peer were down.
    pub(crate) fn unreachable() -> Self {
        Self::new(|recipient, _| Err(Error::connection(recipient.as_url(), "connection refused")))
    }

    /// Fails every message as if the peer refused our token.
    pub(crate) fn unauthorized() -> Self {
        Self::new(|recipient, _| Err(Error::unauthorized(recipient.as_url(), 401)))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_message(&self) -> Option<RequestMessage> {
        self.last_message.lock().clone()
    }
}

#[async_trait]
impl MessageTransport for FnTransport {
    async fn send(
        &self,
        recipient: &Recipient,
        message: &RequestMessage,
    ) -> Result<ResponseEnvelope> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock() = Some(message.clone());
        (self.handler)(recipient, message)
    }
}

/// Deserializer that always fails with a non-protocol error.
pub(crate) struct FailingDeserializer;

impl ComponentDeserializer for FailingDeserializer {
    fn parse(&self, _payload: &str) -> Result<DescribedComponent> {
        Err(Error::from(std::io::Error::other("deserializer crashed")))
    }
}

pub(crate) fn peer() -> Recipient {
    "https://peer.example/ids".parse().expect("valid recipient")
}

pub(crate) fn response(kind: &str, payload: Option<&str>) -> ResponseEnvelope {
    let header = serde_json::json!({
        "@type": kind,
        "@id": "https://w3id.org/idsa/autogen/response/1",
    })
    .to_string();

    let envelope = ResponseEnvelope::new().with_part(HEADER_PART, header);
    match payload {
        Some(payload) => envelope.with_part(PAYLOAD_PART, payload),
        None => envelope,
    }
}

pub(crate) fn description_response(payload: &str) -> ResponseEnvelope {
    response("ids:DescriptionResponseMessage", Some(payload))
}

pub(crate) fn rejection(reason: &str) -> ResponseEnvelope {
    let header = serde_json::json!({
        "@type": "ids:RejectionMessage",
        "ids:rejectionReason": { "@id": reason },
    })
    .to_string();

    ResponseEnvelope::new()
        .with_part(HEADER_PART, header)
        .with_part(PAYLOAD_PART, "Request was rejected.")
}

pub(crate) fn connector_with(transport: Arc<FnTransport>) -> Connector {
    Connector::builder()
        .connector_id("https://connector.example")
        .transport(transport)
        .build()
        .expect("connector")
}
