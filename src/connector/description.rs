//! Description exchange.

use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::identifiers::{ElementId, Recipient};
use crate::protocol::{Classification, MessageKind, RequestMessage, classify, extract_payload};

use super::Connector;
use super::outcome::{DescriptionOutcome, ExchangeFailure};

// ============================================================================
// Connector - Description Exchange
// ============================================================================

impl Connector {
    /// Asks a peer to describe itself, or one of its elements.
    ///
    /// With `element_id`, the description payload is returned verbatim.
    /// Without it, the payload is parsed into a
    /// [`DescribedComponent`](crate::protocol::DescribedComponent); a
    /// payload that is neither a resource nor a connector description is
    /// returned verbatim instead.
    ///
    /// A well-formed response of another message kind (typically a
    /// rejection) is returned as [`DescriptionOutcome::Passthrough`].
    ///
    /// # Arguments
    ///
    /// * `recipient` - Address of the peer connector
    /// * `element_id` - Element to describe; `None` for the self-description
    ///
    /// # Errors
    ///
    /// - [`ExchangeFailure::MessageSend`] if the message could not be delivered
    /// - [`ExchangeFailure::InvalidResponse`] if the response is unreadable
    /// - [`ExchangeFailure::Internal`] for any other processing failure
    pub async fn request_description(
        &self,
        recipient: &Recipient,
        element_id: Option<&ElementId>,
    ) -> Result<DescriptionOutcome, ExchangeFailure> {
        let message = RequestMessage::description(element_id.cloned());

        let envelope = self.send(recipient, &message).await.map_err(|e| {
            warn!(%recipient, error = %e, "Description request failed");
            ExchangeFailure::MessageSend(e)
        })?;

        match classify(&envelope, &MessageKind::DescriptionResponse) {
            Ok(Classification::Expected) => {}
            Ok(Classification::Unexpected { actual }) => {
                info!(
                    %recipient,
                    %actual,
                    reason = envelope.rejection_reason().as_deref().unwrap_or("none"),
                    "Peer did not answer with a description, passing response through"
                );
                return Ok(DescriptionOutcome::Passthrough(envelope));
            }
            Err(e) => {
                warn!(%recipient, error = %e, "Received invalid description response");
                return Err(ExchangeFailure::InvalidResponse(e));
            }
        }

        let payload = extract_payload(&envelope)
            .map_err(|e| self.processing_failure(recipient, e))?;

        if let Some(element_id) = element_id {
            debug!(
                %recipient,
                %element_id,
                payload_len = payload.len(),
                "Received element description"
            );
            return Ok(DescriptionOutcome::Payload(payload));
        }

        match self.inner.deserializer.parse(&payload) {
            Ok(component) => {
                debug!(%recipient, id = %component.id(), "Received self-description");
                Ok(DescriptionOutcome::Component(component))
            }
            Err(Error::UnrecognizedComponent { found }) => {
                warn!(
                    %recipient,
                    found = %found,
                    payload_len = payload.len(),
                    "Description payload is not a known component, returning it unparsed"
                );
                Ok(DescriptionOutcome::Payload(payload))
            }
            Err(e) => Err(self.processing_failure(recipient, e)),
        }
    }

    /// Translates a failure after receipt, logging it on the way out.
    pub(crate) fn processing_failure(&self, recipient: &Recipient, e: Error) -> ExchangeFailure {
        let failure = ExchangeFailure::from_processing(e);
        match &failure {
            ExchangeFailure::Internal(e) => {
                error!(%recipient, error = %e, "Failed to process response");
            }
            other => {
                warn!(%recipient, error = %other, "Received invalid response");
            }
        }
        failure
    }
}

// ============================================================================
// Tests
// ============================================================================
