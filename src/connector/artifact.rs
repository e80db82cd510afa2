//! Artifact exchange.

use tracing::{debug, info, warn};

use crate::identifiers::{ElementId, Recipient};
use crate::protocol::{Classification, MessageKind, RequestMessage, classify, extract_payload};

use super::Connector;
use super::outcome::{ArtifactOutcome, ExchangeFailure};

// ============================================================================
// Connector - Artifact Exchange
// ============================================================================

impl Connector {
    /// Requests the data behind an artifact from a peer.
    ///
    /// The artifact data is returned verbatim. A well-formed response of
    /// another message kind is returned as [`ArtifactOutcome::Passthrough`].
    ///
    /// # Errors
    ///
    /// - [`ExchangeFailure::MessageSend`] if the message could not be delivered
    /// - [`ExchangeFailure::InvalidResponse`] if the response is unreadable
    pub async fn request_artifact(
        &self,
        recipient: &Recipient,
        artifact_id: &ElementId,
    ) -> Result<ArtifactOutcome, ExchangeFailure> {
        let message = RequestMessage::artifact(artifact_id.clone());

        let envelope = self.send(recipient, &message).await.map_err(|e| {
            warn!(%recipient, %artifact_id, error = %e, "Artifact request failed");
            ExchangeFailure::MessageSend(e)
        })?;

        match classify(&envelope, &MessageKind::ArtifactResponse) {
            Ok(Classification::Expected) => {}
            Ok(Classification::Unexpected { actual }) => {
                info!(
                    %recipient,
                    %artifact_id,
                    %actual,
                    reason = envelope.rejection_reason().as_deref().unwrap_or("none"),
                    "Peer did not answer with artifact data, passing response through"
                );
                return Ok(ArtifactOutcome::Passthrough(envelope));
            }
            Err(e) => {
                warn!(%recipient, error = %e, "Received invalid artifact response");
                return Err(ExchangeFailure::InvalidResponse(e));
            }
        }

        let payload = extract_payload(&envelope)
            .map_err(|e| self.processing_failure(recipient, e))?;

        debug!(%recipient, %artifact_id, payload_len = payload.len(), "Received artifact data");
        Ok(ArtifactOutcome::Payload(payload))
    }
}

// ============================================================================
// Tests
// ============================================================================
