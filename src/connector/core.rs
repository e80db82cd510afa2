//! Connector handle shared by the exchange operations.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::identifiers::Recipient;
use crate::protocol::{ComponentDeserializer, RequestMessage, ResponseEnvelope};
use crate::transport::MessageTransport;

use super::builder::ConnectorBuilder;
use super::options::ConnectorOptions;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the connector.
pub(crate) struct ConnectorInner {
    /// Identity and messaging options.
    pub options: ConnectorOptions,

    /// Delivers messages to peers.
    pub transport: Arc<dyn MessageTransport>,

    /// Parses description payloads.
    pub deserializer: Arc<dyn ComponentDeserializer>,
}

// ============================================================================
// Connector
// ============================================================================

/// The local connector.
///
/// Holds no mutable state: every exchange is an independent round trip,
/// so a `Connector` can be cloned into any number of concurrent request
/// handlers.
///
/// # Examples
///
/// ```no_run
/// use dataspace_connector::{Connector, DescriptionOutcome};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let connector = Connector::builder()
///     .connector_id("https://connector.example")
///     .build()?;
///
/// let peer = "https://peer.example/api/ids/data".parse()?;
/// match connector.request_description(&peer, None).await? {
///     DescriptionOutcome::Component(component) => println!("{}", component.id()),
///     DescriptionOutcome::Payload(raw) => println!("{raw}"),
///     DescriptionOutcome::Passthrough(envelope) => println!("{envelope:?}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Connector {
    /// Shared inner state.
    pub(crate) inner: Arc<ConnectorInner>,
}

// ============================================================================
// Connector - Display
// ============================================================================

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("id", &self.inner.options.connector_id)
            .field("request_timeout", &self.inner.options.request_timeout)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Connector - Public API
// ============================================================================

impl Connector {
    /// Creates a configuration builder for the connector.
    #[inline]
    #[must_use]
    pub fn builder() -> ConnectorBuilder {
        ConnectorBuilder::new()
    }

    /// Returns the identifier of this connector.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &Url {
        &self.inner.options.connector_id
    }

    /// Returns the connector options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ConnectorOptions {
        &self.inner.options
    }
}

// ============================================================================
// Connector - Internal
// ============================================================================

impl Connector {
    /// Creates a connector from validated parts.
    pub(crate) fn new(
        options: ConnectorOptions,
        transport: Arc<dyn MessageTransport>,
        deserializer: Arc<dyn ComponentDeserializer>,
    ) -> Self {
        Self {
            inner: Arc::new(ConnectorInner {
                options,
                transport,
                deserializer,
            }),
        }
    }

    /// Sends a message through the configured transport.
    pub(crate) async fn send(
        &self,
        recipient: &Recipient,
        message: &RequestMessage,
    ) -> Result<ResponseEnvelope> {
        debug!(%recipient, kind = %message.kind(), "Sending message");
        self.inner.transport.send(recipient, message).await
    }
}
