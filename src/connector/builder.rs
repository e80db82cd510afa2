//! Builder pattern for connector configuration.
//!
//! Provides a fluent API for configuring and creating [`Connector`] instances.
//!
//! # Example
//!
//! ```no_run
//! use dataspace_connector::Connector;
//!
//! # fn example() -> dataspace_connector::Result<()> {
//! let connector = Connector::builder()
//!     .connector_id("https://connector.example")
//!     .security_token("eyJhbGciOi...")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{ComponentDeserializer, JsonLdDeserializer};
use crate::transport::{HttpTransport, MessageTransport};

use super::core::Connector;
use super::options::ConnectorOptions;

// ============================================================================
// ConnectorBuilder
// ============================================================================

/// Builder for configuring a [`Connector`] instance.
///
/// Use [`Connector::builder()`] to create a new builder.
#[derive(Default, Clone)]
pub struct ConnectorBuilder {
    /// Identifier of this connector, unparsed.
    connector_id: Option<String>,
    /// Sender agent, unparsed.
    sender_agent: Option<String>,
    /// Information model version.
    model_version: Option<String>,
    /// Dynamic attribute token.
    security_token: Option<String>,
    /// Outbound request timeout.
    request_timeout: Option<Duration>,
    /// Custom message transport.
    transport: Option<Arc<dyn MessageTransport>>,
    /// Custom component deserializer.
    deserializer: Option<Arc<dyn ComponentDeserializer>>,
}

impl fmt::Debug for ConnectorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorBuilder")
            .field("connector_id", &self.connector_id)
            .field("sender_agent", &self.sender_agent)
            .field("model_version", &self.model_version)
            .field("security_token", &self.security_token.as_ref().map(|_| "***"))
            .field("request_timeout", &self.request_timeout)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_deserializer", &self.deserializer.is_some())
            .finish()
    }
}

// ============================================================================
// ConnectorBuilder Implementation
// ============================================================================

impl ConnectorBuilder {
    /// Creates a new connector builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier of this connector.
    ///
    /// # Arguments
    ///
    /// * `id` - Absolute URI (e.g., "https://connector.example")
    #[inline]
    #[must_use]
    pub fn connector_id(mut self, id: impl Into<String>) -> Self {
        self.connector_id = Some(id.into());
        self
    }

    /// Sets the sender agent. Defaults to the connector id.
    #[inline]
    #[must_use]
    pub fn sender_agent(mut self, agent: impl Into<String>) -> Self {
        self.sender_agent = Some(agent.into());
        self
    }

    /// Sets the information model version.
    #[inline]
    #[must_use]
    pub fn model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = Some(version.into());
        self
    }

    /// Sets the dynamic attribute token presented to peers.
    #[inline]
    #[must_use]
    pub fn security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Sets the round-trip timeout for outbound messages.
    #[inline]
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Replaces the HTTP transport.
    ///
    /// A custom transport ignores the timeout and identity settings; it is
    /// responsible for both.
    #[inline]
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn MessageTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the JSON-LD component deserializer.
    #[inline]
    #[must_use]
    pub fn deserializer(mut self, deserializer: Arc<dyn ComponentDeserializer>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    /// Builds the connector with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the connector id is missing or not a URI
    /// - [`Error::Config`] if the sender agent is not a URI
    /// - [`Error::Config`] if the options are invalid
    pub fn build(self) -> Result<Connector> {
        let options = self.validate_options()?;

        let transport: Arc<dyn MessageTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_timeout(
                options.issuer(),
                options.request_timeout,
            )?),
        };

        let deserializer: Arc<dyn ComponentDeserializer> = self
            .deserializer
            .unwrap_or_else(|| Arc::new(JsonLdDeserializer));

        Ok(Connector::new(options, transport, deserializer))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl ConnectorBuilder {
    /// Validates and assembles the connector options.
    fn validate_options(&self) -> Result<ConnectorOptions> {
        let connector_id = self.connector_id.as_deref().ok_or_else(|| {
            Error::config(
                "Connector id is required. Use .connector_id() to set it.\n\
                 Example: Connector::builder().connector_id(\"https://connector.example\")",
            )
        })?;
        let connector_id = parse_uri("connector id", connector_id)?;

        let mut options = ConnectorOptions::new(connector_id);

        if let Some(agent) = &self.sender_agent {
            options = options.with_sender_agent(parse_uri("sender agent", agent)?);
        }
        if let Some(version) = &self.model_version {
            options = options.with_model_version(version.clone());
        }
        if let Some(token) = &self.security_token {
            options = options.with_security_token(token.clone());
        }
        if let Some(timeout) = self.request_timeout {
            options = options.with_request_timeout(timeout);
        }

        options.validate().map_err(Error::config)?;
        Ok(options)
    }
}

fn parse_uri(what: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::config(format!("Invalid {what} '{value}': {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::FnTransport;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ConnectorBuilder::new();
        assert!(builder.connector_id.is_none());
        assert!(builder.transport.is_none());
    }

    #[test]
    fn test_build_fails_without_connector_id() {
        let err = ConnectorBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("Connector id is required"));
    }

    #[test]
    fn test_build_fails_with_relative_connector_id() {
        let err = ConnectorBuilder::new()
            .connector_id("connector/1")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_build_fails_with_invalid_sender_agent() {
        let err = ConnectorBuilder::new()
            .connector_id("https://connector.example")
            .sender_agent("not a uri")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("sender agent"));
    }

    #[test]
    fn test_build_fails_with_zero_timeout() {
        let err = ConnectorBuilder::new()
            .connector_id("https://connector.example")
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn test_build_with_default_transport() {
        let connector = ConnectorBuilder::new()
            .connector_id("https://connector.example")
            .security_token("jwt")
            .request_timeout(Duration::from_secs(5))
            .build()
            .expect("build");

        assert_eq!(connector.id().as_str(), "https://connector.example/");
        assert_eq!(connector.options().security_token.as_deref(), Some("jwt"));
        assert_eq!(connector.options().request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_build_with_custom_transport() {
        let connector = ConnectorBuilder::new()
            .connector_id("https://connector.example")
            .transport(Arc::new(FnTransport::unreachable()))
            .build()
            .expect("build");
        assert_eq!(connector.options().sender_agent, *connector.id());
    }

    #[test]
    fn test_debug_hides_token() {
        let builder = ConnectorBuilder::new().security_token("secret-token");
        let debug = format!("{builder:?}");
        assert!(!debug.contains("secret-token"));
    }
}
