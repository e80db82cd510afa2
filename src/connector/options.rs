//! Connector identity and messaging options.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use dataspace_connector::ConnectorOptions;
//!
//! let options = ConnectorOptions::new("https://connector.example".parse()?)
//!     .with_security_token("eyJhbGciOi...")
//!     .with_request_timeout(Duration::from_secs(10));
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use url::Url;

use crate::protocol::{DEFAULT_MODEL_VERSION, Issuer};
use crate::transport::http::DEFAULT_REQUEST_TIMEOUT;

// ============================================================================
// ConnectorOptions
// ============================================================================

/// Identity and messaging options of the local connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorOptions {
    /// Identifier of this connector (`ids:issuerConnector`).
    pub connector_id: Url,

    /// Agent on whose behalf messages are sent (`ids:senderAgent`).
    pub sender_agent: Url,

    /// Information model version announced in headers.
    pub model_version: String,

    /// Dynamic attribute token presented to peers.
    pub security_token: Option<String>,

    /// Round-trip timeout for outbound messages.
    pub request_timeout: Duration,
}

// ============================================================================
// Constructors
// ============================================================================

impl ConnectorOptions {
    /// Creates options for `connector_id`, acting as its own sender agent.
    #[must_use]
    pub fn new(connector_id: Url) -> Self {
        Self {
            sender_agent: connector_id.clone(),
            connector_id,
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            security_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ConnectorOptions {
    /// Sets the sender agent.
    #[inline]
    #[must_use]
    pub fn with_sender_agent(mut self, sender_agent: Url) -> Self {
        self.sender_agent = sender_agent;
        self
    }

    /// Sets the information model version.
    #[inline]
    #[must_use]
    pub fn with_model_version(mut self, version: impl Into<String>) -> Self {
        self.model_version = version.into();
        self
    }

    /// Sets the security token.
    #[inline]
    #[must_use]
    pub fn with_security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ConnectorOptions {
    /// Returns the identity stated in outbound headers.
    #[must_use]
    pub fn issuer(&self) -> Issuer {
        Issuer {
            connector: self.connector_id.clone(),
            sender_agent: self.sender_agent.clone(),
            model_version: self.model_version.clone(),
            security_token: self.security_token.clone(),
        }
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout.is_zero() {
            return Err("Request timeout must be greater than zero".to_string());
        }
        if self.model_version.trim().is_empty() {
            return Err("Model version must not be empty".to_string());
        }
        if self
            .security_token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            return Err("Security token must not be blank".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
