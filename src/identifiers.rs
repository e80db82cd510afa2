//! Type-safe identifiers for connectors, elements and messages.
//!
//! Newtype wrappers prevent passing a requested element where a peer
//! address is expected, and vice versa.
//!
//! | Type | Wraps | Purpose |
//! |------|-------|---------|
//! | [`Recipient`] | [`Url`] | Network address of a peer connector |
//! | [`ElementId`] | [`Url`] | Identifier of a resource, artifact or other element |
//! | [`MessageId`] | [`Uuid`] | Identifier of an outbound protocol message |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};

// ============================================================================
// Recipient
// ============================================================================

/// Network address of a peer connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipient(Url);

impl Recipient {
    /// Wraps an already parsed URL.
    #[inline]
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    /// Returns the underlying URL.
    #[inline]
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl FromStr for Recipient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
            .map(Self)
            .map_err(|e| Error::config(format!("Invalid recipient '{s}': {e}")))
    }
}

impl From<Url> for Recipient {
    #[inline]
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for Recipient {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Identifier of an element hosted by a peer connector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Url);

impl ElementId {
    /// Wraps an already parsed URI.
    #[inline]
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    /// Returns the underlying URI.
    #[inline]
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl FromStr for ElementId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
            .map(Self)
            .map_err(|e| Error::config(format!("Invalid element id '{s}': {e}")))
    }
}

impl From<Url> for ElementId {
    #[inline]
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for ElementId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// MessageId
// ============================================================================

/// Identifier of an outbound protocol message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generates a new random message ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MessageId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// Tests
// ============================================================================
